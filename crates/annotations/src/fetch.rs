//! Shared single-flight blame fetches keyed by file path.
//!
//! Every placeholder produced for one file holds a clone of the same
//! [`SharedBlame`] handle, so the underlying [`BlameSource`] is queried at
//! most once per file no matter how many placeholders resolve. The fetch
//! runs on a detached task: abandoning one dependent resolution never
//! cancels the fetch for the others. The registry keeps only [`WeakShared`]
//! entries, so a file's slot is released once no placeholder references it
//! any more and a later `provide` starts a fresh fetch.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{Shared, WeakShared};
use parking_lot::Mutex;
use patina_primitives::BoxFutureStatic;

use crate::error::AnnotationError;
use crate::record::LineRecord;
use crate::source::BlameSource;

/// Result fanned out to every waiter of one file's fetch.
///
/// The record sequence is behind an `Arc` and never mutated after the
/// fetch completes, so concurrent resolutions share it without locking.
pub type BlameOutcome = std::result::Result<Arc<[LineRecord]>, AnnotationError>;

type BlameFuture = Shared<BoxFutureStatic<BlameOutcome>>;

/// Cloneable handle to one file's in-flight or completed blame fetch.
#[derive(Clone)]
pub struct SharedBlame {
	inner: BlameFuture,
}

impl SharedBlame {
	/// Waits for the fetch and returns the file's full record sequence.
	pub async fn lines(&self) -> BlameOutcome {
		self.inner.clone().await
	}
}

impl fmt::Debug for SharedBlame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SharedBlame")
			.field("ready", &self.inner.peek().is_some())
			.finish()
	}
}

/// Registry of per-file fetches.
pub(crate) struct BlameFetcher {
	source: Arc<dyn BlameSource>,
	inflight: Mutex<HashMap<PathBuf, WeakShared<BoxFutureStatic<BlameOutcome>>>>,
}

impl BlameFetcher {
	pub(crate) fn new(source: Arc<dyn BlameSource>) -> Self {
		Self {
			source,
			inflight: Mutex::new(HashMap::new()),
		}
	}

	/// Returns the live handle for a file, starting a fetch if none exists.
	///
	/// Must be called from within a Tokio runtime: the fetch is spawned
	/// eagerly so it makes progress before anything awaits it.
	pub(crate) fn fetch(&self, path: &Path) -> SharedBlame {
		let mut inflight = self.inflight.lock();
		if let Some(live) = inflight.get(path).and_then(WeakShared::upgrade) {
			tracing::trace!(path = %path.display(), "joining in-flight blame fetch");
			return SharedBlame { inner: live };
		}

		let shared = self.spawn_fetch(path.to_path_buf());
		// downgrade() only fails once the future has completed; a freshly
		// spawned fetch is always live here.
		if let Some(weak) = shared.downgrade() {
			inflight.retain(|_, entry| entry.upgrade().is_some());
			inflight.insert(path.to_path_buf(), weak);
		}
		SharedBlame { inner: shared }
	}

	fn spawn_fetch(&self, path: PathBuf) -> BlameFuture {
		tracing::debug!(path = %path.display(), "starting blame fetch");
		let source = Arc::clone(&self.source);
		let task_path = path.clone();
		let task = tokio::spawn(async move {
			match source.line_records(&task_path).await {
				Ok(records) => Ok(Arc::<[LineRecord]>::from(records)),
				Err(err) => Err(AnnotationError::UpstreamFetch {
					path: task_path,
					message: format!("{err:#}"),
				}),
			}
		});
		let fut: BoxFutureStatic<BlameOutcome> = async move {
			match task.await {
				Ok(outcome) => outcome,
				Err(err) => Err(AnnotationError::UpstreamFetch {
					path,
					message: err.to_string(),
				}),
			}
		}
		.boxed();
		fut.shared()
	}
}
