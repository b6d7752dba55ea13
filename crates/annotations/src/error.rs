//! Error types for annotation resolution.

use std::path::PathBuf;

use patina_primitives::LineRange;
use thiserror::Error;

/// Errors that can occur while producing or resolving annotations.
///
/// Failures are local to one resolution: an error returned from
/// [`resolve`](crate::AnnotationProvider::resolve) never affects sibling
/// placeholders of the same document. The error is cloneable because an
/// upstream fetch failure fans out to every placeholder sharing the fetch.
#[derive(Debug, Clone, Error)]
pub enum AnnotationError {
	/// The placeholder's range mapped to an empty slice of the file's
	/// line records. Not fatal; the placeholder simply stays unresolved.
	#[error("no blame data for {path} ({range})")]
	NoBlameData {
		/// File the placeholder belongs to.
		path: PathBuf,
		/// Range that produced the empty slice.
		range: LineRange,
	},

	/// The blame or symbol service failed for the whole document, e.g.
	/// for an untracked file.
	#[error("upstream fetch failed for {path}: {message}")]
	UpstreamFetch {
		/// File whose fetch failed.
		path: PathBuf,
		/// Service-reported failure, flattened to a message so the error
		/// stays cloneable across fan-out.
		message: String,
	},

	/// A reference token could not be decoded back into its payload.
	#[error("malformed reference token: {0}")]
	MalformedToken(String),
}

/// Result type for annotation operations.
pub type Result<T> = std::result::Result<T, AnnotationError>;
