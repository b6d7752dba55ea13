//! Lazy placeholder resolution.

use std::path::PathBuf;

use chrono_humanize::HumanTime;
use patina_primitives::{LinePosition, LineRange};

use crate::error::{AnnotationError, Result};
use crate::group::{RevisionGroup, group_by_revision, revision_order};
use crate::provider::{AnnotationProvider, BlamePlaceholder, HistoryPlaceholder, Placeholder};
use crate::record::LineRecord;
use crate::token::{ReferenceToken, TokenPayload};

/// A navigable pointer produced by resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	/// Token the viewer dereferences to recover the revision context.
	pub token: ReferenceToken,
	/// Position of the line within its own revision.
	pub target: LinePosition,
}

/// What a placeholder resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAnnotation {
	/// Display summary: most recent author and relative timestamp,
	/// e.g. `"jo, 3 days ago"`.
	pub summary: String,
	/// Action offered to the presentation layer.
	pub action: AnnotationAction,
}

/// Navigation action attached to a resolved annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationAction {
	/// Open the revision breakdown for the annotated range.
	RevisionBreakdown {
		/// Position of the annotated declaration.
		anchor: LinePosition,
		/// One location per line: groups in ascending order index,
		/// lines within a group in ascending current-line order.
		locations: Vec<Location>,
	},
	/// Open the full history of the file.
	FileHistory {
		/// File whose history to show.
		path: PathBuf,
	},
}

impl AnnotationProvider {
	/// Resolves one placeholder into its annotation.
	///
	/// Resolutions of different placeholders are independent: they may
	/// run concurrently, complete in any order, fail, or be dropped
	/// without affecting one another or the shared fetch. The only
	/// suspension point is the file's shared blame fetch.
	pub async fn resolve(&self, placeholder: Placeholder) -> Result<ResolvedAnnotation> {
		match placeholder {
			Placeholder::Blame(p) => resolve_blame(p).await,
			Placeholder::History(p) => Ok(resolve_history(p)),
		}
	}
}

async fn resolve_blame(placeholder: BlamePlaceholder) -> Result<ResolvedAnnotation> {
	let records = placeholder.pending.lines().await?;
	let slice = slice_range(&records, placeholder.range);
	if slice.is_empty() {
		tracing::warn!(
			path = %placeholder.file_path.display(),
			range = %placeholder.range,
			"no blame data in annotated range"
		);
		return Err(AnnotationError::NoBlameData {
			path: placeholder.file_path,
			range: placeholder.range,
		});
	}

	let groups = if slice.len() == 1 {
		// Shape-identical to what the general path produces for a
		// one-record slice, minus the sort.
		vec![RevisionGroup {
			revision: slice[0].revision.clone(),
			order_index: 1,
			lines: slice.clone(),
			most_recent: slice[0].clone(),
		}]
	} else {
		group_by_revision(&slice)
	};

	// Group 1 holds the slice-wide maximum timestamp, ties already broken
	// toward the earliest slice member.
	let most_recent = &groups[0].most_recent;
	let summary = format!("{}, {}", most_recent.author, HumanTime::from(most_recent.timestamp));

	let revisions = revision_order(&groups);
	let mut locations = Vec::with_capacity(slice.len());
	for group in &groups {
		for line in &group.lines {
			let token = ReferenceToken::encode(&TokenPayload {
				repo_path: placeholder.repo_path.clone(),
				order_index: group.order_index,
				range: placeholder.range,
				revisions: revisions.clone(),
				line: line.clone(),
			});
			locations.push(Location {
				token,
				target: LinePosition::new(line.original_line, 0),
			});
		}
	}

	Ok(ResolvedAnnotation {
		summary,
		action: AnnotationAction::RevisionBreakdown {
			anchor: placeholder.range.start,
			locations,
		},
	})
}

fn resolve_history(placeholder: HistoryPlaceholder) -> ResolvedAnnotation {
	ResolvedAnnotation {
		summary: "View History".to_string(),
		action: AnnotationAction::FileHistory {
			path: placeholder.file_path,
		},
	}
}

fn slice_range(records: &[LineRecord], range: LineRange) -> Vec<LineRecord> {
	records
		.iter()
		.filter(|record| range.contains_line(record.current_line))
		.cloned()
		.collect()
}
