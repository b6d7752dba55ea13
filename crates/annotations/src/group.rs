//! Deterministic grouping of line records by revision.

use std::collections::HashMap;

use crate::record::{LineRecord, RevisionId};

/// Lines within a queried range that share one revision, positioned by the
/// revision's recency within the slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionGroup {
	/// Revision the member lines belong to.
	pub revision: RevisionId,
	/// 1-based position after sorting groups by recency; densely assigned,
	/// so a slice with N distinct revisions uses exactly 1..=N.
	pub order_index: u32,
	/// Member lines in ascending current-line order.
	pub lines: Vec<LineRecord>,
	/// Member with the greatest timestamp; ties keep slice order.
	pub most_recent: LineRecord,
}

/// Groups a slice of line records by revision, most recent revision first.
///
/// The walk order of a stable timestamp-descending sort decides everything:
/// the first time a revision is encountered fixes its `order_index`, and
/// that same first-encounter order is the canonical revision list embedded
/// in every reference token built from the slice. Group members are then
/// re-sorted into ascending current-line order so navigation follows
/// physical line order, not recency.
///
/// Pure and synchronous; O(L log L) in the slice length.
pub fn group_by_revision(slice: &[LineRecord]) -> Vec<RevisionGroup> {
	let mut sorted: Vec<&LineRecord> = slice.iter().collect();
	// Stable: equal timestamps keep their relative slice order, which is
	// what makes `most_recent` and token output deterministic.
	sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

	let mut groups: Vec<RevisionGroup> = Vec::new();
	let mut index_of: HashMap<&RevisionId, usize> = HashMap::new();
	for record in sorted {
		match index_of.get(&record.revision) {
			Some(&i) => groups[i].lines.push(record.clone()),
			None => {
				index_of.insert(&record.revision, groups.len());
				groups.push(RevisionGroup {
					revision: record.revision.clone(),
					order_index: groups.len() as u32 + 1,
					lines: vec![record.clone()],
					most_recent: record.clone(),
				});
			}
		}
	}

	for group in &mut groups {
		group.lines.sort_by_key(|line| line.current_line);
	}
	groups
}

/// The canonical first-encounter revision ordering of a grouped slice.
pub fn revision_order(groups: &[RevisionGroup]) -> Vec<RevisionId> {
	groups.iter().map(|group| group.revision.clone()).collect()
}
