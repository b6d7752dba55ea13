//! Line-level revision metadata.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identity of one revision in a file's history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
	/// Wraps a raw revision identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RevisionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// One line's revision metadata as reported by the blame service.
///
/// The full sequence for a file holds exactly one record per current line,
/// ascending by [`current_line`](Self::current_line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
	/// Revision that last touched the line.
	pub revision: RevisionId,
	/// Author of that revision.
	pub author: String,
	/// Commit timestamp of that revision.
	pub timestamp: DateTime<Utc>,
	/// The line's number within its own revision.
	pub original_line: u32,
	/// The line's position in the file's current full sequence.
	pub current_line: u32,
}
