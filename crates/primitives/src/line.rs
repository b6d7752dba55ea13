use std::fmt;

use serde::{Deserialize, Serialize};

/// Position in a document in line/column coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinePosition {
	/// Zero-based line index.
	pub line: u32,
	/// Zero-based column offset in the line.
	pub column: u32,
}

impl LinePosition {
	/// The document origin (line 0, column 0).
	pub const ZERO: Self = Self { line: 0, column: 0 };

	/// Creates a new position.
	pub const fn new(line: u32, column: u32) -> Self {
		Self { line, column }
	}
}

impl fmt::Display for LinePosition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// Span of document lines with inclusive start and end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
	/// Start position (inclusive).
	pub start: LinePosition,
	/// End position (inclusive).
	pub end: LinePosition,
}

impl LineRange {
	/// Creates a new range.
	pub const fn new(start: LinePosition, end: LinePosition) -> Self {
		Self { start, end }
	}

	/// Creates a zero-length range at a position.
	pub const fn point(pos: LinePosition) -> Self {
		Self { start: pos, end: pos }
	}

	/// Returns the range with its start position replaced.
	pub const fn with_start(self, start: LinePosition) -> Self {
		Self { start, end: self.end }
	}

	/// Returns true if the given line falls within the range.
	pub fn contains_line(&self, line: u32) -> bool {
		self.start.line <= line && line <= self.end.line
	}

	/// Number of lines covered, counting both ends.
	pub fn line_count(&self) -> u32 {
		self.end.line - self.start.line + 1
	}
}

impl fmt::Display for LineRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.start, self.end)
	}
}
