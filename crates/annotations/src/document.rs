//! Read-only view of the document being annotated.

use std::path::Path;

use patina_primitives::{LinePosition, LineRange};
use ropey::Rope;

/// Borrowed view of a document's identity and current text.
///
/// The engine never mutates the text; the rope is consulted only for
/// declaration anchor columns and for clamping the whole-document
/// fallback range.
#[derive(Debug, Clone, Copy)]
pub struct DocumentView<'a> {
	/// Path of the document, relative to the repository root or absolute.
	pub path: &'a Path,
	/// Current document text.
	pub text: &'a Rope,
}

impl<'a> DocumentView<'a> {
	/// Creates a view over a document.
	pub fn new(path: &'a Path, text: &'a Rope) -> Self {
		Self { path, text }
	}

	/// Column of the first non-blank character on a line.
	///
	/// Blank and out-of-range lines anchor at column 0.
	pub fn first_non_blank_column(&self, line: u32) -> u32 {
		if line as usize >= self.text.len_lines() {
			return 0;
		}
		self.text
			.line(line as usize)
			.chars()
			.position(|c| !c.is_whitespace())
			.map_or(0, |i| i as u32)
	}

	/// Whole-document range, clamped to the actual text.
	pub fn full_range(&self) -> LineRange {
		let last_line = self.text.len_lines().saturating_sub(1);
		let last_column = self.text.line(last_line).len_chars() as u32;
		LineRange::new(
			LinePosition::ZERO,
			LinePosition::new(last_line as u32, last_column),
		)
	}
}
