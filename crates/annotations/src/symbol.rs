//! Structural symbols supplied by the document outline.

use lsp_types::SymbolKind;
use patina_primitives::{LinePosition, LineRange};

/// A structural declaration reported by the symbol service.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSymbol {
	/// Declared name.
	pub name: String,
	/// Structural kind.
	pub kind: SymbolKind,
	/// Full declared range, body included.
	pub range: LineRange,
}

impl SourceSymbol {
	/// Creates a symbol entry.
	pub fn new(name: impl Into<String>, kind: SymbolKind, range: LineRange) -> Self {
		Self { name: name.into(), kind, range }
	}
}

impl From<&lsp_types::DocumentSymbol> for SourceSymbol {
	/// Converts one outline node. Children are not descended into; the
	/// symbol service decides how deep the outline it hands over goes.
	fn from(symbol: &lsp_types::DocumentSymbol) -> Self {
		Self {
			name: symbol.name.clone(),
			kind: symbol.kind,
			range: range_from_lsp(symbol.range),
		}
	}
}

/// Declaration kinds that receive an annotation placeholder by default.
///
/// `STRUCT` and `NAMESPACE` are the modern outline spellings of "type" and
/// "module"; everything outside this list (variables, strings, operators,
/// ...) produces no placeholder.
pub(crate) const ELIGIBLE_KINDS: &[SymbolKind] = &[
	SymbolKind::PACKAGE,
	SymbolKind::MODULE,
	SymbolKind::NAMESPACE,
	SymbolKind::CLASS,
	SymbolKind::STRUCT,
	SymbolKind::INTERFACE,
	SymbolKind::CONSTRUCTOR,
	SymbolKind::METHOD,
	SymbolKind::PROPERTY,
	SymbolKind::FIELD,
	SymbolKind::FUNCTION,
	SymbolKind::ENUM,
];

/// Converts an LSP range into a line range.
pub fn range_from_lsp(range: lsp_types::Range) -> LineRange {
	LineRange::new(
		LinePosition::new(range.start.line, range.start.character),
		LinePosition::new(range.end.line, range.end.character),
	)
}
