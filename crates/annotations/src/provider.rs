//! Annotation placeholder production.

use std::path::PathBuf;
use std::sync::Arc;

use patina_primitives::{LinePosition, LineRange};

use crate::config::AnnotationConfig;
use crate::document::DocumentView;
use crate::error::{AnnotationError, Result};
use crate::fetch::{BlameFetcher, SharedBlame};
use crate::source::{BlameSource, SymbolSource};
use crate::symbol::SourceSymbol;

/// An unresolved annotation slot for one declaration.
///
/// Variants carry only the fields their resolution needs; both resolve
/// through [`AnnotationProvider::resolve`].
#[derive(Debug, Clone)]
pub enum Placeholder {
	/// Authorship summary backed by the file's blame data.
	Blame(BlamePlaceholder),
	/// Companion "view file history" action; carries no blame data and
	/// resolves trivially.
	History(HistoryPlaceholder),
}

impl Placeholder {
	/// Range the placeholder annotates.
	pub fn range(&self) -> LineRange {
		match self {
			Placeholder::Blame(p) => p.range,
			Placeholder::History(p) => p.range,
		}
	}
}

/// Placeholder for a blame-backed annotation.
#[derive(Debug, Clone)]
pub struct BlamePlaceholder {
	/// Annotated range: anchored at the declaration line's first
	/// non-blank column, spanning the full declared range.
	pub range: LineRange,
	/// File the annotation belongs to.
	pub file_path: PathBuf,
	/// Repository the file belongs to.
	pub repo_path: PathBuf,
	/// Deferred handle to the file's full record sequence, shared with
	/// every other placeholder of the same file.
	pub(crate) pending: SharedBlame,
}

/// Placeholder for the trivial history action.
#[derive(Debug, Clone)]
pub struct HistoryPlaceholder {
	/// Range of the declaration the action is offered for.
	pub range: LineRange,
	/// File whose history the action opens.
	pub file_path: PathBuf,
}

/// Produces annotation placeholders for the documents of one repository.
pub struct AnnotationProvider {
	repo_path: PathBuf,
	config: AnnotationConfig,
	fetcher: BlameFetcher,
	symbols: Arc<dyn SymbolSource>,
}

impl AnnotationProvider {
	/// Creates a provider rooted at a repository.
	pub fn new(
		repo_path: impl Into<PathBuf>,
		blame: Arc<dyn BlameSource>,
		symbols: Arc<dyn SymbolSource>,
		config: AnnotationConfig,
	) -> Self {
		Self {
			repo_path: repo_path.into(),
			config,
			fetcher: BlameFetcher::new(blame),
			symbols,
		}
	}

	/// Produces one placeholder per eligible declaration, plus a
	/// whole-document fallback when nothing covers the document start.
	///
	/// The file's blame fetch is started (or joined) immediately on a
	/// detached task and shared by every produced placeholder; the
	/// returned list never waits for it. Annotation-data problems never
	/// fail this call; they surface per placeholder at resolve time.
	///
	/// Must be called from within a Tokio runtime.
	pub fn provide(&self, document: DocumentView<'_>, symbols: &[SourceSymbol]) -> Vec<Placeholder> {
		let pending = self.fetcher.fetch(document.path);
		let mut placeholders = Vec::new();

		for symbol in symbols {
			if !self.config.is_eligible(symbol.kind) {
				continue;
			}
			let anchor = LinePosition::new(
				symbol.range.start.line,
				document.first_non_blank_column(symbol.range.start.line),
			);
			let range = symbol.range.with_start(anchor);
			placeholders.push(Placeholder::Blame(BlamePlaceholder {
				range,
				file_path: document.path.to_path_buf(),
				repo_path: self.repo_path.clone(),
				pending: pending.clone(),
			}));
			if self.config.include_history {
				placeholders.push(Placeholder::History(HistoryPlaceholder {
					range,
					file_path: document.path.to_path_buf(),
				}));
			}
		}

		if !placeholders.iter().any(|p| p.range().start == LinePosition::ZERO) {
			placeholders.push(Placeholder::Blame(BlamePlaceholder {
				range: document.full_range(),
				file_path: document.path.to_path_buf(),
				repo_path: self.repo_path.clone(),
				pending,
			}));
		}

		tracing::debug!(
			path = %document.path.display(),
			count = placeholders.len(),
			"provided annotation placeholders"
		);
		placeholders
	}

	/// Fetches the document's outline and produces its placeholders.
	///
	/// The blame fetch runs concurrently with the outline request. A
	/// symbol-service failure is the only way this returns an error; it
	/// is the caller's signal that no declaration list exists at all.
	pub async fn annotate(&self, document: DocumentView<'_>) -> Result<Vec<Placeholder>> {
		// Held across the outline request so `provide` joins this fetch
		// instead of starting a second one.
		let _pending = self.fetcher.fetch(document.path);
		let symbols = self.symbols.symbols(document.path).await.map_err(|err| {
			AnnotationError::UpstreamFetch {
				path: document.path.to_path_buf(),
				message: format!("{err:#}"),
			}
		})?;
		Ok(self.provide(document, &symbols))
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use lsp_types::SymbolKind;
	use ropey::Rope;

	use super::*;
	use crate::testutil::{MemoryBlame, MemorySymbols, provider_with, record, symbol};

	fn doc_text() -> Rope {
		Rope::from_str("mod top {\n    fn inner() {\n        body\n    }\n}\nconst X: u8 = 0;\n")
	}

	#[tokio::test]
	async fn test_eligible_symbols_get_blame_and_history() {
		let provider = provider_with(
			MemoryBlame::new(vec![record("a", 10, 0, 0)]),
			MemorySymbols::empty(),
			AnnotationConfig::default(),
		);
		let text = doc_text();
		let doc = DocumentView::new(Path::new("f.rs"), &text);
		let symbols = vec![
			symbol("top", SymbolKind::MODULE, 0, 4),
			symbol("inner", SymbolKind::FUNCTION, 1, 3),
		];

		let placeholders = provider.provide(doc, &symbols);

		// Two eligible symbols, each with a blame and a history
		// placeholder; "top" starts at (0,0) so no fallback is added.
		assert_eq!(placeholders.len(), 4);
		assert!(matches!(placeholders[0], Placeholder::Blame(_)));
		assert!(matches!(placeholders[1], Placeholder::History(_)));
	}

	#[tokio::test]
	async fn test_ineligible_kinds_are_skipped() {
		let provider = provider_with(
			MemoryBlame::new(vec![record("a", 10, 0, 0)]),
			MemorySymbols::empty(),
			AnnotationConfig { include_history: false, ..AnnotationConfig::default() },
		);
		let text = doc_text();
		let doc = DocumentView::new(Path::new("f.rs"), &text);
		let symbols = vec![
			symbol("top", SymbolKind::MODULE, 0, 4),
			symbol("x", SymbolKind::VARIABLE, 5, 5),
			symbol("s", SymbolKind::STRING, 5, 5),
		];

		let placeholders = provider.provide(doc, &symbols);
		assert_eq!(placeholders.len(), 1);
		assert_eq!(placeholders[0].range().start, LinePosition::ZERO);
	}

	#[tokio::test]
	async fn test_fallback_on_empty_symbol_list() {
		let provider = provider_with(
			MemoryBlame::new(vec![record("a", 10, 0, 0)]),
			MemorySymbols::empty(),
			AnnotationConfig::default(),
		);
		let text = doc_text();
		let doc = DocumentView::new(Path::new("f.rs"), &text);

		let placeholders = provider.provide(doc, &[]);

		// Exactly one whole-document fallback, no history twin.
		assert_eq!(placeholders.len(), 1);
		match &placeholders[0] {
			Placeholder::Blame(p) => {
				assert_eq!(p.range.start, LinePosition::ZERO);
				assert_eq!(p.range.end.line, 6);
			}
			other => panic!("expected blame fallback, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_fallback_added_when_no_symbol_covers_origin() {
		let provider = provider_with(
			MemoryBlame::new(vec![record("a", 10, 0, 0)]),
			MemorySymbols::empty(),
			AnnotationConfig { include_history: false, ..AnnotationConfig::default() },
		);
		let text = doc_text();
		let doc = DocumentView::new(Path::new("f.rs"), &text);
		// Indented symbol on line 1: anchor column is 4, not (0,0).
		let symbols = vec![symbol("inner", SymbolKind::FUNCTION, 1, 3)];

		let placeholders = provider.provide(doc, &symbols);

		assert_eq!(placeholders.len(), 2);
		assert_eq!(placeholders[0].range().start, LinePosition::new(1, 4));
		assert_eq!(placeholders[1].range().start, LinePosition::ZERO);
	}

	#[tokio::test]
	async fn test_anchor_uses_first_non_blank_column() {
		let provider = provider_with(
			MemoryBlame::new(vec![record("a", 10, 0, 0)]),
			MemorySymbols::empty(),
			AnnotationConfig { include_history: false, ..AnnotationConfig::default() },
		);
		let text = doc_text();
		let doc = DocumentView::new(Path::new("f.rs"), &text);
		let symbols = vec![symbol("top", SymbolKind::MODULE, 0, 4)];

		let placeholders = provider.provide(doc, &symbols);
		let range = placeholders[0].range();
		assert_eq!(range.start, LinePosition::new(0, 0));
		// The full declared range survives the anchor shift.
		assert_eq!(range.end.line, 4);
	}

	#[tokio::test]
	async fn test_annotate_uses_symbol_source() {
		let provider = provider_with(
			MemoryBlame::new(vec![record("a", 10, 0, 0)]),
			MemorySymbols::new(vec![symbol("top", SymbolKind::MODULE, 0, 4)]),
			AnnotationConfig { include_history: false, ..AnnotationConfig::default() },
		);
		let text = doc_text();
		let doc = DocumentView::new(Path::new("f.rs"), &text);

		let placeholders = provider.annotate(doc).await.expect("annotate");
		assert_eq!(placeholders.len(), 1);
	}

	#[tokio::test]
	async fn test_annotate_surfaces_symbol_failure() {
		let provider = provider_with(
			MemoryBlame::new(vec![record("a", 10, 0, 0)]),
			MemorySymbols::failing("outline unavailable"),
			AnnotationConfig::default(),
		);
		let text = doc_text();
		let doc = DocumentView::new(Path::new("f.rs"), &text);

		let err = provider.annotate(doc).await.expect_err("must fail");
		match err {
			AnnotationError::UpstreamFetch { message, .. } => {
				assert!(message.contains("outline unavailable"));
			}
			other => panic!("unexpected error {other:?}"),
		}
	}
}
