//! Seams to the external blame and symbol services.

use std::path::Path;

use async_trait::async_trait;

use crate::record::LineRecord;
use crate::symbol::SourceSymbol;

/// Asynchronous provider of per-line revision metadata.
///
/// Implemented by the host tool, e.g. by driving `git blame` and parsing
/// its output. The service owns its own timeout policy and error type; a
/// file without revision history (untracked, freshly created) fails with
/// whatever error the service defines, and the engine surfaces that as a
/// per-placeholder resolution failure.
#[async_trait]
pub trait BlameSource: Send + Sync {
	/// Returns one record per current line, ascending by line.
	async fn line_records(&self, path: &Path) -> anyhow::Result<Vec<LineRecord>>;
}

/// Asynchronous provider of a document's structural outline.
///
/// In an LSP-backed editor this is the `textDocument/documentSymbol`
/// response, flattened to the depth the host wants annotated.
#[async_trait]
pub trait SymbolSource: Send + Sync {
	/// Returns the declarations of the document, in document order.
	async fn symbols(&self, path: &Path) -> anyhow::Result<Vec<SourceSymbol>>;
}
