//! In-memory services and fixture builders shared by unit tests.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use lsp_types::SymbolKind;
use patina_primitives::{LinePosition, LineRange};

use crate::config::AnnotationConfig;
use crate::provider::AnnotationProvider;
use crate::record::{LineRecord, RevisionId};
use crate::source::{BlameSource, SymbolSource};
use crate::symbol::SourceSymbol;

pub(crate) fn record(rev: &str, ts: i64, current_line: u32, original_line: u32) -> LineRecord {
	LineRecord {
		revision: RevisionId::new(rev),
		author: format!("author-{rev}"),
		timestamp: DateTime::from_timestamp(ts, 0).expect("valid timestamp"),
		original_line,
		current_line,
	}
}

pub(crate) fn symbol(name: &str, kind: SymbolKind, start_line: u32, end_line: u32) -> SourceSymbol {
	SourceSymbol::new(
		name,
		kind,
		LineRange::new(LinePosition::new(start_line, 0), LinePosition::new(end_line, 1)),
	)
}

pub(crate) struct MemoryBlame {
	records: Vec<LineRecord>,
	pub(crate) calls: AtomicUsize,
	fail_with: Option<String>,
	delay: Option<Duration>,
}

impl MemoryBlame {
	pub(crate) fn new(records: Vec<LineRecord>) -> Self {
		Self {
			records,
			calls: AtomicUsize::new(0),
			fail_with: None,
			delay: None,
		}
	}

	pub(crate) fn failing(message: &str) -> Self {
		Self {
			fail_with: Some(message.to_string()),
			..Self::new(Vec::new())
		}
	}

	pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}
}

#[async_trait]
impl BlameSource for MemoryBlame {
	async fn line_records(&self, _path: &Path) -> anyhow::Result<Vec<LineRecord>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		match &self.fail_with {
			Some(message) => Err(anyhow::anyhow!("{message}")),
			None => Ok(self.records.clone()),
		}
	}
}

pub(crate) struct MemorySymbols {
	symbols: Vec<SourceSymbol>,
	fail_with: Option<String>,
}

impl MemorySymbols {
	pub(crate) fn new(symbols: Vec<SourceSymbol>) -> Self {
		Self { symbols, fail_with: None }
	}

	pub(crate) fn empty() -> Self {
		Self::new(Vec::new())
	}

	pub(crate) fn failing(message: &str) -> Self {
		Self {
			symbols: Vec::new(),
			fail_with: Some(message.to_string()),
		}
	}
}

#[async_trait]
impl SymbolSource for MemorySymbols {
	async fn symbols(&self, _path: &Path) -> anyhow::Result<Vec<SourceSymbol>> {
		match &self.fail_with {
			Some(message) => Err(anyhow::anyhow!("{message}")),
			None => Ok(self.symbols.clone()),
		}
	}
}

pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub(crate) fn provider_with(
	blame: MemoryBlame,
	symbols: MemorySymbols,
	config: AnnotationConfig,
) -> AnnotationProvider {
	init_tracing();
	AnnotationProvider::new("/repo", Arc::new(blame), Arc::new(symbols), config)
}
