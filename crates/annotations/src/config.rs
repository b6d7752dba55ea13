//! Engine configuration.

use lsp_types::SymbolKind;
use serde::Deserialize;

use crate::symbol::ELIGIBLE_KINDS;

/// Configuration for annotation production.
///
/// Deserializable so the host tool can splice it out of its own settings
/// tree; every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AnnotationConfig {
	/// Emit a companion "view file history" placeholder per declaration.
	pub include_history: bool,
	/// Override of the symbol kinds that receive annotations.
	///
	/// `None` uses the built-in declaration kinds.
	pub eligible_kinds: Option<Vec<SymbolKind>>,
}

impl Default for AnnotationConfig {
	fn default() -> Self {
		Self {
			include_history: true,
			eligible_kinds: None,
		}
	}
}

impl AnnotationConfig {
	/// Returns true if a symbol of this kind gets its own annotation.
	pub fn is_eligible(&self, kind: SymbolKind) -> bool {
		match &self.eligible_kinds {
			Some(kinds) => kinds.contains(&kind),
			None => ELIGIBLE_KINDS.contains(&kind),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_eligibility() {
		let config = AnnotationConfig::default();
		assert!(config.include_history);
		assert!(config.is_eligible(SymbolKind::FUNCTION));
		assert!(config.is_eligible(SymbolKind::STRUCT));
		assert!(config.is_eligible(SymbolKind::FIELD));
		assert!(!config.is_eligible(SymbolKind::VARIABLE));
		assert!(!config.is_eligible(SymbolKind::STRING));
	}

	#[test]
	fn test_eligible_kinds_override() {
		let config = AnnotationConfig {
			eligible_kinds: Some(vec![SymbolKind::FUNCTION]),
			..AnnotationConfig::default()
		};
		assert!(config.is_eligible(SymbolKind::FUNCTION));
		assert!(!config.is_eligible(SymbolKind::STRUCT));
	}

	#[test]
	fn test_deserialize_with_defaults() {
		let config: AnnotationConfig = serde_json::from_str("{}").expect("parse");
		assert!(config.include_history);
		assert!(config.eligible_kinds.is_none());

		let config: AnnotationConfig =
			serde_json::from_str(r#"{"include-history": false}"#).expect("parse");
		assert!(!config.include_history);
	}
}
