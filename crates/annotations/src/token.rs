//! Portable reference tokens for grouped lines.
//!
//! A token encodes everything a downstream viewer needs to recover the
//! exact slice, grouping, and ordering that produced one grouped line,
//! without re-running the algorithm: the repository, the queried range,
//! the canonical revision ordering of the slice, the group's position in
//! that ordering, and the line record itself. The encoding is an internal
//! contract; only round-trip reconstructability is promised.

use std::fmt;
use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use patina_primitives::LineRange;
use serde::{Deserialize, Serialize};

use crate::error::{AnnotationError, Result};
use crate::record::{LineRecord, RevisionId};

/// Payload carried by a [`ReferenceToken`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
	/// Repository the file belongs to.
	pub repo_path: PathBuf,
	/// 1-based recency position of the line's group within the slice.
	pub order_index: u32,
	/// Queried range the slice was taken from.
	pub range: LineRange,
	/// All revision ids present in the slice, in first-encounter order.
	/// Tokens built from different groups of one resolution share this
	/// list, so they agree on a single index space.
	pub revisions: Vec<RevisionId>,
	/// The grouped line itself.
	pub line: LineRecord,
}

/// Opaque, reconstructible pointer to one grouped line's revision context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceToken(String);

impl ReferenceToken {
	/// Encodes a payload into an opaque token.
	pub fn encode(payload: &TokenPayload) -> Self {
		let json = serde_json::to_vec(payload).expect("token payload serializes");
		Self(URL_SAFE_NO_PAD.encode(json))
	}

	/// Decodes a token back into its payload.
	pub fn decode(&self) -> Result<TokenPayload> {
		let bytes = URL_SAFE_NO_PAD
			.decode(self.0.as_bytes())
			.map_err(|err| AnnotationError::MalformedToken(err.to_string()))?;
		serde_json::from_slice(&bytes).map_err(|err| AnnotationError::MalformedToken(err.to_string()))
	}

	/// Raw opaque form, suitable for embedding in a viewer URI.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ReferenceToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
