//! Core types for annotation work: positions, line ranges, and future aliases.

/// Async future aliases.
pub mod future;
/// Line/column positions and inclusive line ranges.
pub mod line;

pub use future::BoxFutureStatic;
pub use line::{LinePosition, LineRange};
