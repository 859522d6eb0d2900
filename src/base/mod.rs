//! Foundation types for typeslice.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`UnitId`] - Dense identifiers for source units in a corpus
//! - [`LineIndex`], [`Position`] - Byte offset to line/column conversion
//! - Domain constants (file extensions, catalog names, env vars)
//!
//! This module has NO dependencies on other typeslice modules.

pub mod constants;
mod position;
mod unit_id;

pub use position::{LineIndex, Position};
pub use unit_id::UnitId;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
