//! # typeslice
//!
//! Transitive named-type dependency closure for C#-style source corpora.
//!
//! Given an entry type, typeslice lists every named type it depends on:
//! in-source types are followed into their declaring files, library types
//! are recorded but never expanded.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! analysis  → Load + index + query facade
//!   ↓
//! closure   → Worklist engine, reference extraction, reporter
//!   ↓
//! hir       → Type index, catalogs, name binding (SemanticOracle)
//!   ↓
//! project   → Corpus loading, parallel parsing
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (UnitId, LineIndex, TextRange, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → project → hir → closure)
// ============================================================================

/// Foundation types: UnitId, positions, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Corpus loading: file discovery and parsing
pub mod project;

/// Type index, reference catalogs and name binding
pub mod hir;

/// Dependency closure engine and reporting
pub mod closure;

mod analysis;
mod config;
mod error;

/// Logging setup for the binary
#[cfg(feature = "cli")]
pub mod tracing_config;

pub use analysis::Analysis;
pub use closure::{Closure, ClosureComputer, Report, ReportFormat, Reporter};
pub use config::{AnalysisConfig, ParseErrorPolicy};
pub use error::{Error, ParseDiagnostic, Result};
pub use hir::{CorpusOracle, SemanticOracle, Symbol, SymbolKind, TypeIndex, normalize};
pub use project::{Corpus, CorpusLoader, SourceUnit};

// Re-export foundation types
pub use base::{LineIndex, Position, TextRange, TextSize, UnitId};
