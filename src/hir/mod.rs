//! High-level IR (HIR) - the semantic model over parsed units.
//!
//! ## Key Types
//!
//! - [`Symbol`]: A resolved entity identified by its canonical key
//! - [`TypeIndex`]: Corpus-wide index of named types and namespaces
//! - [`Catalog`]: Types that exist outside the corpus
//! - [`SemanticOracle`]: The binding interface the closure engine uses
//! - [`CorpusOracle`]: Binder implementing the language's scoping rules
//!
//! ## Layers
//!
//! ```text
//! SourceFile (per unit) ──┐
//!                         ├──► TypeIndex ──► CorpusOracle ──► resolve(name)
//! Catalog (core + files) ─┘
//! ```

mod catalog;
mod index;
mod normalize;
mod oracle;
mod symbol;

pub use catalog::{Catalog, CatalogEntry};
pub use index::{TypeEntry, TypeIdx, TypeIndex, namespace_path, type_decl_key};
pub use normalize::normalize;
pub use oracle::{CorpusOracle, SemanticOracle};
pub use symbol::{
    Declaration, Symbol, SymbolKind, arity_suffix, join_key, key_segment, strip_arity,
};
