//! Symbol identity normalization.

use super::symbol::Symbol;

/// Map a closed generic instantiation to its unbound definition.
///
/// `List<Order>` and `List<Customer>` both become `List<>`, keeping the
/// declarations. Every other symbol passes through unchanged.
pub fn normalize(symbol: Symbol) -> Symbol {
    match symbol.definition_arc() {
        Some(definition) => symbol.with_key(definition),
        None => symbol,
    }
}
