use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::UnitId;
use crate::hir::Symbol;

/// The result of a closure run: every recorded named type, keyed by
/// canonical key, plus the units whose references were extracted.
#[derive(Debug, Clone, Default)]
pub struct Closure {
    /// Insertion order is discovery order; the first resolution wins.
    symbols: IndexMap<Arc<str>, Symbol>,
    visited: Vec<UnitId>,
}

impl Closure {
    /// Record `symbol` unless its key is already present. Returns whether
    /// it was new.
    pub(crate) fn record(&mut self, symbol: Symbol) -> bool {
        let key: Arc<str> = Arc::from(symbol.key());
        if self.symbols.contains_key(&key) {
            return false;
        }
        self.symbols.insert(key, symbol);
        true
    }

    pub(crate) fn mark_visited(&mut self, unit: UnitId) {
        self.visited.push(unit);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.symbols.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Symbol> {
        self.symbols.get(key)
    }

    /// Symbols in discovery order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Units whose references were extracted, in processing order.
    pub fn visited_units(&self) -> &[UnitId] {
        &self.visited
    }

    /// Symbols sorted by key, ascending.
    pub fn sorted(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.symbols.values().collect();
        symbols.sort_by(|a, b| a.key().cmp(b.key()));
        symbols
    }

    pub fn sorted_keys(&self) -> Vec<&str> {
        self.sorted().into_iter().map(Symbol::key).collect()
    }

    /// Sorted symbols split into `(in_source, external)`.
    pub fn partition(&self) -> (Vec<&Symbol>, Vec<&Symbol>) {
        self.sorted().into_iter().partition(|s| s.is_in_source())
    }
}
