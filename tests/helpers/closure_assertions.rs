//! Assertions over closure results.

use std::collections::HashSet;

use typeslice::parser::AstNode;
use typeslice::{Analysis, Closure, SemanticOracle, SymbolKind, closure::extract, normalize};

/// Assert the listing holds each key once and is sorted.
pub fn assert_sorted_unique(keys: &[String]) {
    let mut seen = HashSet::new();
    for key in keys {
        assert!(seen.insert(key), "duplicate key {key} in {keys:?}");
    }
    let mut sorted = keys.to_vec();
    sorted.sort();
    assert_eq!(keys, sorted.as_slice(), "keys are not sorted");
}

/// Assert every named type referenced from a visited unit is in the closure.
pub fn assert_complete(analysis: &Analysis, closure: &Closure) {
    let oracle = analysis.oracle();
    for &id in closure.visited_units() {
        let unit = analysis.corpus().unit(id).expect("visited unit exists");
        for name in extract(unit) {
            let Some(symbol) = oracle.resolve(&name) else {
                continue;
            };
            if symbol.kind() != SymbolKind::NamedType {
                continue;
            }
            let symbol = normalize(symbol);
            assert!(
                closure.contains(symbol.key()),
                "{} references {} at {:?} but the closure lacks it",
                unit.path().display(),
                symbol.key(),
                name.syntax().text_range()
            );
        }
    }
}

/// Assert no unit was visited on account of an external symbol only.
pub fn assert_visits_only_source_units(closure: &Closure) {
    let declaring: HashSet<_> = closure.symbols().flat_map(|s| s.source_units()).collect();
    for unit in closure.visited_units() {
        assert!(
            declaring.contains(unit),
            "unit {unit} was visited without an in-source symbol declared there"
        );
    }
}
