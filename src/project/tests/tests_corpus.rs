#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use rstest::rstest;

use crate::base::{Position, UnitId};
use crate::error::Error;
use crate::project::{Corpus, SourceUnit};

fn corpus() -> Corpus {
    Corpus::from_sources([
        ("src/Shop/Order.cs", "namespace Shop { class Order {} }"),
        ("src/Billing/Order.cs", "namespace Billing { class Order {} }"),
        ("src/Shop/Customer.cs", "namespace Shop { class Customer {} }"),
    ])
    .unwrap()
}

#[test]
fn test_units_are_sorted_and_numbered() {
    let corpus = corpus();
    let paths: Vec<_> = corpus.units().iter().map(|u| u.path().to_path_buf()).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("src/Billing/Order.cs"),
            PathBuf::from("src/Shop/Customer.cs"),
            PathBuf::from("src/Shop/Order.cs"),
        ]
    );
    for (idx, unit) in corpus.units().iter().enumerate() {
        assert_eq!(unit.id(), UnitId::new(idx));
        assert_eq!(corpus.unit(unit.id()).map(|u| u.path()), Some(unit.path()));
    }
    assert_eq!(corpus.files().len(), 3);
}

#[rstest]
#[case("src/Shop/Customer.cs", "src/Shop/Customer.cs")]
#[case("./src/Shop/Customer.cs", "src/Shop/Customer.cs")]
#[case("Customer.cs", "src/Shop/Customer.cs")]
#[case("Shop/Order.cs", "src/Shop/Order.cs")]
fn test_find_unit(#[case] selector: &str, #[case] expected: &str) {
    let corpus = corpus();
    let unit = corpus.find_unit(selector).unwrap();
    assert_eq!(unit.path(), PathBuf::from(expected));
}

#[test]
fn test_find_unit_ambiguous_suffix_lists_candidates() {
    let corpus = corpus();
    match corpus.find_unit("Order.cs") {
        Err(Error::UnitNotFound { selector, candidates }) => {
            assert_eq!(selector, "Order.cs");
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[rstest]
#[case("Invoice.cs")]
#[case("der.cs")]
#[case("")]
fn test_find_unit_without_match(#[case] selector: &str) {
    let corpus = corpus();
    assert!(matches!(
        corpus.find_unit(selector),
        Err(Error::UnitNotFound { ref candidates, .. }) if candidates.is_empty()
    ));
}

#[test]
fn test_from_sources_rejects_syntax_errors() {
    let result = Corpus::from_sources([("Good.cs", "class Good {}"), ("Bad.cs", "class Bad {\n  int x\n")]);
    match result {
        Err(Error::Parse { path, errors }) => {
            assert_eq!(path, PathBuf::from("Bad.cs"));
            assert!(!errors.is_empty());
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_source_unit_diagnostics_have_positions() {
    let unit = SourceUnit::parse(
        std::path::Path::new("/corpus"),
        PathBuf::from("/corpus/Bad.cs"),
        "class Bad {\n  int x\n",
    );
    assert!(unit.has_errors());
    assert_eq!(unit.relative_path(), PathBuf::from("Bad.cs"));
    let diagnostics = unit.diagnostics();
    assert!(diagnostics[0].position >= Position::new(1, 0));
}
