#![allow(clippy::unwrap_used, clippy::expect_used)]

use rstest::rstest;

use crate::helpers::closure_assertions::{
    assert_complete, assert_sorted_unique, assert_visits_only_source_units,
};
use crate::helpers::corpus_helpers::{TestCorpus, keys};
use crate::helpers::source_fixtures::SHOP;

#[rstest]
#[case("Order")]
#[case("Shop.Customer")]
#[case("Reporting.SalesReport")]
#[case("Invoice")]
fn test_closure_invariants(#[case] entry: &str) {
    let corpus = TestCorpus::new(SHOP);
    let analysis = corpus.analysis();
    let closure = analysis.closure_of_type(entry).unwrap();

    assert!(!closure.is_empty());
    assert_sorted_unique(&keys(&closure));
    assert_complete(&analysis, &closure);
    assert_visits_only_source_units(&closure);
}

#[test]
fn test_runs_are_deterministic() {
    let corpus = TestCorpus::new(SHOP);
    let first = corpus.analysis();
    let second = corpus.analysis();
    let a = first.closure_of_type("Order").unwrap();
    let b = second.closure_of_type("Order").unwrap();
    assert_eq!(keys(&a), keys(&b));
    assert_eq!(a.visited_units(), b.visited_units());
    assert_eq!(first.reporter().render(&a), second.reporter().render(&b));
}

#[test]
fn test_each_unit_is_visited_once() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "class A { B b; C c; D d; }"),
        ("B.cs", "class B { C c; D d; A a; }"),
        ("C.cs", "class C { D d; B b; }"),
        ("D.cs", "class D { A a; }"),
    ]);
    let closure = corpus.analysis().closure_of_type("A").unwrap();
    let mut visited = closure.visited_units().to_vec();
    let count = visited.len();
    visited.sort();
    visited.dedup();
    assert_eq!(visited.len(), count);
    assert_eq!(count, 4);
}

#[test]
fn test_generic_instantiations_collapse_to_one_key() {
    let corpus = TestCorpus::new(&[(
        "Bag.cs",
        r#"
using System.Collections.Generic;

class Bag
{
    List<int> numbers;
    List<string> words;
    List<Bag> children;
    List<List<Bag>> nested;
    Dictionary<string, List<int>> index;
}
"#,
    )]);
    assert_eq!(
        corpus.closure_keys("Bag"),
        vec![
            "Bag",
            "System.Collections.Generic.Dictionary<,>",
            "System.Collections.Generic.List<>",
        ]
    );
}

#[test]
fn test_generic_overloads_stay_distinct() {
    let corpus = TestCorpus::new(&[
        ("Result.cs", "class Result { } class Result<T> { T value; } class Result<T, E> { E error; }"),
        ("Use.cs", "class Use { Result<int> one; Result<int, string> two; }"),
    ]);
    assert_eq!(
        corpus.closure_keys("Use"),
        vec!["Result<,>", "Result<>", "Use"]
    );
}

#[test]
fn test_externals_are_never_expanded() {
    let corpus = TestCorpus::new(&[
        ("App.cs", "using System; class App { Console console; }"),
        ("Shim.cs", "namespace System { class Shim { App app; } }"),
    ]);
    let analysis = corpus.analysis();
    let closure = analysis.closure_of_type("App").unwrap();
    assert_eq!(keys(&closure), vec!["App", "System.Console"]);
    assert_eq!(closure.visited_units().len(), 1);
}

#[test]
fn test_source_declaration_shadows_catalog_entry() {
    let corpus = TestCorpus::new(&[
        ("App.cs", "using System; class App { Console console; }"),
        ("Console.cs", "namespace System { class Console { Terminal t; } class Terminal { } }"),
    ]);
    let analysis = corpus.analysis();
    let closure = analysis.closure_of_type("App").unwrap();
    assert_eq!(keys(&closure), vec!["App", "System.Console", "System.Terminal"]);
    assert!(closure.get("System.Console").unwrap().is_in_source());
}

#[test]
fn test_partitioned_report_splits_source_and_library_types() {
    let corpus = TestCorpus::new(SHOP);
    let analysis = corpus.analysis();
    let closure = analysis.closure_of_type("Customer").unwrap();
    let text = analysis.reporter().partitioned(true).render(&closure);
    assert_eq!(
        text,
        "# in source\nShop.Address\nShop.Customer\nShop.Entity\n\n# external\nSystem.Guid\n"
    );
}
