#![allow(clippy::unwrap_used, clippy::expect_used)]

use typeslice::{Analysis, AnalysisConfig, Error, ParseErrorPolicy};

use crate::helpers::corpus_helpers::TestCorpus;

#[test]
fn test_missing_root_is_fatal() {
    let corpus = TestCorpus::new(&[]);
    let missing = corpus.root().join("missing");
    let err = Analysis::load(&missing, AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, Error::RootNotFound { ref path } if *path == missing));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_syntax_error_aborts_without_output() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "class A { B b; }"),
        ("B.cs", "class B { void Run( }"),
    ]);
    let err = Analysis::load(corpus.root(), AnalysisConfig::default()).unwrap_err();
    match err {
        Error::Parse { path, errors } => {
            assert!(path.ends_with("B.cs"));
            assert!(!errors.is_empty());
        }
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn test_skip_policy_drops_the_broken_unit() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "class A { B b; }"),
        ("B.cs", "class B { void Run( }"),
    ]);
    let config = AnalysisConfig::default().with_parse_errors(ParseErrorPolicy::Skip);
    let analysis = corpus.analysis_with(config);
    assert_eq!(analysis.corpus().len(), 1);

    // B is no longer declared anywhere, so it does not resolve
    let closure = analysis.closure_of_type("A").unwrap();
    assert_eq!(closure.sorted_keys(), vec!["A"]);
}

#[test]
fn test_unit_limit_aborts() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "class A { B b; }"),
        ("B.cs", "class B { C c; }"),
        ("C.cs", "class C { }"),
    ]);
    let analysis = corpus.analysis_with(AnalysisConfig::default().with_max_units(2));
    let err = analysis.closure_of_type("A").unwrap_err();
    assert!(matches!(err, Error::UnitLimitExceeded { limit: 2 }));

    let analysis = corpus.analysis_with(AnalysisConfig::default().with_max_units(3));
    assert_eq!(analysis.closure_of_type("A").unwrap().len(), 3);
}

#[test]
fn test_unknown_unit_selector() {
    let corpus = TestCorpus::new(&[("a/Order.cs", "class A { }"), ("b/Order.cs", "class B { }")]);
    let analysis = corpus.analysis();

    match analysis.closure_of_unit("Order.cs") {
        Err(Error::UnitNotFound { candidates, .. }) => assert_eq!(candidates.len(), 2),
        other => panic!("expected ambiguous selector, got {other:?}"),
    }
    assert!(matches!(
        analysis.closure_of_unit("Missing.cs"),
        Err(Error::UnitNotFound { .. })
    ));
    assert_eq!(
        analysis.closure_of_unit("a/Order.cs").unwrap().sorted_keys(),
        vec!["A"]
    );
}
