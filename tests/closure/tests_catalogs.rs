#![allow(clippy::unwrap_used, clippy::expect_used)]

use typeslice::{Analysis, AnalysisConfig, Error};

use crate::helpers::corpus_helpers::{TestCorpus, keys};

const APP: &[(&str, &str)] = &[(
    "src/App.cs",
    r#"
using System;
using Newtonsoft.Json;

class App
{
    JsonSerializer serializer;
    Formatting formatting;
    Console console;
}
"#,
)];

#[test]
fn test_reference_catalog_adds_external_types() {
    let corpus = TestCorpus::new(APP);
    corpus.write(
        "refs/json.txt",
        "# Newtonsoft\nNewtonsoft.Json.JsonSerializer\nNewtonsoft.Json.Formatting\n",
    );
    let config = AnalysisConfig::default().with_reference_catalog(corpus.root().join("refs/json.txt"));
    let analysis = corpus.analysis_with(config);
    let closure = analysis.closure_of_type("App").unwrap();
    assert_eq!(
        keys(&closure),
        vec![
            "App",
            "Newtonsoft.Json.Formatting",
            "Newtonsoft.Json.JsonSerializer",
            "System.Console",
        ]
    );
}

#[test]
fn test_without_catalogs_library_types_do_not_resolve() {
    let corpus = TestCorpus::new(APP);
    let analysis = corpus.analysis_with(AnalysisConfig::default().without_core_library());
    let closure = analysis.closure_of_type("App").unwrap();
    assert_eq!(keys(&closure), vec!["App"]);
}

#[test]
fn test_malformed_catalog_is_fatal() {
    let corpus = TestCorpus::new(APP);
    corpus.write("refs/bad.txt", "Newtonsoft.Json.JsonSerializer\nNewtonsoft..Json\n");
    let config = AnalysisConfig::default().with_reference_catalog(corpus.root().join("refs/bad.txt"));
    match Analysis::load(corpus.root(), config) {
        Err(Error::Catalog { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected catalog error, got {other:?}"),
    }
}

#[test]
fn test_missing_catalog_is_fatal() {
    let corpus = TestCorpus::new(APP);
    let config = AnalysisConfig::default().with_reference_catalog(corpus.root().join("refs/none.txt"));
    assert!(matches!(
        Analysis::load(corpus.root(), config),
        Err(Error::CatalogRead { .. })
    ));
}
