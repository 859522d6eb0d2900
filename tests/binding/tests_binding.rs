#![allow(clippy::unwrap_used, clippy::expect_used)]

use rstest::rstest;
use typeslice::{Analysis, SemanticOracle, closure::extract};

use crate::helpers::corpus_helpers::TestCorpus;
use crate::helpers::source_fixtures::SHOP;

/// Key of the first reference spelled `name` in `file`.
fn resolve_in(analysis: &Analysis, file: &str, name: &str) -> Option<String> {
    let unit = analysis.corpus().find_unit(file).expect("unit exists");
    let name_ref = extract(unit)
        .find(|n| n.name() == name)
        .unwrap_or_else(|| panic!("no reference named {name} in {file}"));
    analysis
        .oracle()
        .resolve(&name_ref)
        .map(|symbol| symbol.key().to_string())
}

#[test]
fn test_global_usings_apply_across_files() {
    let corpus = TestCorpus::new(&[
        ("GlobalUsings.cs", "global using System.Text;\nglobal using Shop;"),
        ("Shop/Order.cs", "namespace Shop { class Order { } }"),
        ("App/Program.cs", "namespace App { class Program { StringBuilder sb; Order order; } }"),
    ]);
    let analysis = corpus.analysis();
    assert_eq!(
        resolve_in(&analysis, "Program.cs", "StringBuilder").as_deref(),
        Some("System.Text.StringBuilder")
    );
    assert_eq!(
        resolve_in(&analysis, "Program.cs", "Order").as_deref(),
        Some("Shop.Order")
    );
}

#[test]
fn test_file_usings_do_not_leak() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "using System.Text; class A { StringBuilder sb; }"),
        ("B.cs", "class B { StringBuilder sb; }"),
    ]);
    let analysis = corpus.analysis();
    assert!(resolve_in(&analysis, "A.cs", "StringBuilder").is_some());
    assert_eq!(resolve_in(&analysis, "B.cs", "StringBuilder"), None);
}

#[rstest]
#[case("using static System.Environment; class C { SpecialFolder f; }", "SpecialFolder", "System.Environment.SpecialFolder")]
#[case("using Rx = System.Text.RegularExpressions.Regex; class C { Rx rx; }", "Rx", "System.Text.RegularExpressions.Regex")]
#[case("using System; [Serializable] class C { }", "Serializable", "System.SerializableAttribute")]
#[case("class C { global::System.Uri uri; }", "Uri", "System.Uri")]
#[case("using System.Text; class C { Encoding e; }", "Encoding", "System.Text.Encoding")]
fn test_library_references(#[case] source: &str, #[case] name: &str, #[case] expected: &str) {
    let corpus = TestCorpus::new(&[("C.cs", source)]);
    let analysis = corpus.analysis();
    assert_eq!(resolve_in(&analysis, "C.cs", name).as_deref(), Some(expected));
}

#[test]
fn test_shop_references_bind_across_namespaces() {
    let corpus = TestCorpus::new(SHOP);
    let analysis = corpus.analysis();
    assert_eq!(
        resolve_in(&analysis, "Shop/Order.cs", "Invoice").as_deref(),
        Some("Shop.Billing.Invoice")
    );
    assert_eq!(
        resolve_in(&analysis, "Shop/Order.cs", "Entity").as_deref(),
        Some("Shop.Entity")
    );
    assert_eq!(
        resolve_in(&analysis, "Shop/Order.cs", "List").as_deref(),
        Some("System.Collections.Generic.List<Shop.OrderLine>")
    );
}

#[test]
fn test_type_parameters_do_not_reach_the_closure() {
    let corpus = TestCorpus::new(&[(
        "Repo.cs",
        "class Repository<TEntity> { TEntity Find<TKey>(TKey key) { return default; } }",
    )]);
    let analysis = corpus.analysis();
    assert_eq!(resolve_in(&analysis, "Repo.cs", "TEntity").as_deref(), Some("TEntity"));
    assert_eq!(corpus.closure_keys("Repository"), vec!["Repository<>"]);
}
