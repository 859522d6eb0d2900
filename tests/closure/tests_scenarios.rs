#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::corpus_helpers::TestCorpus;
use crate::helpers::source_fixtures::SHOP;

#[test]
fn test_direct_mode_lists_one_unit() {
    let corpus = TestCorpus::new(&[(
        "X.cs",
        r#"
class X
{
    System.String name;
    Y other;
}

class Y { }
"#,
    )]);
    assert_eq!(corpus.unit_keys("X.cs"), vec!["System.String", "X", "Y"]);
}

#[test]
fn test_direct_mode_does_not_follow_references() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "class A { B b; }"),
        ("B.cs", "class B { System.Uri c; }"),
    ]);
    assert_eq!(corpus.unit_keys("A.cs"), vec!["A", "B"]);
}

#[test]
fn test_closure_mode_records_but_does_not_expand_library_types() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "class A { B b; }"),
        ("B.cs", "using System.Text; class B { StringBuilder c; }"),
    ]);
    assert_eq!(
        corpus.closure_keys("A"),
        vec!["A", "B", "System.Text.StringBuilder"]
    );
}

#[test]
fn test_unknown_entry_is_an_empty_success() {
    let corpus = TestCorpus::new(&[("A.cs", "class A { }")]);
    let analysis = corpus.analysis();
    let closure = analysis.closure_of_type("DoesNotExist").unwrap();
    assert!(closure.is_empty());
    assert_eq!(analysis.reporter().render(&closure), "");
}

#[test]
fn test_shop_order_closure() {
    let corpus = TestCorpus::new(SHOP);
    assert_eq!(
        corpus.closure_keys("Order"),
        vec![
            "Shop.Address",
            "Shop.Billing.IPaymentGateway",
            "Shop.Billing.Invoice",
            "Shop.Billing.Receipt",
            "Shop.Customer",
            "Shop.Entity",
            "Shop.Order",
            "Shop.OrderLine",
            "Shop.Product",
            "System.Collections.Generic.IReadOnlyList<>",
            "System.Collections.Generic.List<>",
            "System.DateTime",
            "System.Guid",
            "System.Threading.Tasks.Task<>",
        ]
    );
}

#[test]
fn test_unreferenced_units_stay_out() {
    let corpus = TestCorpus::new(SHOP);
    let keys = corpus.closure_keys("Shop.Customer");
    assert_eq!(
        keys,
        vec!["Shop.Address", "Shop.Customer", "Shop.Entity", "System.Guid"]
    );
}

#[test]
fn test_dependent_closure_contains_dependency_closure() {
    let corpus = TestCorpus::new(SHOP);
    let order = corpus.closure_keys("Order");
    let report = corpus.closure_keys("Reporting.SalesReport");
    for key in &order {
        assert!(report.contains(key), "{key} missing from the report closure");
    }
    assert!(report.contains(&"Reporting.SalesReport".to_string()));
    assert!(report.contains(&"System.Collections.Generic.Dictionary<,>".to_string()));
    assert!(!order.contains(&"Reporting.SalesReport".to_string()));
}

#[test]
fn test_simple_name_seeds_every_match() {
    let corpus = TestCorpus::new(&[
        ("Shop/Order.cs", "namespace Shop { class Order { Line l; } class Line { } }"),
        ("Legacy/Order.cs", "namespace Legacy { class Order { } }"),
    ]);
    assert_eq!(
        corpus.closure_keys("Order"),
        vec!["Legacy.Order", "Shop.Line", "Shop.Order"]
    );
    assert_eq!(corpus.closure_keys("Legacy.Order"), vec!["Legacy.Order"]);
}

#[test]
fn test_partial_class_pulls_in_every_part() {
    let corpus = TestCorpus::new(&[
        ("Order.cs", "namespace Shop { public partial class Order { Customer c; } }"),
        ("Order.Generated.cs", "namespace Shop { partial class Order { Audit a; } }"),
        ("Customer.cs", "namespace Shop { class Customer { } }"),
        ("Audit.cs", "namespace Shop { class Audit { } }"),
    ]);
    assert_eq!(
        corpus.closure_keys("Shop.Order"),
        vec!["Shop.Audit", "Shop.Customer", "Shop.Order"]
    );
}

#[test]
fn test_nested_and_generic_declarations() {
    let corpus = TestCorpus::new(&[(
        "Cache.cs",
        r#"
namespace Infra
{
    public class Cache<TKey, TValue> where TValue : class
    {
        private Entry _head;

        private sealed class Entry
        {
            public TKey Key;
            public TValue Value;
            public Entry Next;
        }
    }

    public class Session
    {
        private Cache<string, Session> _cache;
    }
}
"#,
    )]);
    assert_eq!(
        corpus.closure_keys("Session"),
        vec!["Infra.Cache<,>", "Infra.Cache<,>.Entry", "Infra.Session"]
    );
}

#[test]
fn test_interpolation_holes_are_followed() {
    let corpus = TestCorpus::new(&[
        ("A.cs", r#"class A { string s = $"{B.Name}"; }"#),
        ("B.cs", r#"static class B { public static string Name = ""; }"#),
    ]);
    assert_eq!(corpus.closure_keys("A"), vec!["A", "B"]);
}

#[test]
fn test_byte_order_mark_and_inactive_branches() {
    let corpus = TestCorpus::new(&[
        (
            "A.cs",
            "\u{feff}namespace N\n{\n#if LEGACY\n    class A : Old {\n#else\n    class A : New {\n#endif\n    }\n}\n",
        ),
        ("Old.cs", "namespace N { class Old { } }"),
        ("New.cs", "namespace N { class New { } }"),
    ]);
    assert_eq!(corpus.closure_keys("A"), vec!["N.A", "N.Old"]);
}
