#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::{Command, Output};

use crate::helpers::corpus_helpers::TestCorpus;

fn typeslice(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_typeslice"))
        .arg(root)
        .args(args)
        .env_remove("TYPESLICE_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("run typeslice")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

#[test]
fn test_file_mode_prints_sorted_keys() {
    let corpus = TestCorpus::new(&[(
        "X.cs",
        "class X { System.String name; Y other; }\nclass Y { }\n",
    )]);
    let output = typeslice(corpus.root(), &["--file", "X.cs"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "System.String\nX\nY\n");
}

#[test]
fn test_type_mode_prints_transitive_closure() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "class A { B b; }"),
        ("B.cs", "using System.Text; class B { StringBuilder c; }"),
        ("Unrelated.cs", "class Unrelated { A a; }"),
    ]);
    let output = typeslice(corpus.root(), &["--type", "A"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "A\nB\nSystem.Text.StringBuilder\n");
}

#[test]
fn test_unknown_type_succeeds_with_no_output() {
    let corpus = TestCorpus::new(&[("A.cs", "class A { }")]);
    let output = typeslice(corpus.root(), &["-t", "Nowhere"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_root_fails_without_output() {
    let corpus = TestCorpus::new(&[]);
    let missing = corpus.root().join("absent");
    let output = typeslice(&missing, &["--type", "A"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn test_syntax_error_fails_without_output() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "class A { B b; }"),
        ("B.cs", "class B {"),
    ]);
    let output = typeslice(corpus.root(), &["--type", "A"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("syntax error"));
}

#[test]
fn test_skip_unparsable_drops_the_broken_unit() {
    let corpus = TestCorpus::new(&[
        ("A.cs", "class A { B b; }"),
        ("B.cs", "class B {"),
    ]);
    let output = typeslice(corpus.root(), &["--type", "A", "--skip-unparsable"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "A\n");
}

#[test]
fn test_entry_is_required() {
    let corpus = TestCorpus::new(&[("A.cs", "class A { }")]);
    let output = typeslice(corpus.root(), &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_json_format_lists_files() {
    let corpus = TestCorpus::new(&[("A.cs", "class A { System.Uri u; }")]);
    let output = typeslice(corpus.root(), &["--type", "A", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json report");
    let entries = value.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["key"], "A");
    assert_eq!(entries[0]["in_source"], true);
    assert_eq!(entries[0]["files"][0], "A.cs");
    assert_eq!(entries[1]["key"], "System.Uri");
    assert_eq!(entries[1]["in_source"], false);
}
