//! Reference catalogs: named types that exist outside the corpus.
//!
//! A catalog lists one fully-qualified type per line:
//!
//! ```text
//! # comment
//! System.String
//! System.Collections.Generic.Dictionary<,>
//! System.Environment+SpecialFolder
//! ```
//!
//! Generic arity is written with `<>` / `<,>`; nested types follow their
//! containing type after `+`. The core library catalog is compiled in.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;

use super::symbol::{join_key, key_segment};
use crate::base::constants::{CATALOG_COMMENT, CATALOG_NESTED_SEPARATOR};
use crate::error::{Error, Result};

const CORE_LIBRARY: &str = include_str!("core_library.txt");
const CORE_LIBRARY_NAME: &str = "<core library>";

/// One catalog line: a namespace and a chain of types, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub namespace: String,
    /// `(name, arity)` of the type and each nested type.
    pub types: Vec<(SmolStr, usize)>,
}

impl CatalogEntry {
    /// Canonical key of each type in the chain, outermost first.
    pub fn keys(&self) -> Vec<String> {
        let mut container = self.namespace.clone();
        self.types
            .iter()
            .map(|(name, arity)| {
                container = join_key(&container, &key_segment(name, *arity));
                container.clone()
            })
            .collect()
    }
}

/// A parsed catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub source: PathBuf,
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The built-in core library catalog.
    pub fn core_library() -> Result<Self> {
        Self::parse(CORE_LIBRARY_NAME, CORE_LIBRARY)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::parse(path, &text)?;
        tracing::debug!(
            path = %path.display(),
            entries = catalog.entries.len(),
            "loaded reference catalog"
        );
        Ok(catalog)
    }

    pub fn parse(source: impl Into<PathBuf>, text: &str) -> Result<Self> {
        let source = source.into();
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw
                .split(CATALOG_COMMENT)
                .next()
                .unwrap_or_default()
                .trim();
            if line.is_empty() {
                continue;
            }
            let entry = parse_entry(line).map_err(|message| Error::catalog(&source, idx + 1, message))?;
            entries.push(entry);
        }
        Ok(Self { source, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(line: &str) -> std::result::Result<CatalogEntry, String> {
    let mut parts = line.split(CATALOG_NESTED_SEPARATOR);
    let qualified = parts.next().unwrap_or_default();

    let mut segments: Vec<&str> = qualified.split('.').collect();
    let outer = segments
        .pop()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("expected a type name in `{line}`"))?;
    for segment in &segments {
        if !is_identifier(segment) {
            return Err(format!("invalid namespace segment `{segment}`"));
        }
    }

    let mut types = vec![parse_type_segment(outer)?];
    for nested in parts {
        types.push(parse_type_segment(nested)?);
    }

    Ok(CatalogEntry {
        namespace: segments.join("."),
        types,
    })
}

/// `Name`, `Name<>`, `Name<,>`, ...
fn parse_type_segment(segment: &str) -> std::result::Result<(SmolStr, usize), String> {
    let (name, arity) = match segment.find('<') {
        Some(idx) => {
            let args = &segment[idx..];
            let inner = args
                .strip_prefix('<')
                .and_then(|s| s.strip_suffix('>'))
                .filter(|s| s.chars().all(|c| c == ','))
                .ok_or_else(|| format!("invalid generic arity in `{segment}`"))?;
            (&segment[..idx], inner.len() + 1)
        }
        None => (segment, 0),
    };
    if !is_identifier(name) {
        return Err(format!("invalid identifier `{name}`"));
    }
    Ok((SmolStr::new(name), arity))
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c == '_' || unicode_ident::is_xid_start(c) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("System.String", "System", "System.String")]
    #[case("System.Collections.Generic.Dictionary<,>", "System.Collections.Generic", "System.Collections.Generic.Dictionary<,>")]
    #[case("System.Environment+SpecialFolder", "System", "System.Environment.SpecialFolder")]
    #[case("Outer<>+Inner", "", "Outer<>.Inner")]
    #[case("  System.Object   # root type", "System", "System.Object")]
    #[case("Zähler.Größe", "Zähler", "Zähler.Größe")]
    fn test_parse_entries(#[case] line: &str, #[case] namespace: &str, #[case] key: &str) {
        let catalog = Catalog::parse("test.txt", line).expect("valid catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries[0].namespace, namespace);
        assert_eq!(catalog.entries[0].keys().last().map(String::as_str), Some(key));
    }

    #[test]
    fn test_nested_entry_keys_every_level() {
        let catalog = Catalog::parse("test.txt", "System.Environment+SpecialFolder").expect("valid");
        assert_eq!(
            catalog.entries[0].keys(),
            vec!["System.Environment", "System.Environment.SpecialFolder"]
        );
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let catalog = Catalog::parse("test.txt", "# header\n\nSystem.Int32\n   \n# end\n")
            .expect("valid catalog");
        assert_eq!(catalog.len(), 1);
    }

    #[rstest]
    #[case("System.List<x>", 1)]
    #[case("System.", 1)]
    #[case("System.1Bad", 1)]
    #[case("System.String\nSystem..Int32", 2)]
    #[case("System.String\nSystem.Outer+", 2)]
    fn test_malformed_entries_report_line(#[case] text: &str, #[case] expected_line: usize) {
        match Catalog::parse("bad.txt", text) {
            Err(Error::Catalog { path, line, .. }) => {
                assert_eq!(path, PathBuf::from("bad.txt"));
                assert_eq!(line, expected_line);
            }
            other => panic!("expected catalog error, got {other:?}"),
        }
    }

    #[test]
    fn test_core_library_parses() {
        let catalog = Catalog::core_library().expect("core library is valid");
        let keys: Vec<_> = catalog.entries.iter().filter_map(|e| e.keys().pop()).collect();
        for expected in [
            "System.Object",
            "System.String",
            "System.Console",
            "System.Collections.Generic.List<>",
            "System.Collections.Generic.Dictionary<,>",
            "System.Threading.Tasks.Task<>",
        ] {
            assert!(keys.iter().any(|k| k == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_load_missing_file_is_catalog_read_error() {
        let err = Catalog::load(Path::new("/nonexistent/refs.txt")).unwrap_err();
        assert!(matches!(err, Error::CatalogRead { .. }));
    }
}
