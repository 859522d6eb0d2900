//! Corpus-wide index of named types and namespaces.
//!
//! Built once from every parsed unit plus the reference catalogs. Each type
//! is stored under its canonical key; partial declarations of the same type
//! merge into one entry carrying every declaration site.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::catalog::Catalog;
use super::symbol::{Declaration, Symbol, key_segment, strip_arity};
use crate::base::UnitId;
use crate::parser::{AstNode, NamespaceDecl, SourceFile, SyntaxNode, TypeDecl};

/// Index into [`TypeIndex`] entries.
pub type TypeIdx = usize;

/// A named type known to the index.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    key: Arc<str>,
    name: SmolStr,
    arity: usize,
    declarations: Vec<Declaration>,
}

impl TypeEntry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn is_in_source(&self) -> bool {
        self.declarations.iter().any(|d| d.in_source)
    }

    pub fn symbol(&self) -> Symbol {
        Symbol::named_type(
            self.key.clone(),
            self.name.clone(),
            Arc::from(self.declarations.as_slice()),
        )
    }
}

/// Where a type is declared.
enum Container {
    Namespace(String),
    Type(String),
}

#[derive(Debug, Default)]
pub struct TypeIndex {
    /// The single source of truth for all types.
    entries: Vec<TypeEntry>,
    /// Canonical key -> entry (insertion order is declaration order).
    by_key: IndexMap<Arc<str>, TypeIdx>,
    /// Simple name -> entries (may have multiple).
    by_simple_name: FxHashMap<SmolStr, Vec<TypeIdx>>,
    /// Namespace -> types declared directly in it ("" is the global namespace).
    namespace_members: FxHashMap<Arc<str>, Vec<TypeIdx>>,
    /// Type key -> nested types.
    nested_members: FxHashMap<Arc<str>, Vec<TypeIdx>>,
    namespaces: FxHashSet<Arc<str>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every namespace and type declared in a source unit.
    pub fn add_unit(&mut self, unit: UnitId, file: &SourceFile) {
        for ns in file.descendants::<NamespaceDecl>() {
            self.add_namespace(&namespace_path(ns.syntax()));
        }

        for decl in file.type_decls() {
            let (Some(name), Some(key)) = (decl.name(), type_decl_key(&decl)) else {
                continue;
            };
            let container = match decl.ancestor::<TypeDecl>() {
                Some(parent) => match type_decl_key(&parent) {
                    Some(parent_key) => Container::Type(parent_key),
                    None => continue,
                },
                None => Container::Namespace(namespace_path(decl.syntax())),
            };
            let range = decl
                .name_token()
                .map(|t| t.text_range())
                .unwrap_or_else(|| decl.syntax().text_range());
            self.insert(
                key,
                name,
                decl.arity(),
                container,
                Declaration::in_source(unit, range),
            );
        }
    }

    /// Add the types listed in a reference catalog.
    ///
    /// A catalog entry whose key is already declared in source adds nothing:
    /// the source declaration shadows it.
    pub fn add_catalog(&mut self, catalog: &Catalog) {
        for entry in &catalog.entries {
            self.add_namespace(&entry.namespace);
            let mut parent: Option<String> = None;
            for ((name, arity), key) in entry.types.iter().zip(entry.keys()) {
                let container = match parent.take() {
                    Some(parent_key) => Container::Type(parent_key),
                    None => Container::Namespace(entry.namespace.clone()),
                };
                self.insert(
                    key.clone(),
                    name.clone(),
                    *arity,
                    container,
                    Declaration::external(),
                );
                parent = Some(key);
            }
        }
        tracing::debug!(
            source = %catalog.source.display(),
            entries = catalog.len(),
            "indexed reference catalog"
        );
    }

    /// Register a namespace and all of its parents.
    pub fn add_namespace(&mut self, namespace: &str) {
        let mut end = 0;
        for segment in namespace.split('.') {
            end += segment.len();
            if !segment.is_empty() && !self.namespaces.contains(&namespace[..end]) {
                self.namespaces.insert(Arc::from(&namespace[..end]));
            }
            end += 1;
        }
    }

    fn insert(
        &mut self,
        key: String,
        name: SmolStr,
        arity: usize,
        container: Container,
        declaration: Declaration,
    ) {
        if let Some(&idx) = self.by_key.get(key.as_str()) {
            // Partial declarations merge; duplicate catalog entries do not.
            if declaration.in_source {
                self.entries[idx].declarations.push(declaration);
            }
            return;
        }

        let key: Arc<str> = Arc::from(key);
        let idx = self.entries.len();
        self.entries.push(TypeEntry {
            key: key.clone(),
            name: name.clone(),
            arity,
            declarations: vec![declaration],
        });
        self.by_key.insert(key, idx);
        self.by_simple_name.entry(name).or_default().push(idx);
        let members = match container {
            Container::Namespace(ns) => self.namespace_members.entry(Arc::from(ns)),
            Container::Type(parent) => self.nested_members.entry(Arc::from(parent)),
        };
        members.or_default().push(idx);
    }

    pub fn get(&self, key: &str) -> Option<&TypeEntry> {
        self.by_key.get(key).map(|&idx| &self.entries[idx])
    }

    /// A type declared directly in `namespace` ("" for the global namespace).
    pub fn type_in_namespace(&self, namespace: &str, name: &str, arity: usize) -> Option<&TypeEntry> {
        self.find_member(self.namespace_members.get(namespace)?, name, arity)
    }

    /// A type nested directly in the type with key `type_key`.
    pub fn nested_type(&self, type_key: &str, name: &str, arity: usize) -> Option<&TypeEntry> {
        self.find_member(self.nested_members.get(type_key)?, name, arity)
    }

    fn find_member(&self, members: &[TypeIdx], name: &str, arity: usize) -> Option<&TypeEntry> {
        members
            .iter()
            .map(|&idx| &self.entries[idx])
            .find(|e| e.name == name && e.arity == arity)
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        namespace.is_empty() || self.namespaces.contains(namespace)
    }

    /// In-source types whose simple name, canonical key, or key without
    /// arity notation equals `name`, in declaration order.
    pub fn find_by_name(&self, name: &str) -> Vec<&TypeEntry> {
        if !name.contains(['.', '<']) {
            return self
                .by_simple_name
                .get(name)
                .into_iter()
                .flatten()
                .map(|&idx| &self.entries[idx])
                .filter(|e| e.is_in_source())
                .collect();
        }
        self.entries
            .iter()
            .filter(|e| e.is_in_source())
            .filter(|e| &*e.key == name || strip_arity(&e.key) == name)
            .collect()
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Declared names
// ============================================================================

/// Full namespace enclosing `node` (including `node` itself when it is a
/// namespace declaration); "" for the global namespace.
pub fn namespace_path(node: &SyntaxNode) -> String {
    let mut segments: Vec<SmolStr> = Vec::new();
    for ns in node.ancestors().filter_map(NamespaceDecl::cast) {
        segments.extend(ns.name_segments().into_iter().rev());
    }
    segments.reverse();
    segments.join(".")
}

/// Canonical key of a declared type, e.g. `Shop.Outer<>.Inner`.
pub fn type_decl_key(decl: &TypeDecl) -> Option<String> {
    let mut segments = vec![key_segment(&decl.name()?, decl.arity())];
    for ancestor in decl.syntax().ancestors().skip(1) {
        if let Some(outer) = TypeDecl::cast(ancestor.clone()) {
            segments.push(key_segment(&outer.name()?, outer.arity()));
        } else if let Some(ns) = NamespaceDecl::cast(ancestor) {
            segments.extend(ns.name_segments().into_iter().rev().map(|s| s.to_string()));
        }
    }
    segments.reverse();
    Some(segments.join("."))
}
