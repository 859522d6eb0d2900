//! Resolved symbols and their canonical identity keys.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{TextRange, UnitId};

/// What a name resolved to. Only named types take part in the closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    NamedType,
    TypeParameter,
    Namespace,
}

/// Where a symbol is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// The declaring source unit; `None` for catalog entries.
    pub unit: Option<UnitId>,
    pub in_source: bool,
    /// Range of the declared name within the unit.
    pub range: Option<TextRange>,
}

impl Declaration {
    pub fn in_source(unit: UnitId, range: TextRange) -> Self {
        Self {
            unit: Some(unit),
            in_source: true,
            range: Some(range),
        }
    }

    pub fn external() -> Self {
        Self {
            unit: None,
            in_source: false,
            range: None,
        }
    }
}

/// A resolved entity, identified by its canonical key.
///
/// Two symbols with the same key are the same symbol: equality and hashing
/// only look at the key.
#[derive(Debug, Clone)]
pub struct Symbol {
    key: Arc<str>,
    name: SmolStr,
    kind: SymbolKind,
    /// Key of the unbound definition when this is a closed generic instantiation.
    definition: Option<Arc<str>>,
    declarations: Arc<[Declaration]>,
}

impl Symbol {
    pub fn named_type(
        key: impl Into<Arc<str>>,
        name: impl Into<SmolStr>,
        declarations: Arc<[Declaration]>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind: SymbolKind::NamedType,
            definition: None,
            declarations,
        }
    }

    pub fn namespace(key: impl Into<Arc<str>>) -> Self {
        let key = key.into();
        let name = SmolStr::new(key.rsplit('.').next().unwrap_or_default());
        Self {
            key,
            name,
            kind: SymbolKind::Namespace,
            definition: None,
            declarations: Arc::from([]),
        }
    }

    pub fn type_parameter(name: impl Into<SmolStr>, declaration: Declaration) -> Self {
        let name = name.into();
        Self {
            key: Arc::from(name.as_str()),
            name,
            kind: SymbolKind::TypeParameter,
            definition: None,
            declarations: Arc::from([declaration]),
        }
    }

    /// A closed instantiation of this (unbound generic) symbol.
    pub fn instantiate(&self, args: &[String]) -> Self {
        let base = strip_trailing_arity(&self.key);
        Self {
            key: Arc::from(format!("{}<{}>", base, args.join(", "))),
            name: self.name.clone(),
            kind: self.kind,
            definition: Some(self.key.clone()),
            declarations: self.declarations.clone(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn is_named_type(&self) -> bool {
        self.kind == SymbolKind::NamedType
    }

    pub fn is_closed_generic(&self) -> bool {
        self.definition.is_some()
    }

    /// Whether any declaration lives in the analysed corpus.
    pub fn is_in_source(&self) -> bool {
        self.declarations.iter().any(|d| d.in_source)
    }

    /// Units holding in-source declarations, in declaration order.
    pub fn source_units(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.declarations
            .iter()
            .filter(|d| d.in_source)
            .filter_map(|d| d.unit)
    }

    pub(crate) fn with_key(&self, key: Arc<str>) -> Self {
        Self {
            key,
            name: self.name.clone(),
            kind: self.kind,
            definition: None,
            declarations: self.declarations.clone(),
        }
    }

    pub(crate) fn definition_arc(&self) -> Option<Arc<str>> {
        self.definition.clone()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

// ============================================================================
// Key helpers
// ============================================================================

/// Unbound arity notation: `""`, `"<>"`, `"<,>"`, ...
pub fn arity_suffix(arity: usize) -> String {
    match arity {
        0 => String::new(),
        n => format!("<{}>", ",".repeat(n - 1)),
    }
}

/// One key segment: the name followed by its arity notation.
pub fn key_segment(name: &str, arity: usize) -> String {
    format!("{}{}", name, arity_suffix(arity))
}

/// Join a container key (namespace or type, possibly empty) and a segment.
pub fn join_key(container: &str, segment: &str) -> String {
    if container.is_empty() {
        segment.to_string()
    } else {
        format!("{container}.{segment}")
    }
}

/// Drop every generic argument list: `Shop.Outer<>.Inner` becomes `Shop.Outer.Inner`.
pub fn strip_arity(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut depth = 0usize;
    for c in key.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Drop the argument list of the last segment only.
fn strip_trailing_arity(key: &str) -> &str {
    match key.strip_suffix('>') {
        Some(_) => key.rfind('<').map(|idx| &key[..idx]).unwrap_or(key),
        None => key,
    }
}
