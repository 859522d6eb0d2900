//! Name binding - resolving simple-name references to symbols.
//!
//! The closure engine only talks to the [`SemanticOracle`] trait.
//! [`CorpusOracle`] implements it over a [`TypeIndex`] with the scoping
//! rules of the language:
//!
//! 1. Qualified names bind inside their qualifier (namespace or type).
//! 2. Simple names walk the enclosing scopes, innermost first: method and
//!    type parameters, nested types of enclosing types, then each enclosing
//!    namespace with its using directives, then the global namespace with
//!    the file's usings and every `global using` of the corpus.
//! 3. A name inside a using directive never sees the usings of its own level.

use rowan::NodeOrToken;

use super::index::{TypeIndex, namespace_path, type_decl_key};
use super::symbol::{Declaration, Symbol, SymbolKind, join_key};
use crate::base::constants::{ATTRIBUTE_SUFFIX, predefined_type};
use crate::parser::{
    AstNode, MethodDecl, NameRef, NamespaceDecl, Qualifier, SourceFile, SyntaxElement, SyntaxKind,
    SyntaxNode, TypeDecl, TypeParamList, UsingDirective, UsingKind,
};

/// Answers "what does this name refer to?" for the closure engine.
pub trait SemanticOracle {
    /// The symbol a reference binds to, or `None` for locals, members,
    /// keywords used as names and anything unresolved.
    fn resolve(&self, name: &NameRef) -> Option<Symbol>;

    /// In-source named types matching `name` (simple name, canonical key,
    /// or key without arity), in declaration order.
    fn find_by_name(&self, name: &str) -> Vec<Symbol>;
}

/// The oracle over a whole corpus.
pub struct CorpusOracle<'a> {
    index: &'a TypeIndex,
    /// `global using` directives of every unit, in unit order.
    global_usings: Vec<UsingDirective>,
}

impl<'a> CorpusOracle<'a> {
    pub fn new<'f>(index: &'a TypeIndex, files: impl IntoIterator<Item = &'f SourceFile>) -> Self {
        let global_usings: Vec<_> = files
            .into_iter()
            .flat_map(|file| file.usings().filter(|u| u.is_global()).collect::<Vec<_>>())
            .collect();
        tracing::debug!(global_usings = global_usings.len(), "oracle ready");
        Self {
            index,
            global_usings,
        }
    }

    pub fn index(&self) -> &TypeIndex {
        self.index
    }

    fn resolve_named(&self, name_ref: &NameRef, name: &str) -> Option<Symbol> {
        let arity = name_ref.arity();
        match name_ref.qualifier() {
            Some(Qualifier::Global) => self.lookup_in_namespace("", name, arity),
            Some(Qualifier::Name(qualifier)) => {
                let target = self.resolve(&qualifier)?;
                self.member_of(&target, name, arity)
            }
            Some(Qualifier::Expression) => None,
            None => self.lookup_in_scope(name_ref, name, arity),
        }
    }

    /// A type or namespace member of a resolved qualifier.
    fn member_of(&self, target: &Symbol, name: &str, arity: usize) -> Option<Symbol> {
        match target.kind() {
            SymbolKind::Namespace => self.lookup_in_namespace(target.key(), name, arity),
            SymbolKind::NamedType => {
                let key = target.definition().unwrap_or(target.key());
                self.index.nested_type(key, name, arity).map(|e| e.symbol())
            }
            SymbolKind::TypeParameter => None,
        }
    }

    /// A type declared in `namespace`, else a child namespace.
    fn lookup_in_namespace(&self, namespace: &str, name: &str, arity: usize) -> Option<Symbol> {
        if let Some(entry) = self.index.type_in_namespace(namespace, name, arity) {
            return Some(entry.symbol());
        }
        let child = join_key(namespace, name);
        (arity == 0 && self.index.has_namespace(&child)).then(|| Symbol::namespace(child))
    }

    fn lookup_in_scope(&self, name_ref: &NameRef, name: &str, arity: usize) -> Option<Symbol> {
        // The level whose usings a using directive cannot see.
        let hidden_usings = name_ref
            .using_directive()
            .and_then(|u| u.syntax().parent());

        for scope in name_ref.syntax().ancestors() {
            match scope.kind() {
                SyntaxKind::METHOD_DECL if arity == 0 => {
                    let params = MethodDecl::cast(scope.clone()).and_then(|m| m.type_param_list());
                    if let Some(symbol) = type_parameter(params, name) {
                        return Some(symbol);
                    }
                }
                SyntaxKind::TYPE_DECL => {
                    let Some(decl) = TypeDecl::cast(scope.clone()) else {
                        continue;
                    };
                    if arity == 0 {
                        if let Some(symbol) = type_parameter(decl.type_param_list(), name) {
                            return Some(symbol);
                        }
                    }
                    if let Some(key) = type_decl_key(&decl) {
                        if let Some(entry) = self.index.nested_type(&key, name, arity) {
                            return Some(entry.symbol());
                        }
                    }
                }
                SyntaxKind::NAMESPACE_DECL => {
                    let Some(ns) = NamespaceDecl::cast(scope.clone()) else {
                        continue;
                    };
                    let full = namespace_path(&scope);
                    let parts: Vec<&str> = full.split('.').collect();
                    let own = ns.name_segments().len().min(parts.len());
                    // `namespace A.B` opens A.B, then A.
                    for (depth, end) in (parts.len() - own + 1..=parts.len()).rev().enumerate() {
                        let namespace = parts[..end].join(".");
                        if let Some(symbol) = self.lookup_in_namespace(&namespace, name, arity) {
                            return Some(symbol);
                        }
                        if depth == 0 && hidden_usings.as_ref() != Some(&scope) {
                            let usings: Vec<_> = ns.usings().collect();
                            if let Some(symbol) = self.lookup_in_usings(&usings, name, arity) {
                                return Some(symbol);
                            }
                        }
                    }
                }
                SyntaxKind::SOURCE_FILE => {
                    if let Some(symbol) = self.lookup_in_namespace("", name, arity) {
                        return Some(symbol);
                    }
                    if hidden_usings.as_ref() == Some(&scope) {
                        return None;
                    }
                    let file = SourceFile::cast(scope)?;
                    let usings: Vec<_> = self
                        .global_usings
                        .iter()
                        .cloned()
                        .chain(file.usings().filter(|u| !u.is_global()))
                        .collect();
                    return self.lookup_in_usings(&usings, name, arity);
                }
                _ => {}
            }
        }
        None
    }

    /// Aliases first, then namespace and static imports, each in source order.
    fn lookup_in_usings(&self, usings: &[UsingDirective], name: &str, arity: usize) -> Option<Symbol> {
        if arity == 0 {
            if let Some(using) = usings.iter().find(|u| u.alias().as_deref() == Some(name)) {
                return using.target().and_then(|target| self.resolve(&target));
            }
        }

        usings
            .iter()
            .filter(|u| u.kind() != UsingKind::Alias)
            .find_map(|using| {
                let target = self.resolve(&using.target()?)?;
                match (using.kind(), target.kind()) {
                    (UsingKind::Namespace, SymbolKind::Namespace) => self
                        .index
                        .type_in_namespace(target.key(), name, arity)
                        .map(|e| e.symbol()),
                    (UsingKind::Static, SymbolKind::NamedType) => self.member_of(&target, name, arity),
                    _ => {
                        tracing::trace!(
                            target = %using.target_text(),
                            "using directive target does not fit its kind"
                        );
                        None
                    }
                }
            })
    }

    /// Bind the type arguments written after a generic name.
    fn apply_type_args(&self, name_ref: &NameRef, symbol: Symbol) -> Symbol {
        match name_ref.type_arg_list() {
            Some(list) if symbol.is_named_type() && !list.is_unbound() => {
                let args: Vec<String> = list
                    .arguments()
                    .iter()
                    .map(|arg| self.argument_key(arg))
                    .collect();
                symbol.instantiate(&args)
            }
            _ => symbol,
        }
    }

    /// Render one type argument with its names replaced by their keys.
    fn argument_key(&self, elements: &[SyntaxElement]) -> String {
        let mut out = String::new();
        for (i, element) in elements.iter().enumerate() {
            match element {
                NodeOrToken::Node(node) => match NameRef::cast(node.clone()) {
                    Some(name) => {
                        // A chain is rendered by its last name
                        let continues = elements.get(i + 1).is_some_and(|next| {
                            matches!(next.kind(), SyntaxKind::DOT | SyntaxKind::COLON_COLON)
                        });
                        if continues {
                            continue;
                        }
                        match self.resolve(&name) {
                            Some(symbol) => out.push_str(symbol.key()),
                            None => out.push_str(&compact_text(node)),
                        }
                    }
                    None => out.push_str(&compact_text(node)),
                },
                NodeOrToken::Token(token) => match token.kind() {
                    SyntaxKind::DOT | SyntaxKind::COLON_COLON => {}
                    SyntaxKind::IDENT if token.text() == "global" => {}
                    SyntaxKind::PREDEFINED_TYPE => {
                        out.push_str(predefined_type(token.text()).unwrap_or(token.text()))
                    }
                    _ => out.push_str(token.text()),
                },
            }
        }
        out
    }
}

impl SemanticOracle for CorpusOracle<'_> {
    fn resolve(&self, name_ref: &NameRef) -> Option<Symbol> {
        let name = name_ref.name();
        if name.is_empty() {
            return None;
        }
        let symbol = if name_ref.is_attribute_name() {
            let attribute = format!("{name}{ATTRIBUTE_SUFFIX}");
            self.resolve_named(name_ref, &attribute)
                .or_else(|| self.resolve_named(name_ref, &name))
        } else {
            self.resolve_named(name_ref, &name)
        }?;
        Some(self.apply_type_args(name_ref, symbol))
    }

    fn find_by_name(&self, name: &str) -> Vec<Symbol> {
        self.index
            .find_by_name(name)
            .into_iter()
            .map(|entry| entry.symbol())
            .collect()
    }
}

fn type_parameter(params: Option<TypeParamList>, name: &str) -> Option<Symbol> {
    let param = params?
        .params()
        .find(|p| p.name().as_deref() == Some(name))?;
    Some(Symbol::type_parameter(
        name,
        Declaration {
            unit: None,
            in_source: true,
            range: Some(param.syntax().text_range()),
        },
    ))
}

fn compact_text(node: &SyntaxNode) -> String {
    node.text()
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
