use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(usings, UsingDirective);
    children_method!(namespaces, NamespaceDecl);
    descendants_method!(
        type_decls,
        TypeDecl,
        "Get every type declaration in the file, nested ones included, in source order."
    );
    descendants_method!(
        name_refs,
        NameRef,
        "Get every simple-name reference in the file in pre-order."
    );
}

// ============================================================================
// Using directives
// ============================================================================

ast_node!(UsingDirective, USING_DIRECTIVE);

/// What a using directive brings into scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsingKind {
    /// `using System.Text;`
    Namespace,
    /// `using static System.Math;`
    Static,
    /// `using Map = System.Collections.Generic.Dictionary<string, int>;`
    Alias,
}

impl UsingDirective {
    has_token_method!(is_static, STATIC_KW, "using static System.Math;");

    /// `global using ...;` applies to every file of the corpus.
    pub fn is_global(&self) -> bool {
        significant_tokens(&self.0)
            .next()
            .is_some_and(|t| t.kind() == SyntaxKind::IDENT && t.text() == "global")
    }

    /// The alias name of `using Alias = Target;`
    pub fn alias(&self) -> Option<SmolStr> {
        significant_tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .find(|t| {
                next_significant(SyntaxElement::Token(t.clone()))
                    .is_some_and(|e| e.kind() == SyntaxKind::EQ)
            })
            .map(|t| ident_text(&t))
    }

    pub fn kind(&self) -> UsingKind {
        if self.alias().is_some() {
            UsingKind::Alias
        } else if self.is_static() {
            UsingKind::Static
        } else {
            UsingKind::Namespace
        }
    }

    /// The last name of the target chain; resolving it resolves the target.
    pub fn target(&self) -> Option<NameRef> {
        self.0.children().filter_map(NameRef::cast).last()
    }

    /// Dotted text of the target, for diagnostics.
    pub fn target_text(&self) -> String {
        self.0
            .children()
            .filter_map(NameRef::cast)
            .map(|n| n.name().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

// ============================================================================
// Namespaces
// ============================================================================

ast_node!(NamespaceDecl, NAMESPACE_DECL);

impl NamespaceDecl {
    children_method!(usings, UsingDirective);

    /// Segments of the declared name: `namespace A.B` gives `["A", "B"]`.
    pub fn name_segments(&self) -> Vec<SmolStr> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::NAMESPACE_NAME)
            .map(|name| {
                significant_tokens(&name)
                    .filter(|t| t.kind() == SyntaxKind::IDENT)
                    .map(|t| ident_text(&t))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Declared name as written, e.g. `A.B`.
    pub fn name(&self) -> String {
        self.name_segments().join(".")
    }

    /// `namespace A.B;` form, which covers the rest of the file.
    pub fn is_file_scoped(&self) -> bool {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::NAMESPACE_NAME)
            .and_then(|name| next_significant(SyntaxElement::Node(name)))
            .is_some_and(|e| e.kind() == SyntaxKind::SEMICOLON)
    }
}

// ============================================================================
// Type declarations
// ============================================================================

ast_node!(TypeDecl, TYPE_DECL);

/// The declaration keyword of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Record,
    Delegate,
}

impl TypeDecl {
    first_child_method!(type_param_list, TypeParamList);

    /// The keyword that introduced this declaration.
    pub fn kind(&self) -> Option<TypeKind> {
        for token in significant_tokens(&self.0) {
            match token.kind() {
                SyntaxKind::CLASS_KW => return Some(TypeKind::Class),
                SyntaxKind::STRUCT_KW => return Some(TypeKind::Struct),
                SyntaxKind::INTERFACE_KW => return Some(TypeKind::Interface),
                SyntaxKind::ENUM_KW => return Some(TypeKind::Enum),
                SyntaxKind::DELEGATE_KW => return Some(TypeKind::Delegate),
                SyntaxKind::IDENT if token.text() == "record" => return Some(TypeKind::Record),
                _ => {}
            }
        }
        None
    }

    /// The identifier token naming the type.
    pub fn name_token(&self) -> Option<SyntaxToken> {
        let mut after_keyword = false;
        for token in significant_tokens(&self.0) {
            match token.kind() {
                SyntaxKind::CLASS_KW
                | SyntaxKind::STRUCT_KW
                | SyntaxKind::INTERFACE_KW
                | SyntaxKind::ENUM_KW
                | SyntaxKind::DELEGATE_KW => after_keyword = true,
                SyntaxKind::IDENT if after_keyword && !is_global_prefix(&token) => {
                    return Some(token);
                }
                SyntaxKind::IDENT if token.text() == "record" => after_keyword = true,
                _ => {}
            }
        }
        None
    }

    pub fn name(&self) -> Option<SmolStr> {
        self.name_token().map(|t| ident_text(&t))
    }

    /// Names of the declared type parameters, in order.
    pub fn type_params(&self) -> Vec<SmolStr> {
        self.type_param_list()
            .map(|list| list.params().filter_map(|p| p.name()).collect())
            .unwrap_or_default()
    }

    pub fn arity(&self) -> usize {
        self.type_param_list()
            .map(|list| list.params().count())
            .unwrap_or(0)
    }

    pub fn is_partial(&self) -> bool {
        significant_tokens(&self.0)
            .any(|t| t.kind() == SyntaxKind::IDENT && t.text() == "partial")
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::TYPE_BODY)
    }
}

/// `global` in `global::Name`
fn is_global_prefix(token: &SyntaxToken) -> bool {
    token.text() == "global"
        && next_significant(SyntaxElement::Token(token.clone()))
            .is_some_and(|e| e.kind() == SyntaxKind::COLON_COLON)
}

ast_node!(TypeParamList, TYPE_PARAM_LIST);

impl TypeParamList {
    children_method!(params, TypeParam);
}

ast_node!(TypeParam, TYPE_PARAM);

impl TypeParam {
    pub fn name(&self) -> Option<SmolStr> {
        significant_tokens(&self.0)
            .find(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| ident_text(&t))
    }
}

// ============================================================================
// Members
// ============================================================================

ast_node!(MethodDecl, METHOD_DECL);

impl MethodDecl {
    first_child_method!(type_param_list, TypeParamList);

    /// Names of the method's own type parameters.
    pub fn type_params(&self) -> Vec<SmolStr> {
        self.type_param_list()
            .map(|list| list.params().filter_map(|p| p.name()).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Attributes
// ============================================================================

ast_node!(AttributeList, ATTRIBUTE_LIST);

impl AttributeList {
    children_method!(attributes, Attribute);
}

ast_node!(Attribute, ATTRIBUTE);

impl Attribute {
    /// The final name of the attribute, e.g. `Obsolete` in `[System.Obsolete]`.
    pub fn name_ref(&self) -> Option<NameRef> {
        self.0.children().filter_map(NameRef::cast).last()
    }
}
