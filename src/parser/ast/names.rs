use super::*;

// ============================================================================
// Name references
// ============================================================================

ast_node!(NameRef, NAME_REF);

/// What precedes a name in a dotted chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// `global::Name`
    Global,
    /// `Left.Name` where `Left` is itself a name reference
    Name(NameRef),
    /// `expr.Name`, `this.Name`, `x?.Name`, `alias::Name`
    Expression,
}

impl NameRef {
    first_child_method!(type_arg_list, TypeArgList);

    pub fn ident_token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENT)
    }

    /// The referenced identifier, without a verbatim `@`.
    pub fn name(&self) -> SmolStr {
        self.ident_token()
            .map(|t| ident_text(&t))
            .unwrap_or_default()
    }

    /// Number of type arguments written after the name (0 if none).
    pub fn arity(&self) -> usize {
        self.type_arg_list().map(|list| list.arity()).unwrap_or(0)
    }

    pub fn qualifier(&self) -> Option<Qualifier> {
        let prev = prev_significant(SyntaxElement::Node(self.0.clone()))?;
        match prev.kind() {
            SyntaxKind::DOT => match prev_significant(prev) {
                Some(SyntaxElement::Node(node)) => Some(
                    NameRef::cast(node)
                        .map(Qualifier::Name)
                        .unwrap_or(Qualifier::Expression),
                ),
                _ => Some(Qualifier::Expression),
            },
            SyntaxKind::COLON_COLON => match prev_significant(prev) {
                Some(SyntaxElement::Token(t)) if t.text() == "global" => Some(Qualifier::Global),
                _ => Some(Qualifier::Expression),
            },
            SyntaxKind::QUESTION_DOT => Some(Qualifier::Expression),
            _ => None,
        }
    }

    /// Whether this is the final name of an attribute (`Obsolete` in `[System.Obsolete]`).
    pub fn is_attribute_name(&self) -> bool {
        self.0
            .parent()
            .and_then(Attribute::cast)
            .and_then(|attr| attr.name_ref())
            .is_some_and(|last| last == *self)
    }

    /// The using directive this name is part of, if any.
    pub fn using_directive(&self) -> Option<UsingDirective> {
        self.ancestor::<UsingDirective>()
    }
}

// ============================================================================
// Type argument lists
// ============================================================================

ast_node!(TypeArgList, TYPE_ARG_LIST);

impl TypeArgList {
    /// Number of arguments: top-level commas plus one.
    pub fn arity(&self) -> usize {
        let mut depth = 0usize;
        let mut commas = 0;
        for token in significant_tokens(&self.0) {
            match token.kind() {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => depth = depth.saturating_sub(1),
                SyntaxKind::COMMA if depth == 0 => commas += 1,
                _ => {}
            }
        }
        commas + 1
    }

    /// `<>` or `<,>`: the generic definition itself, no arguments given.
    pub fn is_unbound(&self) -> bool {
        self.0.children_with_tokens().all(|e| {
            matches!(
                e.kind(),
                SyntaxKind::LT | SyntaxKind::GT | SyntaxKind::COMMA
            ) || e.kind().is_trivia()
        })
    }

    /// The elements of each argument, split at top-level commas.
    ///
    /// Delimiters and trivia are dropped, so `<A.B, int[]>` yields
    /// `[[A, ., B], [int, [, ]]]`.
    pub fn arguments(&self) -> Vec<Vec<SyntaxElement>> {
        let mut elements: Vec<SyntaxElement> = self
            .0
            .children_with_tokens()
            .filter(|e| !e.kind().is_trivia())
            .collect();
        if elements.first().is_some_and(|e| e.kind() == SyntaxKind::LT) {
            elements.remove(0);
        }
        if elements.last().is_some_and(|e| e.kind() == SyntaxKind::GT) {
            elements.pop();
        }

        let mut args = vec![Vec::new()];
        let mut depth = 0usize;
        for element in elements {
            match element.kind() {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => depth = depth.saturating_sub(1),
                SyntaxKind::COMMA if depth == 0 => {
                    args.push(Vec::new());
                    continue;
                }
                _ => {}
            }
            if let Some(current) = args.last_mut() {
                current.push(element);
            }
        }
        args
    }
}
