//! Recursive descent parser for the declaration language
//!
//! Builds a rowan GreenNode tree from tokens. Declarations (namespaces,
//! using directives, types, member headers) get dedicated nodes; member
//! bodies and initializers are parsed as balanced token runs in which every
//! identifier becomes a `NAME_REF` node. Supports error recovery and
//! produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Identifiers that act as modifiers when another declaration token follows.
const CONTEXTUAL_MODIFIERS: &[&str] = &["partial", "async", "required", "file", "scoped"];

/// Tokens that may follow a type argument list (plus identifiers).
const TYPE_ARG_FOLLOW: &[SyntaxKind] = &[
    SyntaxKind::L_PAREN,
    SyntaxKind::R_PAREN,
    SyntaxKind::R_BRACKET,
    SyntaxKind::R_BRACE,
    SyntaxKind::L_BRACE,
    SyntaxKind::COLON,
    SyntaxKind::SEMICOLON,
    SyntaxKind::COMMA,
    SyntaxKind::DOT,
    SyntaxKind::QUESTION,
    SyntaxKind::QUESTION_DOT,
    SyntaxKind::QUESTION_QUESTION,
    SyntaxKind::EQ_EQ,
    SyntaxKind::BANG_EQ,
    SyntaxKind::PIPE,
    SyntaxKind::CARET,
    SyntaxKind::AMP_AMP,
    SyntaxKind::PIPE_PIPE,
    SyntaxKind::AMP,
    SyntaxKind::L_BRACKET,
    SyntaxKind::GT,
    SyntaxKind::FAT_ARROW,
    SyntaxKind::EQ,
    SyntaxKind::STAR,
    SyntaxKind::IDENT,
];

/// Tokens allowed inside a type argument list.
const TYPE_ARG_CONTENT: &[SyntaxKind] = &[
    SyntaxKind::IDENT,
    SyntaxKind::PREDEFINED_TYPE,
    SyntaxKind::DOT,
    SyntaxKind::COMMA,
    SyntaxKind::COLON_COLON,
    SyntaxKind::QUESTION,
    SyntaxKind::L_BRACKET,
    SyntaxKind::R_BRACKET,
    SyntaxKind::L_PAREN,
    SyntaxKind::R_PAREN,
    SyntaxKind::STAR,
    SyntaxKind::LT,
    SyntaxKind::GT,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Position of the n-th non-trivia token at or after the cursor.
    fn nth_pos(&self, n: usize) -> Option<usize> {
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return Some(idx);
                }
                count += 1;
            }
            idx += 1;
        }
        None
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        self.nth_pos(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    fn nth_text(&self, n: usize) -> &str {
        self.nth_pos(n).map(|idx| self.tokens[idx].text).unwrap_or("")
    }

    fn at_contextual(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.current_text() == text
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", what));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Report an error and wrap the offending token in an ERROR node.
    fn error_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        self.bump();
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Compilation unit and namespaces
    // =========================================================================

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_namespace_members(None);
        self.skip_trivia();
        self.finish_node();
    }

    /// Parse members until `closer` (or EOF when `closer` is None).
    fn parse_namespace_members(&mut self, closer: Option<SyntaxKind>) {
        loop {
            self.skip_trivia();
            if self.at_eof() {
                return;
            }
            if let Some(closer) = closer {
                if self.at(closer) {
                    return;
                }
            }
            self.parse_namespace_member();
        }
    }

    fn parse_namespace_member(&mut self) {
        match self.current_kind() {
            SyntaxKind::USING_KW if self.at_using_directive() => self.parse_using_directive(None),
            SyntaxKind::IDENT
                if self.current_text() == "global" && self.nth(1) == SyntaxKind::USING_KW =>
            {
                let checkpoint = self.builder.checkpoint();
                self.bump();
                self.skip_trivia();
                self.parse_using_directive(Some(checkpoint));
            }
            SyntaxKind::NAMESPACE_KW => self.parse_namespace_decl(),
            SyntaxKind::SEMICOLON => self.bump(),
            SyntaxKind::R_BRACE | SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                self.error_bump("unexpected closing delimiter")
            }
            _ => {
                if !self.parse_declaration() {
                    self.parse_global_statement();
                }
            }
        }
    }

    /// `using (...)` and `using var x = ...;` are statements, not directives.
    fn at_using_directive(&self) -> bool {
        match self.nth(1) {
            SyntaxKind::L_PAREN => false,
            SyntaxKind::IDENT => !(self.nth_text(1) == "var" && self.nth(2) == SyntaxKind::IDENT),
            _ => true,
        }
    }

    /// `global? using static? (Alias =)? Name ;`
    fn parse_using_directive(&mut self, checkpoint: Option<Checkpoint>) {
        match checkpoint {
            Some(cp) => self.start_node_at(cp, SyntaxKind::USING_DIRECTIVE),
            None => self.start_node(SyntaxKind::USING_DIRECTIVE),
        }
        self.bump(); // using
        self.skip_trivia();
        self.eat(SyntaxKind::STATIC_KW);
        self.skip_trivia();
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::EQ {
            self.bump(); // alias name
            self.skip_trivia();
            self.bump(); // =
            self.skip_trivia();
        }
        self.parse_type();
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON, "`;` after using directive");
        self.finish_node();
    }

    /// `namespace A.B { ... }` or file-scoped `namespace A.B;`
    fn parse_namespace_decl(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_DECL);
        self.bump(); // namespace
        self.skip_trivia();

        self.start_node(SyntaxKind::NAMESPACE_NAME);
        if !self.expect(SyntaxKind::IDENT, "namespace name") {
            self.finish_node();
            self.finish_node();
            return;
        }
        while self.nth(0) == SyntaxKind::DOT {
            self.skip_trivia();
            self.bump(); // .
            self.skip_trivia();
            self.expect(SyntaxKind::IDENT, "namespace name segment");
        }
        self.finish_node();
        self.skip_trivia();

        if self.eat(SyntaxKind::SEMICOLON) {
            // File-scoped: the rest of the file belongs to this namespace
            self.parse_namespace_members(None);
        } else if self.eat(SyntaxKind::L_BRACE) {
            self.parse_namespace_members(Some(SyntaxKind::R_BRACE));
            self.skip_trivia();
            self.expect(SyntaxKind::R_BRACE, "`}` to close namespace");
        } else {
            self.error("expected `{` or `;` after namespace name");
        }
        self.finish_node();
    }

    /// Top-level statements and anything else the declaration grammar does
    /// not cover: consumed as a balanced run up to `;` or a block.
    fn parse_global_statement(&mut self) {
        self.start_node(SyntaxKind::GLOBAL_STATEMENT);
        self.parse_member_tail();
        self.finish_node();
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Parse a type or member declaration with its attributes and modifiers.
    ///
    /// Returns false (without consuming anything) if the cursor is not at a
    /// declaration that can appear in a namespace.
    fn parse_declaration(&mut self) -> bool {
        let checkpoint = self.builder.checkpoint();
        let has_prefix = self.parse_attributes_and_modifiers();

        if self.at_type_keyword() {
            self.parse_type_decl(checkpoint);
            true
        } else if self.at(SyntaxKind::DELEGATE_KW) && self.nth(1) != SyntaxKind::L_PAREN {
            self.parse_delegate_decl(checkpoint);
            true
        } else if has_prefix && self.at_prefix_end() {
            // Assembly-level attributes or dangling modifiers
            self.start_node_at(checkpoint, SyntaxKind::MEMBER_DECL);
            self.finish_node();
            true
        } else if has_prefix {
            self.parse_member_after_prefix(checkpoint);
            true
        } else {
            false
        }
    }

    /// Consume attribute lists and modifiers. Returns true if anything was consumed.
    fn parse_attributes_and_modifiers(&mut self) -> bool {
        let mut consumed = false;
        loop {
            self.skip_trivia();
            if self.at(SyntaxKind::L_BRACKET) {
                self.parse_attribute_list();
            } else if self.current_kind().is_modifier() && !self.at_new_expression() {
                self.bump();
            } else if self.at_contextual_modifier() {
                self.bump();
            } else {
                return consumed;
            }
            consumed = true;
        }
    }

    fn at_prefix_end(&self) -> bool {
        self.at_eof()
            || self.at(SyntaxKind::NAMESPACE_KW)
            || self.at(SyntaxKind::USING_KW)
            || self.at(SyntaxKind::R_BRACE)
    }

    fn at_new_expression(&self) -> bool {
        self.at(SyntaxKind::NEW_KW)
            && matches!(self.nth(1), SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET)
    }

    fn at_contextual_modifier(&self) -> bool {
        if !self.at(SyntaxKind::IDENT) || !CONTEXTUAL_MODIFIERS.contains(&self.current_text()) {
            return false;
        }
        let next = self.nth(1);
        next == SyntaxKind::IDENT
            || next == SyntaxKind::PREDEFINED_TYPE
            || next.is_modifier()
            || matches!(
                next,
                SyntaxKind::CLASS_KW
                    | SyntaxKind::STRUCT_KW
                    | SyntaxKind::INTERFACE_KW
                    | SyntaxKind::ENUM_KW
                    | SyntaxKind::DELEGATE_KW
            )
    }

    fn at_type_keyword(&self) -> bool {
        match self.current_kind() {
            SyntaxKind::CLASS_KW
            | SyntaxKind::STRUCT_KW
            | SyntaxKind::INTERFACE_KW
            | SyntaxKind::ENUM_KW => !self.at_eof(),
            SyntaxKind::IDENT if self.current_text() == "record" => matches!(
                self.nth(1),
                SyntaxKind::IDENT | SyntaxKind::CLASS_KW | SyntaxKind::STRUCT_KW
            ),
            _ => false,
        }
    }

    /// `[target: Attr(args), Other]`
    fn parse_attribute_list(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE_LIST);
        self.bump(); // [
        self.skip_trivia();
        let kind = self.current_kind();
        if (kind == SyntaxKind::IDENT || kind.is_keyword()) && self.nth(1) == SyntaxKind::COLON {
            self.bump(); // assembly / return / field / event ...
            self.skip_trivia();
            self.bump(); // :
        }
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACKET) {
                break;
            }
            if self.eat(SyntaxKind::COMMA) {
                continue;
            }
            if self.at(SyntaxKind::IDENT) {
                self.parse_attribute();
            } else {
                self.error_bump("expected attribute name");
            }
        }
        self.expect(SyntaxKind::R_BRACKET, "`]` to close attribute list");
        self.finish_node();
    }

    fn parse_attribute(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE);
        self.parse_qualified_name();
        self.skip_trivia();
        if self.at(SyntaxKind::L_PAREN) {
            self.start_node(SyntaxKind::ATTRIBUTE_ARGS);
            self.parse_group();
            self.finish_node();
        }
        self.finish_node();
    }

    /// `class Name<T> (params)? : Bases where T : C { members }`
    fn parse_type_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::TYPE_DECL);
        let is_enum = self.at(SyntaxKind::ENUM_KW);
        if self.at_contextual("record") {
            self.bump();
            self.skip_trivia();
            if self.at(SyntaxKind::CLASS_KW) || self.at(SyntaxKind::STRUCT_KW) {
                self.bump();
            }
        } else {
            self.bump(); // class / struct / interface / enum
        }
        self.skip_trivia();

        if !self.expect(SyntaxKind::IDENT, "type name") {
            self.recover_declaration();
            self.finish_node();
            return;
        }
        self.skip_trivia();
        if self.at(SyntaxKind::LT) {
            self.parse_type_param_list();
            self.skip_trivia();
        }
        if self.at(SyntaxKind::L_PAREN) {
            // record / primary constructor parameters
            self.parse_group();
            self.skip_trivia();
        }
        if self.at(SyntaxKind::COLON) {
            self.start_node(SyntaxKind::BASE_LIST);
            self.bump();
            self.parse_run_until(|p| {
                p.at(SyntaxKind::L_BRACE) || p.at(SyntaxKind::SEMICOLON) || p.at_contextual("where")
            });
            self.finish_node();
            self.skip_trivia();
        }
        self.parse_constraint_clauses();
        self.skip_trivia();

        if self.at(SyntaxKind::L_BRACE) {
            self.start_node(SyntaxKind::TYPE_BODY);
            self.bump();
            if is_enum {
                self.parse_enum_members();
            } else {
                self.parse_type_members();
            }
            self.skip_trivia();
            self.expect(SyntaxKind::R_BRACE, "`}` to close type body");
            self.finish_node();
            if self.nth(0) == SyntaxKind::SEMICOLON {
                self.skip_trivia();
                self.bump();
            }
        } else {
            self.expect(SyntaxKind::SEMICOLON, "`{` or `;` after type declaration");
        }
        self.finish_node();
    }

    /// `delegate ReturnType Name<T>(params) where ... ;`
    fn parse_delegate_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::TYPE_DECL);
        self.bump(); // delegate
        self.skip_trivia();
        self.parse_type();
        self.skip_trivia();
        if !self.expect(SyntaxKind::IDENT, "delegate name") {
            self.recover_declaration();
            self.finish_node();
            return;
        }
        self.skip_trivia();
        if self.at(SyntaxKind::LT) {
            self.parse_type_param_list();
            self.skip_trivia();
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_group();
        } else {
            self.error("expected delegate parameter list");
        }
        self.skip_trivia();
        self.parse_constraint_clauses();
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON, "`;` after delegate declaration");
        self.finish_node();
    }

    fn recover_declaration(&mut self) {
        self.parse_run_until(|p| p.at(SyntaxKind::SEMICOLON) || p.at(SyntaxKind::R_BRACE));
        self.eat(SyntaxKind::SEMICOLON);
    }

    /// `<[Attr] in T, out U>`
    fn parse_type_param_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_PARAM_LIST);
        self.bump(); // <
        loop {
            self.skip_trivia();
            if self.at_eof()
                || self.at(SyntaxKind::GT)
                || self.at(SyntaxKind::L_BRACE)
                || self.at(SyntaxKind::SEMICOLON)
                || self.current_kind().is_closing_delimiter()
            {
                break;
            }
            if self.eat(SyntaxKind::COMMA) {
                continue;
            }
            if self.at(SyntaxKind::L_BRACKET) {
                self.parse_attribute_list();
                continue;
            }
            if self.at(SyntaxKind::KEYWORD) && matches!(self.current_text(), "in" | "out") {
                self.bump();
                continue;
            }
            if self.at(SyntaxKind::IDENT) {
                self.start_node(SyntaxKind::TYPE_PARAM);
                self.bump();
                self.finish_node();
            } else {
                self.error_bump("expected type parameter name");
            }
        }
        self.expect(SyntaxKind::GT, "`>` to close type parameter list");
        self.finish_node();
    }

    /// Zero or more `where T : constraints` clauses.
    fn parse_constraint_clauses(&mut self) {
        while self.at_contextual("where") {
            self.start_node(SyntaxKind::CONSTRAINT_CLAUSE);
            self.bump(); // where
            self.parse_run_until(|p| {
                p.at(SyntaxKind::L_BRACE)
                    || p.at(SyntaxKind::SEMICOLON)
                    || p.at(SyntaxKind::FAT_ARROW)
                    || p.at_contextual("where")
            });
            self.finish_node();
            self.skip_trivia();
        }
    }

    fn parse_enum_members(&mut self) {
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                return;
            }
            if self.eat(SyntaxKind::COMMA) {
                continue;
            }
            self.start_node(SyntaxKind::ENUM_MEMBER);
            while self.at(SyntaxKind::L_BRACKET) {
                self.parse_attribute_list();
                self.skip_trivia();
            }
            if self.at(SyntaxKind::IDENT) {
                self.bump();
                self.skip_trivia();
                if self.eat(SyntaxKind::EQ) {
                    self.parse_run_until(|p| p.at(SyntaxKind::COMMA) || p.at(SyntaxKind::R_BRACE));
                }
            } else {
                self.error_bump("expected enum member name");
            }
            self.finish_node();
        }
    }

    fn parse_type_members(&mut self) {
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                return;
            }
            match self.current_kind() {
                SyntaxKind::SEMICOLON => self.bump(),
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                    self.error_bump("unexpected closing delimiter")
                }
                _ => {
                    if !self.parse_declaration() {
                        let checkpoint = self.builder.checkpoint();
                        self.parse_member_after_prefix(checkpoint);
                    }
                }
            }
        }
    }

    /// Parse a member once its attributes and modifiers are consumed.
    fn parse_member_after_prefix(&mut self, checkpoint: Checkpoint) {
        self.skip_trivia();
        match self.current_kind() {
            // Constructor: the name is a declaration, not a reference
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::L_PAREN => {
                self.start_node_at(checkpoint, SyntaxKind::MEMBER_DECL);
                self.bump();
                self.parse_member_tail();
                self.finish_node();
            }
            SyntaxKind::EVENT_KW => {
                self.bump();
                self.skip_trivia();
                if matches!(
                    self.current_kind(),
                    SyntaxKind::IDENT | SyntaxKind::PREDEFINED_TYPE | SyntaxKind::L_PAREN
                ) {
                    self.parse_typed_member(checkpoint);
                } else {
                    self.start_node_at(checkpoint, SyntaxKind::MEMBER_DECL);
                    self.parse_member_tail();
                    self.finish_node();
                }
            }
            SyntaxKind::TILDE
            | SyntaxKind::IMPLICIT_KW
            | SyntaxKind::EXPLICIT_KW
            | SyntaxKind::USING_KW => {
                self.start_node_at(checkpoint, SyntaxKind::MEMBER_DECL);
                self.parse_member_tail();
                self.finish_node();
            }
            SyntaxKind::IDENT | SyntaxKind::PREDEFINED_TYPE | SyntaxKind::L_PAREN => {
                self.parse_typed_member(checkpoint)
            }
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::MEMBER_DECL);
                self.parse_member_tail();
                self.finish_node();
            }
        }
    }

    /// Fields, properties, methods, indexers and operators: `Type Name ...`.
    fn parse_typed_member(&mut self, checkpoint: Checkpoint) {
        self.parse_type();
        self.skip_trivia();

        let mut kind = SyntaxKind::MEMBER_DECL;
        if self.at(SyntaxKind::IDENT) {
            // Explicit interface implementations qualify the member name.
            while self.at(SyntaxKind::IDENT) && self.at_qualified_member_name() {
                self.parse_name_ref();
                self.skip_trivia();
                self.bump(); // .
                self.skip_trivia();
            }
            if self.at(SyntaxKind::IDENT) {
                self.bump(); // member name
                self.skip_trivia();
                if self.at(SyntaxKind::LT) && self.at_type_param_list_then_paren() {
                    self.parse_type_param_list();
                    self.skip_trivia();
                }
                if self.at(SyntaxKind::L_PAREN) {
                    kind = SyntaxKind::METHOD_DECL;
                }
            }
        }
        self.start_node_at(checkpoint, kind);
        self.parse_member_tail();
        self.finish_node();
    }

    /// At `Name .` or `Name<...> .` where the chain continues to a member name.
    fn at_qualified_member_name(&self) -> bool {
        match self.nth(1) {
            SyntaxKind::DOT => true,
            SyntaxKind::LT => match self.nth_pos(1) {
                Some(lt) => self
                    .scan_type_args(lt)
                    .map(|after| self.kind_at_or_after(after) == SyntaxKind::DOT)
                    .unwrap_or(false),
                None => false,
            },
            _ => false,
        }
    }

    /// At `<T, U>(` after a method name.
    fn at_type_param_list_then_paren(&self) -> bool {
        self.scan_type_args(self.pos)
            .map(|after| self.kind_at_or_after(after) == SyntaxKind::L_PAREN)
            .unwrap_or(false)
    }

    // =========================================================================
    // Types and names
    // =========================================================================

    /// A type in declaration position: predefined keyword, qualified name or
    /// tuple, followed by nullable / array / pointer suffixes.
    fn parse_type(&mut self) {
        self.skip_trivia();
        match self.current_kind() {
            SyntaxKind::PREDEFINED_TYPE => self.bump(),
            SyntaxKind::IDENT => self.parse_qualified_name(),
            SyntaxKind::L_PAREN => self.parse_group(),
            _ => {
                self.error("expected type");
                return;
            }
        }
        loop {
            match self.nth(0) {
                SyntaxKind::QUESTION | SyntaxKind::STAR => {
                    self.skip_trivia();
                    self.bump();
                }
                SyntaxKind::L_BRACKET
                    if matches!(self.nth(1), SyntaxKind::R_BRACKET | SyntaxKind::COMMA) =>
                {
                    self.skip_trivia();
                    self.parse_group();
                }
                _ => return,
            }
        }
    }

    /// `global::A.B<C>.D` - each identifier becomes a NAME_REF.
    fn parse_qualified_name(&mut self) {
        if self.at_contextual("global") && self.nth(1) == SyntaxKind::COLON_COLON {
            self.bump();
            self.skip_trivia();
            self.bump(); // ::
            self.skip_trivia();
        }
        if !self.at(SyntaxKind::IDENT) {
            self.error("expected name");
            return;
        }
        self.parse_name_ref();
        while self.nth(0) == SyntaxKind::DOT && self.nth(1) == SyntaxKind::IDENT {
            self.skip_trivia();
            self.bump(); // .
            self.skip_trivia();
            self.parse_name_ref();
        }
    }

    /// A simple name with optional type argument list.
    fn parse_name_ref(&mut self) {
        self.start_node(SyntaxKind::NAME_REF);
        self.bump(); // identifier
        if self.nth(0) == SyntaxKind::LT {
            if let Some(lt) = self.nth_pos(0) {
                if self.scan_type_args(lt).is_some() {
                    self.skip_trivia();
                    self.parse_type_arg_list();
                }
            }
        }
        self.finish_node();
    }

    fn parse_type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_ARG_LIST);
        self.bump(); // <
        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error("expected `>` to close type argument list");
                break;
            }
            if self.eat(SyntaxKind::GT) {
                break;
            }
            self.parse_run_token();
        }
        self.finish_node();
    }

    /// Decide whether the `<` at token index `lt` opens a type argument list.
    ///
    /// Scans to the matching `>` accepting only tokens that can occur in
    /// type arguments, then checks the token that follows. Returns the index
    /// just past the closing `>`.
    fn scan_type_args(&self, lt: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut idx = lt;
        while idx < self.tokens.len() {
            let kind = self.tokens[idx].kind;
            if kind.is_trivia() {
                idx += 1;
                continue;
            }
            if !TYPE_ARG_CONTENT.contains(&kind) {
                return None;
            }
            match kind {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT => {
                    depth -= 1;
                    if depth == 0 {
                        let after = idx + 1;
                        let follow = self.kind_at_or_after(after);
                        let at_end = self.tokens[after..].iter().all(|t| t.kind.is_trivia());
                        return (at_end || TYPE_ARG_FOLLOW.contains(&follow)).then_some(after);
                    }
                }
                _ => {}
            }
            idx += 1;
        }
        None
    }

    /// Kind of the first non-trivia token at or after index `idx`.
    fn kind_at_or_after(&self, idx: usize) -> SyntaxKind {
        self.tokens
            .get(idx..)
            .and_then(|rest| rest.iter().find(|t| !t.kind.is_trivia()))
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    // =========================================================================
    // Balanced token runs
    // =========================================================================

    /// Consume the rest of a member: up to and including `;`, or up to the end
    /// of a body block. Blocks after `=` or `=>` belong to an initializer and
    /// do not end the member; `{ get; } = value;` continues after the block.
    fn parse_member_tail(&mut self) {
        let mut in_initializer = false;
        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error("expected `;` or `}` to end declaration");
                return;
            }
            match self.current_kind() {
                SyntaxKind::SEMICOLON => {
                    self.bump();
                    return;
                }
                SyntaxKind::R_BRACE => {
                    self.error("expected `;`");
                    return;
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                    self.error_bump("unexpected closing delimiter");
                }
                SyntaxKind::EQ | SyntaxKind::FAT_ARROW => {
                    in_initializer = true;
                    self.bump();
                }
                SyntaxKind::IDENT if !in_initializer && self.current_text() == "where" => {
                    self.parse_constraint_clauses();
                }
                SyntaxKind::L_BRACE if !in_initializer => {
                    self.parse_group();
                    if self.nth(0) == SyntaxKind::EQ {
                        continue;
                    }
                    return;
                }
                _ => self.parse_run_token(),
            }
        }
    }

    /// Consume tokens until `stop` matches (at group depth 0) or EOF.
    fn parse_run_until(&mut self, stop: impl Fn(&Self) -> bool) {
        loop {
            self.skip_trivia();
            if self.at_eof() || stop(self) {
                return;
            }
            if self.current_kind().is_closing_delimiter() {
                // Belongs to an enclosing construct
                return;
            }
            self.parse_run_token();
        }
    }

    /// One element of a balanced run: a name, a nested group or a plain token.
    fn parse_run_token(&mut self) {
        match self.current_kind() {
            SyntaxKind::IDENT => {
                if self.current_text() == "global" && self.nth(1) == SyntaxKind::COLON_COLON {
                    self.bump();
                } else {
                    self.parse_name_ref();
                }
            }
            SyntaxKind::INTERP_STRING_START => self.parse_interpolated_string(),
            kind if kind.is_opening_delimiter() => self.parse_group(),
            kind if kind.is_closing_delimiter() => self.error_bump("unexpected closing delimiter"),
            SyntaxKind::ERROR => self.error_bump("unexpected character"),
            _ => self.bump(),
        }
    }

    /// `$"text {expr,align:format} text"`
    fn parse_interpolated_string(&mut self) {
        self.start_node(SyntaxKind::INTERPOLATED_STRING);
        self.bump(); // $"
        loop {
            match self.current_kind() {
                _ if self.at_eof() => {
                    self.error("unterminated interpolated string");
                    break;
                }
                SyntaxKind::INTERP_STRING_END => {
                    self.bump();
                    break;
                }
                SyntaxKind::INTERP_STRING_TEXT => self.bump(),
                SyntaxKind::INTERP_HOLE_OPEN => self.parse_interpolation(),
                _ => {
                    self.error("unterminated interpolated string");
                    break;
                }
            }
        }
        self.finish_node();
    }

    /// One hole: its expression is a balanced run.
    fn parse_interpolation(&mut self) {
        self.start_node(SyntaxKind::INTERPOLATION);
        self.bump(); // {
        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error("expected `}` to close interpolation");
                break;
            }
            match self.current_kind() {
                SyntaxKind::INTERP_HOLE_CLOSE => {
                    self.bump();
                    break;
                }
                SyntaxKind::INTERP_STRING_TEXT => self.bump(),
                SyntaxKind::INTERP_STRING_END => {
                    self.error("expected `}` to close interpolation");
                    break;
                }
                _ => self.parse_run_token(),
            }
        }
        self.finish_node();
    }

    /// `( ... )`, `[ ... ]` or `{ ... }` with balanced contents.
    fn parse_group(&mut self) {
        let open = self.current_kind();
        let Some(close) = open.closing_delimiter() else {
            self.bump();
            return;
        };
        self.bump();
        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error(format!("expected `{}`", delimiter_text(close)));
                return;
            }
            let kind = self.current_kind();
            if kind == close {
                self.bump();
                return;
            }
            if kind.is_closing_delimiter() {
                // Mismatched closer: leave it for an enclosing group
                self.error(format!("expected `{}`", delimiter_text(close)));
                return;
            }
            self.parse_run_token();
        }
    }
}

fn delimiter_text(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::R_PAREN => ")",
        SyntaxKind::R_BRACKET => "]",
        SyntaxKind::R_BRACE => "}",
        _ => "?",
    }
}
