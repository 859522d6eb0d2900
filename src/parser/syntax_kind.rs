//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree of
//! the declaration language: namespaces, using directives, type declarations
//! and members. Member bodies are kept as balanced token runs whose
//! identifiers are wrapped in `NAME_REF` nodes.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (namespaces, type declarations, name references).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace, comments and preprocessor lines)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    PREPROCESSOR,
    DISABLED_TEXT, // inactive `#if` branch

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier, `@verbatim` identifier or contextual keyword
    INTEGER, // 42, 0xFF, 10UL
    REAL,    // 3.14, 1e10, 2.5m
    STRING,  // "text", @"text", """raw"""
    CHAR,    // 'c'

    // Interpolated strings: `$"a{b}c"` is START TEXT HOLE_OPEN ... HOLE_CLOSE TEXT END
    INTERP_STRING_START, // $" $@" $$"""
    INTERP_STRING_TEXT,  // literal text or format specifier
    INTERP_STRING_END,   // closing quote(s)
    INTERP_HOLE_OPEN,    // { opening an interpolation
    INTERP_HOLE_CLOSE,   // } closing an interpolation

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,           // {
    R_BRACE,           // }
    L_BRACKET,         // [
    R_BRACKET,         // ]
    L_PAREN,           // (
    R_PAREN,           // )
    SEMICOLON,         // ;
    COLON,             // :
    COLON_COLON,       // ::
    DOT,               // .
    COMMA,             // ,
    EQ,                // =
    EQ_EQ,             // ==
    BANG_EQ,           // !=
    FAT_ARROW,         // =>
    LT,                // <
    GT,                // >
    QUESTION,          // ?
    QUESTION_DOT,      // ?.
    QUESTION_QUESTION, // ??
    STAR,              // *
    TILDE,             // ~
    AMP,               // &
    AMP_AMP,           // &&
    PIPE,              // |
    PIPE_PIPE,         // ||
    CARET,             // ^
    OPERATOR,          // any other operator (+ - / % ! ++ += <= ...)

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    NAMESPACE_KW,
    USING_KW,
    CLASS_KW,
    STRUCT_KW,
    INTERFACE_KW,
    ENUM_KW,
    DELEGATE_KW,
    EVENT_KW,
    OPERATOR_KW,
    IMPLICIT_KW,
    EXPLICIT_KW,
    THIS_KW,
    BASE_KW,
    NEW_KW,
    STATIC_KW,
    // Modifiers
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    ABSTRACT_KW,
    SEALED_KW,
    VIRTUAL_KW,
    OVERRIDE_KW,
    READONLY_KW,
    CONST_KW,
    EXTERN_KW,
    UNSAFE_KW,
    VOLATILE_KW,
    // `int`, `string`, `object`, ... (never simple names)
    PREDEFINED_TYPE,
    // Statement and expression keywords with no structural meaning here
    KEYWORD,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    NAMESPACE_NAME,
    TYPE_DECL,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    BASE_LIST,
    CONSTRAINT_CLAUSE,
    TYPE_BODY,
    ENUM_MEMBER,
    ATTRIBUTE_LIST,
    ATTRIBUTE,
    ATTRIBUTE_ARGS,
    METHOD_DECL,
    MEMBER_DECL,
    GLOBAL_STATEMENT,
    NAME_REF,
    TYPE_ARG_LIST,
    INTERPOLATED_STRING,
    INTERPOLATION,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comment, preprocessor line)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE
                | Self::LINE_COMMENT
                | Self::BLOCK_COMMENT
                | Self::PREPROCESSOR
                | Self::DISABLED_TEXT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::NAMESPACE_KW as u16) && (self as u16) <= (Self::KEYWORD as u16)
    }

    /// Check if this is a declaration modifier keyword
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::PRIVATE_KW
                | Self::PROTECTED_KW
                | Self::INTERNAL_KW
                | Self::ABSTRACT_KW
                | Self::SEALED_KW
                | Self::VIRTUAL_KW
                | Self::OVERRIDE_KW
                | Self::READONLY_KW
                | Self::CONST_KW
                | Self::EXTERN_KW
                | Self::UNSAFE_KW
                | Self::VOLATILE_KW
                | Self::STATIC_KW
                | Self::NEW_KW
        )
    }

    /// Check if this token opens a balanced group
    pub fn is_opening_delimiter(self) -> bool {
        matches!(self, Self::L_PAREN | Self::L_BRACKET | Self::L_BRACE)
    }

    /// Check if this token closes a balanced group
    pub fn is_closing_delimiter(self) -> bool {
        matches!(self, Self::R_PAREN | Self::R_BRACKET | Self::R_BRACE)
    }

    /// The closing delimiter matching an opening one
    pub fn closing_delimiter(self) -> Option<SyntaxKind> {
        match self {
            Self::L_PAREN => Some(Self::R_PAREN),
            Self::L_BRACKET => Some(Self::R_BRACKET),
            Self::L_BRACE => Some(Self::R_BRACE),
            _ => None,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceLanguage {}

impl rowan::Language for SourceLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<SourceLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SourceLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SourceLanguage>;
