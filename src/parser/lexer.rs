//! Logos-based lexer for the declaration language
//!
//! Fast tokenization using the logos crate. The lexer is lossless: trivia
//! (whitespace, comments, preprocessor lines, inactive `#if` branches) is
//! kept so the CST can reproduce the input exactly.
//!
//! Two constructs need more than a regular token:
//!
//! - Interpolated strings are split into text, hole delimiters and the hole
//!   contents, which are lexed as ordinary tokens.
//! - Conditional compilation keeps one branch of each `#if` group active;
//!   the others become `DISABLED_TEXT` trivia.

use std::collections::VecDeque;

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    input: &'a str,
    /// Absolute offset at which `inner` started.
    base: usize,
    inner: logos::Lexer<'a, LogosToken>,
    pending: VecDeque<Token<'a>>,
    /// One entry per open `#if` group: whether a branch has been taken.
    conditionals: Vec<bool>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::starting_at(input, 0)
    }

    fn starting_at(input: &'a str, start: usize) -> Self {
        Self {
            input,
            base: start,
            inner: LogosToken::lexer(&input[start..]),
            pending: VecDeque::new(),
            conditionals: Vec::new(),
        }
    }

    /// Absolute position the logos lexer continues from.
    fn position(&self) -> usize {
        self.base + self.inner.span().end
    }

    fn advance_to(&mut self, pos: usize) {
        let current = Self::position(self);
        if pos > current {
            self.inner.bump(pos - current);
        }
    }

    fn token(&self, kind: SyntaxKind, start: usize, end: usize) -> Token<'a> {
        let input: &'a str = self.input;
        Token {
            kind,
            text: &input[start..end],
            offset: TextSize::new(start as u32),
        }
    }

    fn push(&mut self, kind: SyntaxKind, start: usize, end: usize) {
        if end > start {
            let token = self.token(kind, start, end);
            self.pending.push_back(token);
        }
    }

    // =========================================================================
    // Interpolated strings
    // =========================================================================

    fn scan_interpolated(&mut self, start: usize, end: usize) {
        let input = self.input;
        let opener = &input[start..end];
        let quotes = opener.matches('"').count();
        let style = if quotes >= 3 {
            Interpolation::Raw {
                braces: opener.matches('$').count(),
                quotes,
            }
        } else if opener.contains('@') {
            Interpolation::Verbatim
        } else {
            Interpolation::Regular
        };
        self.push(SyntaxKind::INTERP_STRING_START, start, end);
        let finish = self.scan_interpolated_body(end, style);
        self.advance_to(finish);
    }

    /// Scan string contents from `pos`; returns the position past the string.
    fn scan_interpolated_body(&mut self, mut pos: usize, style: Interpolation) -> usize {
        let input = self.input;
        let bytes = input.as_bytes();
        let len = bytes.len();
        let mut text_start = pos;
        while pos < len {
            match (bytes[pos], style) {
                (b'\\', Interpolation::Regular) => pos = (pos + 2).min(len),
                (b'\n', Interpolation::Regular) => {
                    // Unterminated; the parser reports the missing quote
                    self.push(SyntaxKind::INTERP_STRING_TEXT, text_start, pos);
                    return pos;
                }
                (b'"', Interpolation::Verbatim) if bytes.get(pos + 1) == Some(&b'"') => pos += 2,
                (b'"', Interpolation::Raw { quotes, .. }) => {
                    let run = run_length(bytes, pos, b'"');
                    if run < quotes {
                        pos += run;
                        continue;
                    }
                    self.push(SyntaxKind::INTERP_STRING_TEXT, text_start, pos);
                    self.push(SyntaxKind::INTERP_STRING_END, pos, pos + run);
                    return pos + run;
                }
                (b'"', _) => {
                    self.push(SyntaxKind::INTERP_STRING_TEXT, text_start, pos);
                    self.push(SyntaxKind::INTERP_STRING_END, pos, pos + 1);
                    return pos + 1;
                }
                (b'{', Interpolation::Raw { braces, .. }) => {
                    let run = run_length(bytes, pos, b'{');
                    if run < braces {
                        pos += run;
                        continue;
                    }
                    let open = pos + run - braces;
                    self.push(SyntaxKind::INTERP_STRING_TEXT, text_start, open);
                    pos = self.scan_hole(open, braces);
                    text_start = pos;
                }
                (b'{', _) if bytes.get(pos + 1) == Some(&b'{') => pos += 2,
                (b'{', _) => {
                    self.push(SyntaxKind::INTERP_STRING_TEXT, text_start, pos);
                    pos = self.scan_hole(pos, 1);
                    text_start = pos;
                }
                (b'}', Interpolation::Regular | Interpolation::Verbatim)
                    if bytes.get(pos + 1) == Some(&b'}') =>
                {
                    pos += 2
                }
                _ => pos += 1,
            }
        }
        self.push(SyntaxKind::INTERP_STRING_TEXT, text_start, len);
        len
    }

    /// Lex one `{expr,align:format}` hole opened by `braces` braces at `open`.
    fn scan_hole(&mut self, open: usize, braces: usize) -> usize {
        self.push(SyntaxKind::INTERP_HOLE_OPEN, open, open + braces);
        let mut inner = Lexer::starting_at(self.input, open + braces);
        let mut depth = 0usize;
        while let Some(token) = inner.next() {
            let start = u32::from(token.offset) as usize;
            if depth == 0 {
                match token.kind {
                    SyntaxKind::R_BRACE => return self.close_hole(start, braces),
                    SyntaxKind::COLON => {
                        // Format specifier runs to the closing brace
                        let close = self.input[start + 1..]
                            .find('}')
                            .map_or(self.input.len(), |i| start + 1 + i);
                        self.pending.push_back(token);
                        self.push(SyntaxKind::INTERP_STRING_TEXT, start + 1, close);
                        return self.close_hole(close, braces);
                    }
                    _ => {}
                }
            }
            if token.kind.is_opening_delimiter() {
                depth += 1;
            } else if token.kind.is_closing_delimiter() {
                depth = depth.saturating_sub(1);
            }
            self.pending.push_back(token);
        }
        self.input.len()
    }

    fn close_hole(&mut self, pos: usize, braces: usize) -> usize {
        let run = run_length(self.input.as_bytes(), pos, b'}').min(braces);
        self.push(SyntaxKind::INTERP_HOLE_CLOSE, pos, pos + run);
        pos + run
    }

    // =========================================================================
    // Conditional compilation
    // =========================================================================

    fn directive(&mut self, start: usize, end: usize) {
        let input = self.input;
        let (name, condition) = split_directive(&input[start + 1..end]);
        let skip = match name {
            "if" => {
                let taken = condition_holds(condition);
                self.conditionals.push(taken);
                !taken
            }
            "elif" => match self.conditionals.last_mut() {
                Some(taken) if !*taken => {
                    *taken = condition_holds(condition);
                    !*taken
                }
                Some(_) => true,
                None => false,
            },
            "else" => match self.conditionals.last_mut() {
                Some(taken) if !*taken => {
                    *taken = true;
                    false
                }
                Some(_) => true,
                None => false,
            },
            "endif" => {
                self.conditionals.pop();
                false
            }
            _ => false,
        };
        if skip {
            self.skip_disabled(end);
        }
    }

    /// Turn everything up to the next `#elif`, `#else` or `#endif` of the
    /// current group into one trivia token.
    fn skip_disabled(&mut self, from: usize) {
        let input = self.input;
        let mut depth = 0usize;
        let mut stop = input.len();
        let mut pos = input[from..].find('\n').map_or(input.len(), |i| from + i + 1);
        while pos < input.len() {
            let line_end = input[pos..].find('\n').map_or(input.len(), |i| pos + i);
            let line = &input[pos..line_end];
            let trimmed = line.trim_start();
            if let Some(directive) = trimmed.strip_prefix('#') {
                match split_directive(directive).0 {
                    "if" => depth += 1,
                    "endif" if depth > 0 => depth -= 1,
                    "endif" | "elif" | "else" if depth == 0 => {
                        stop = pos + (line.len() - trimmed.len());
                        break;
                    }
                    _ => {}
                }
            }
            pos = line_end + 1;
        }
        self.push(SyntaxKind::DISABLED_TEXT, from, stop);
        self.advance_to(stop);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        let logos_token = self.inner.next()?;
        let span = self.inner.span();
        let (start, end) = (self.base + span.start, self.base + span.end);

        let kind = match logos_token {
            Ok(LogosToken::InterpolatedStart) => {
                self.scan_interpolated(start, end);
                return self.pending.pop_front();
            }
            Ok(LogosToken::Preprocessor) => {
                self.directive(start, end);
                SyntaxKind::PREPROCESSOR
            }
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };
        Some(self.token(kind, start, end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interpolation {
    /// `$"..."`
    Regular,
    /// `$@"..."` / `@$"..."`
    Verbatim,
    /// `$$"""..."""`: holes open with `braces` braces
    Raw { braces: usize, quotes: usize },
}

fn run_length(bytes: &[u8], pos: usize, byte: u8) -> usize {
    bytes
        .get(pos..)
        .map_or(0, |rest| rest.iter().take_while(|&&b| b == byte).count())
}

/// `if DEBUG // note` -> (`if`, `DEBUG`)
fn split_directive(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    let name_len = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (name, rest) = text.split_at(name_len);
    let condition = rest.split("//").next().unwrap_or_default().trim();
    (name, condition)
}

/// Symbols are not tracked: only a literal `false` disables a branch.
fn condition_holds(condition: &str) -> bool {
    !matches!(condition, "false" | "!true")
}

/// `"""` opens a raw string closed by at least as many quotes.
fn raw_string(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    let quotes = lex.slice().len();
    let bytes = lex.remainder().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            let run = run_length(bytes, i, b'"');
            if run >= quotes {
                lex.bump(i + run);
                return true;
            }
            i += run;
        } else {
            i += 1;
        }
    }
    false
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    // Includes the byte order mark and Unicode space separators
    #[regex(r"[\p{Zs}\t\x0B\x0C\r\n\x{85}\x{2028}\x{2029}\x{FEFF}]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"#[^\n]*")]
    Preprocessor,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"@?[\p{XID_Start}_]\p{XID_Continue}*")]
    Ident,

    #[regex(r"[0-9][0-9_]*([uU][lL]?|[lL][uU]?)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+([uU][lL]?|[lL][uU]?)?")]
    #[regex(r"0[bB][01_]+([uU][lL]?|[lL][uU]?)?")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[fFdDmM]")]
    Real,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#""""+"#, raw_string)]
    String,

    // The body is scanned by `Lexer::scan_interpolated`
    #[regex("\\$+\"")]
    #[regex("\\$+\"\"\"+")]
    #[token("$@\"")]
    #[token("@$\"")]
    InterpolatedStart,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("::")]
    ColonColon,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("=>")]
    FatArrow,

    #[token("?.")]
    QuestionDot,

    #[token("??")]
    QuestionQuestion,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    // `>` is never combined so nested type argument lists close one at a time
    #[token("+")]
    #[token("-")]
    #[token("/")]
    #[token("%")]
    #[token("!")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<")]
    #[token("<<=")]
    #[token("<=")]
    #[token(">=")]
    #[token("->")]
    #[token("??=")]
    #[token("..")]
    Operator,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("namespace")]
    NamespaceKw,
    #[token("using")]
    UsingKw,
    #[token("class")]
    ClassKw,
    #[token("struct")]
    StructKw,
    #[token("interface")]
    InterfaceKw,
    #[token("enum")]
    EnumKw,
    #[token("delegate")]
    DelegateKw,
    #[token("event")]
    EventKw,
    #[token("operator")]
    OperatorKw,
    #[token("implicit")]
    ImplicitKw,
    #[token("explicit")]
    ExplicitKw,
    #[token("this")]
    ThisKw,
    #[token("base")]
    BaseKw,
    #[token("new")]
    NewKw,
    #[token("static")]
    StaticKw,
    #[token("public")]
    PublicKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("internal")]
    InternalKw,
    #[token("abstract")]
    AbstractKw,
    #[token("sealed")]
    SealedKw,
    #[token("virtual")]
    VirtualKw,
    #[token("override")]
    OverrideKw,
    #[token("readonly")]
    ReadonlyKw,
    #[token("const")]
    ConstKw,
    #[token("extern")]
    ExternKw,
    #[token("unsafe")]
    UnsafeKw,
    #[token("volatile")]
    VolatileKw,

    #[token("bool")]
    #[token("byte")]
    #[token("sbyte")]
    #[token("char")]
    #[token("decimal")]
    #[token("double")]
    #[token("float")]
    #[token("int")]
    #[token("uint")]
    #[token("long")]
    #[token("ulong")]
    #[token("short")]
    #[token("ushort")]
    #[token("object")]
    #[token("string")]
    #[token("void")]
    PredefinedType,

    #[token("as")]
    #[token("break")]
    #[token("case")]
    #[token("catch")]
    #[token("checked")]
    #[token("continue")]
    #[token("default")]
    #[token("do")]
    #[token("else")]
    #[token("false")]
    #[token("finally")]
    #[token("fixed")]
    #[token("for")]
    #[token("foreach")]
    #[token("goto")]
    #[token("if")]
    #[token("in")]
    #[token("is")]
    #[token("lock")]
    #[token("null")]
    #[token("out")]
    #[token("params")]
    #[token("ref")]
    #[token("return")]
    #[token("sizeof")]
    #[token("stackalloc")]
    #[token("switch")]
    #[token("throw")]
    #[token("true")]
    #[token("try")]
    #[token("typeof")]
    #[token("unchecked")]
    #[token("while")]
    Keyword,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Preprocessor => SyntaxKind::PREPROCESSOR,
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER,
            Real => SyntaxKind::REAL,
            String => SyntaxKind::STRING,
            InterpolatedStart => SyntaxKind::INTERP_STRING_START,
            Char => SyntaxKind::CHAR,
            ColonColon => SyntaxKind::COLON_COLON,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            FatArrow => SyntaxKind::FAT_ARROW,
            QuestionDot => SyntaxKind::QUESTION_DOT,
            QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            Operator => SyntaxKind::OPERATOR,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Question => SyntaxKind::QUESTION,
            Star => SyntaxKind::STAR,
            Tilde => SyntaxKind::TILDE,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            NamespaceKw => SyntaxKind::NAMESPACE_KW,
            UsingKw => SyntaxKind::USING_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            DelegateKw => SyntaxKind::DELEGATE_KW,
            EventKw => SyntaxKind::EVENT_KW,
            OperatorKw => SyntaxKind::OPERATOR_KW,
            ImplicitKw => SyntaxKind::IMPLICIT_KW,
            ExplicitKw => SyntaxKind::EXPLICIT_KW,
            ThisKw => SyntaxKind::THIS_KW,
            BaseKw => SyntaxKind::BASE_KW,
            NewKw => SyntaxKind::NEW_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            ProtectedKw => SyntaxKind::PROTECTED_KW,
            InternalKw => SyntaxKind::INTERNAL_KW,
            AbstractKw => SyntaxKind::ABSTRACT_KW,
            SealedKw => SyntaxKind::SEALED_KW,
            VirtualKw => SyntaxKind::VIRTUAL_KW,
            OverrideKw => SyntaxKind::OVERRIDE_KW,
            ReadonlyKw => SyntaxKind::READONLY_KW,
            ConstKw => SyntaxKind::CONST_KW,
            ExternKw => SyntaxKind::EXTERN_KW,
            UnsafeKw => SyntaxKind::UNSAFE_KW,
            VolatileKw => SyntaxKind::VOLATILE_KW,
            PredefinedType => SyntaxKind::PREDEFINED_TYPE,
            Keyword => SyntaxKind::KEYWORD,
        }
    }
}
