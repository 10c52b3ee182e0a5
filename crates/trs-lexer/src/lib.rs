use logos::Logos;
use serde::Serialize;
use trs_ast::span::Span;

/// Token kinds shared by the lexer and the parser.
#[derive(Debug, Logos, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
pub enum Tok {
    // Whitespace and `#` line comments never reach the parser
    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[regex(r"#[^\n]*", logos::skip)]
    _Trivia,

    #[token("let")]
    Let,
    #[token("match")]
    Match,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("@")]
    At,
    // '=>' is longer than '=', logos picks the longest match
    #[token("=>")]
    FatArrow,
    #[token("=")]
    Eq,
    #[token(";")]
    Semicolon,
    #[token("_")]
    Underscore,

    // Lowercase words are variables / operator names
    #[regex(r"[a-z][A-Za-z0-9_']*")]
    #[regex(r"_[A-Za-z0-9_']+")]
    Ident,

    // Capitalised words and numerals are functors
    #[regex(r"[A-Z][A-Za-z0-9_']*")]
    #[regex(r"[0-9]+")]
    Atom,

    #[regex(r"'([^'\\]|\\.)*'")]
    QuotedAtom,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,
}

impl Tok {
    /// Human-readable name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Tok::_Trivia => "whitespace",
            Tok::Let => "'let'",
            Tok::Match => "'match'",
            Tok::LParen => "'('",
            Tok::RParen => "')'",
            Tok::LBracket => "'['",
            Tok::RBracket => "']'",
            Tok::LBrace => "'{'",
            Tok::RBrace => "'}'",
            Tok::Comma => "','",
            Tok::Colon => "':'",
            Tok::At => "'@'",
            Tok::FatArrow => "'=>'",
            Tok::Eq => "'='",
            Tok::Semicolon => "';'",
            Tok::Underscore => "'_'",
            Tok::Ident => "identifier",
            Tok::Atom => "atom",
            Tok::QuotedAtom => "quoted atom",
            Tok::Str => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lexed<'a> {
    pub tok: Tok,
    pub span: Span,
    pub text: &'a str,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character(s) `{text}` at ({},{})", .span.offset, .span.len)]
    UnexpectedChar { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
        }
    }
}

/// Tokenize the whole input, stopping at the first unrecognised character.
pub fn lex(input: &str) -> Result<Vec<Lexed<'_>>, LexError> {
    let mut out = Vec::new();
    let mut l = Tok::lexer(input);
    while let Some(res) = l.next() {
        let range = l.span();
        let span = Span::new(range.start, range.len());
        match res {
            Ok(tok) => out.push(Lexed { tok, span, text: &input[range] }),
            Err(()) => {
                return Err(LexError::UnexpectedChar { text: input[range].to_string(), span })
            }
        }
    }
    Ok(out)
}
