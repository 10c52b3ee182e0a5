use std::fmt;

use trs_ast::span::Span;
use trs_lexer::{LexError, Tok};

/// Tokens that can begin a term.
pub const TERM_START: &[Tok] =
    &[Tok::Ident, Tok::Atom, Tok::QuotedAtom, Tok::Str, Tok::LBracket, Tok::LParen, Tok::Match];

/// Tokens that can begin a pattern.
pub const PATTERN_START: &[Tok] =
    &[Tok::Underscore, Tok::Ident, Tok::Atom, Tok::QuotedAtom, Tok::Str, Tok::LBracket, Tok::LParen];

/// What the parser would have accepted at the failure point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Tokens(Vec<Tok>),
    Term,
    Pattern,
    EndOfInput,
}

impl Expected {
    /// Token kinds that would have been accepted.
    pub fn kinds(&self) -> Vec<Tok> {
        match self {
            Expected::Tokens(ks) => ks.clone(),
            Expected::Term => TERM_START.to_vec(),
            Expected::Pattern => PATTERN_START.to_vec(),
            Expected::EndOfInput => Vec::new(),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Tokens(ks) if ks.len() == 1 => f.write_str(ks[0].describe()),
            Expected::Tokens(ks) => {
                let names = ks.iter().map(|k| k.describe()).collect::<Vec<_>>().join(", ");
                write!(f, "one of {names}")
            }
            Expected::Term => f.write_str("a term"),
            Expected::Pattern => f.write_str("a pattern"),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("syntax error: expected {expected}, found {} `{text}` at ({},{})", .found.describe(), .span.offset, .span.len)]
    Unexpected { expected: Expected, found: Tok, text: String, span: Span },
    #[error("syntax error: expected {expected}, found end of input")]
    UnexpectedEof { expected: Expected },
    #[error("syntax error: nesting deeper than {limit} at ({},{})", .span.offset, .span.len)]
    TooDeep { limit: usize, span: Span },
}

impl SyntaxError {
    /// Position of the offending token; `None` when input ran out.
    pub fn span(&self) -> Option<Span> {
        match self {
            SyntaxError::Unexpected { span, .. } | SyntaxError::TooDeep { span, .. } => Some(*span),
            SyntaxError::UnexpectedEof { .. } => None,
        }
    }

    pub fn expected(&self) -> Option<&Expected> {
        match self {
            SyntaxError::Unexpected { expected, .. } | SyntaxError::UnexpectedEof { expected } => {
                Some(expected)
            }
            SyntaxError::TooDeep { .. } => None,
        }
    }
}

/// Failure of the source-to-items pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Error {
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Lex(e) => Some(e.span()),
            Error::Syntax(e) => e.span(),
        }
    }
}
