use trs_ast::span::Span;
use trs_lexer::{Lexed, Tok};

use crate::error::{Expected, SyntaxError};

/// Single-owner, forward-only view over a token slice.
pub struct Cursor<'t, 'src> {
    toks: &'t [Lexed<'src>],
    pos: usize,
}

impl<'t, 'src> Cursor<'t, 'src> {
    pub fn new(toks: &'t [Lexed<'src>]) -> Self {
        Self { toks, pos: 0 }
    }

    pub fn has_more(&self) -> bool {
        self.pos < self.toks.len()
    }

    pub fn peek(&self) -> Option<&'t Lexed<'src>> {
        self.toks.get(self.pos)
    }

    /// True if the next token's kind is in `kinds`. False at end of input.
    pub fn peek_is(&self, kinds: &[Tok]) -> bool {
        self.peek().is_some_and(|t| kinds.contains(&t.tok))
    }

    /// True at end of input or in front of one of `stop`.
    pub fn at_stop(&self, stop: &[Tok]) -> bool {
        !self.has_more() || self.peek_is(stop)
    }

    pub fn pop(&mut self) -> Option<&'t Lexed<'src>> {
        let toks = self.toks;
        let t = toks.get(self.pos)?;
        self.pos += 1;
        Some(t)
    }

    /// Consume the next token if its kind is in `kinds`.
    pub fn expect(&mut self, kinds: &[Tok]) -> Result<&'t Lexed<'src>, SyntaxError> {
        match self.peek() {
            Some(t) if kinds.contains(&t.tok) => {
                self.pos += 1;
                Ok(t)
            }
            _ => Err(self.error(Expected::Tokens(kinds.to_vec()))),
        }
    }

    /// Error describing the current position against `expected`.
    pub fn error(&self, expected: Expected) -> SyntaxError {
        match self.peek() {
            Some(t) => SyntaxError::Unexpected {
                expected,
                found: t.tok,
                text: t.text.to_string(),
                span: t.span,
            },
            None => SyntaxError::UnexpectedEof { expected },
        }
    }

    /// Span of the next token, or an empty span just past the last one.
    pub fn span_here(&self) -> Span {
        match (self.peek(), self.toks.last()) {
            (Some(t), _) => t.span,
            (None, Some(last)) => Span::new(last.span.end(), 0),
            (None, None) => Span::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trs_lexer::lex;

    #[test]
    fn pop_walks_forward_once() {
        let toks = lex("a ( ;").unwrap();
        let mut c = Cursor::new(&toks);
        assert_eq!(c.pop().map(|t| t.text), Some("a"));
        assert!(c.peek_is(&[Tok::LParen]));
        assert_eq!(c.pop().map(|t| t.tok), Some(Tok::LParen));
        assert_eq!(c.pop().map(|t| t.tok), Some(Tok::Semicolon));
        assert!(!c.has_more());
        assert_eq!(c.pop(), None);
        assert!(c.at_stop(&[]));
    }

    #[test]
    fn expect_reports_found_token() {
        let toks = lex("Foo").unwrap();
        let mut c = Cursor::new(&toks);
        let err = c.expect(&[Tok::Ident, Tok::LParen]).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Unexpected {
                expected: Expected::Tokens(vec![Tok::Ident, Tok::LParen]),
                found: Tok::Atom,
                text: "Foo".into(),
                span: Span::new(0, 3),
            }
        );
        assert_eq!(err.to_string(), "syntax error: expected one of identifier, '(', found atom `Foo` at (0,3)");
        // failed expect does not consume
        assert_eq!(c.expect(&[Tok::Atom]).map(|t| t.text), Ok("Foo"));
    }

    #[test]
    fn expect_at_end_of_input() {
        let toks = lex("x").unwrap();
        let mut c = Cursor::new(&toks);
        c.pop();
        let err = c.expect(&[Tok::Semicolon]).unwrap_err();
        assert_eq!(err, SyntaxError::UnexpectedEof { expected: Expected::Tokens(vec![Tok::Semicolon]) });
        assert_eq!(err.to_string(), "syntax error: expected ';', found end of input");
        assert_eq!(c.span_here(), Span::new(1, 0));
    }
}
