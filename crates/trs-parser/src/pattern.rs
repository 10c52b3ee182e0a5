use log::trace;
use trs_ast::ast::Pattern;
use trs_lexer::Tok;

use crate::error::{Expected, SyntaxError};
use crate::parser::{name_text, unescape_quoted, Parser};

impl<'t, 'src> Parser<'t, 'src> {
    /// pattern := pattern1 (":" pattern1)*, folded to the right
    pub fn parse_pattern(&mut self) -> Result<Pattern, SyntaxError> {
        self.nested(|p| {
            let mut heads = Vec::new();
            let mut last = p.parse_pattern1()?;
            while p.cursor.peek_is(&[Tok::Colon]) {
                p.cursor.pop();
                heads.push(last);
                last = p.parse_pattern1()?;
            }
            Ok(heads.into_iter().rev().fold(last, |tail, head| Pattern::cons(head, tail)))
        })
    }

    fn parse_pattern1(&mut self) -> Result<Pattern, SyntaxError> {
        trace!("parse_pattern1: next token = {:?}", self.cursor.peek().map(|t| t.tok));
        let Some(t) = self.cursor.peek() else {
            return Err(self.cursor.error(Expected::Pattern));
        };
        match t.tok {
            Tok::Underscore => {
                self.cursor.pop();
                Ok(Pattern::Wildcard)
            }
            Tok::Ident => self.parse_var_or_as_pattern(),
            Tok::Atom | Tok::QuotedAtom => self.parse_tree_pattern(),
            Tok::Str => {
                self.cursor.pop();
                Ok(Pattern::Str(unescape_quoted(t.text)))
            }
            Tok::LBracket => {
                self.cursor.pop();
                let elts = self.comma_sep(&[Tok::RBracket], Self::parse_pattern)?;
                self.cursor.expect(&[Tok::RBracket])?;
                Ok(Pattern::List(elts))
            }
            Tok::LParen => {
                self.cursor.pop();
                let inner = self.parse_pattern()?;
                self.cursor.expect(&[Tok::RParen])?;
                Ok(inner)
            }
            Tok::Let
            | Tok::Match
            | Tok::RParen
            | Tok::RBracket
            | Tok::LBrace
            | Tok::RBrace
            | Tok::Comma
            | Tok::Colon
            | Tok::At
            | Tok::FatArrow
            | Tok::Eq
            | Tok::Semicolon
            | Tok::_Trivia => Err(self.cursor.error(Expected::Pattern)),
        }
    }

    /// Atom-headed pattern; never collapses to a variable.
    fn parse_tree_pattern(&mut self) -> Result<Pattern, SyntaxError> {
        let start = self.cursor.expect(&[Tok::Atom, Tok::QuotedAtom])?;
        let functor = name_text(start);
        let children = if self.cursor.peek_is(&[Tok::LParen]) {
            self.cursor.pop();
            let children = self.comma_sep(&[Tok::RParen], Self::parse_pattern)?;
            self.cursor.expect(&[Tok::RParen])?;
            children
        } else {
            Vec::new()
        };
        Ok(Pattern::Tree { functor, children })
    }

    /// `x` or `x@pattern`
    fn parse_var_or_as_pattern(&mut self) -> Result<Pattern, SyntaxError> {
        let name = self.cursor.expect(&[Tok::Ident])?.text.to_string();
        if self.cursor.peek_is(&[Tok::At]) {
            self.cursor.pop();
            let pattern = self.parse_pattern()?;
            return Ok(Pattern::As { name, pattern: Box::new(pattern) });
        }
        Ok(Pattern::Var(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trs_lexer::lex;

    fn pattern(src: &str) -> Result<Pattern, SyntaxError> {
        let toks = lex(src).unwrap();
        Parser::new(&toks).parse_pattern()
    }

    #[test]
    fn leaves() {
        assert_eq!(pattern("_").unwrap(), Pattern::Wildcard);
        assert_eq!(pattern("x").unwrap(), Pattern::var("x"));
        assert_eq!(pattern("Nil").unwrap(), Pattern::atom("Nil"));
        assert_eq!(pattern(r#""s""#).unwrap(), Pattern::Str("s".into()));
        assert_eq!(pattern("[]").unwrap(), Pattern::List(vec![]));
    }

    #[test]
    fn trees_keep_their_arity() {
        assert_eq!(pattern("Pair()").unwrap(), Pattern::atom("Pair"));
        assert_eq!(
            pattern("Pair(x, 'q r'(_))").unwrap(),
            Pattern::tree("Pair", vec![Pattern::var("x"), Pattern::tree("q r", vec![Pattern::Wildcard])])
        );
    }

    #[test]
    fn as_pattern_takes_the_whole_cons() {
        assert_eq!(
            pattern("all@h : t").unwrap(),
            Pattern::as_("all", Pattern::cons(Pattern::var("h"), Pattern::var("t")))
        );
        assert_eq!(
            pattern("(x@h) : t").unwrap(),
            Pattern::cons(Pattern::as_("x", Pattern::var("h")), Pattern::var("t"))
        );
    }

    #[test]
    fn nested_as() {
        assert_eq!(
            pattern("a@b@_").unwrap(),
            Pattern::as_("a", Pattern::as_("b", Pattern::Wildcard))
        );
    }

    #[test]
    fn identifiers_have_no_application_form() {
        // `f(` stops after the variable; the `(` is left unconsumed
        let toks = lex("f(x)").unwrap();
        let mut p = Parser::new(&toks);
        assert_eq!(p.parse_pattern().unwrap(), Pattern::var("f"));
        assert!(p.cursor().peek_is(&[Tok::LParen]));
    }

    #[test]
    fn match_keyword_is_not_a_pattern() {
        let err = pattern("match").unwrap_err();
        assert!(matches!(err, SyntaxError::Unexpected { expected: Expected::Pattern, found: Tok::Match, .. }));
        assert_eq!(err.expected().map(|e| e.kinds().contains(&Tok::Underscore)), Some(true));
    }

    #[test]
    fn dangling_at_needs_a_pattern() {
        assert_eq!(pattern("x@").unwrap_err(), SyntaxError::UnexpectedEof { expected: Expected::Pattern });
    }
}
