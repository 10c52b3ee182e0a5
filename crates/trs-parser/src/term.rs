use log::trace;
use trs_ast::ast::{MatchClause, Term};
use trs_lexer::Tok;

use crate::error::{Expected, SyntaxError};
use crate::parser::{name_text, unescape_quoted, Parser};

impl<'t, 'src> Parser<'t, 'src> {
    /// term := term1 (":" term1)*
    ///
    /// `:` is right-associative and binds looser than call parentheses.
    /// A chain costs one nesting level however long it is.
    pub fn parse_term(&mut self) -> Result<Term, SyntaxError> {
        self.nested(|p| {
            let mut heads = Vec::new();
            let mut last = p.parse_term1()?;
            while p.cursor.peek_is(&[Tok::Colon]) {
                p.cursor.pop();
                heads.push(last);
                last = p.parse_term1()?;
            }
            Ok(heads.into_iter().rev().fold(last, |tail, head| Term::cons(head, tail)))
        })
    }

    fn parse_term1(&mut self) -> Result<Term, SyntaxError> {
        trace!("parse_term1: next token = {:?}", self.cursor.peek().map(|t| t.tok));
        let Some(t) = self.cursor.peek() else {
            return Err(self.cursor.error(Expected::Term));
        };
        match t.tok {
            Tok::Ident | Tok::Atom | Tok::QuotedAtom => self.parse_tree_or_var_or_app(),
            Tok::Str => {
                self.cursor.pop();
                Ok(Term::Str(unescape_quoted(t.text)))
            }
            Tok::LBracket => {
                self.cursor.pop();
                let elts = self.comma_sep(&[Tok::RBracket], Self::parse_term)?;
                self.cursor.expect(&[Tok::RBracket])?;
                Ok(Term::List(elts))
            }
            Tok::LParen => {
                self.cursor.pop();
                let inner = self.parse_term()?;
                self.cursor.expect(&[Tok::RParen])?;
                Ok(inner)
            }
            Tok::Match => self.parse_match_term(),
            Tok::Let
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
            | Tok::Underscore
            | Tok::_Trivia => Err(self.cursor.error(Expected::Term)),
        }
    }

    /// An identifier with `(...)` is an application, without it a variable.
    /// An atom is always a tree, whether or not arguments follow.
    fn parse_tree_or_var_or_app(&mut self) -> Result<Term, SyntaxError> {
        let start = self.cursor.expect(&[Tok::Ident, Tok::Atom, Tok::QuotedAtom])?;
        let text = name_text(start);
        let args = if self.cursor.peek_is(&[Tok::LParen]) {
            self.cursor.pop();
            let args = self.comma_sep(&[Tok::RParen], Self::parse_term)?;
            self.cursor.expect(&[Tok::RParen])?;
            Some(args)
        } else {
            None
        };
        Ok(match (start.tok, args) {
            (Tok::Ident, Some(rands)) => Term::App { op_name: text, rands },
            (Tok::Ident, None) => Term::Var(text),
            (_, children) => Term::Tree { functor: text, children: children.unwrap_or_default() },
        })
    }

    /// match term ("," term)* "{" clause ("," clause)* "}"
    fn parse_match_term(&mut self) -> Result<Term, SyntaxError> {
        trace!("parse_match_term");
        self.cursor.expect(&[Tok::Match])?;
        let terms = self.comma_sep(&[Tok::LBrace], Self::parse_term)?;
        self.cursor.expect(&[Tok::LBrace])?;
        let clauses = self.comma_sep(&[Tok::RBrace], Self::parse_match_clause)?;
        self.cursor.expect(&[Tok::RBrace])?;
        Ok(Term::Match { terms, clauses })
    }

    /// pattern ("," pattern)* "=>" term
    fn parse_match_clause(&mut self) -> Result<MatchClause, SyntaxError> {
        let patterns = self.comma_sep(&[Tok::FatArrow], Self::parse_pattern)?;
        self.cursor.expect(&[Tok::FatArrow])?;
        let body = self.parse_term()?;
        Ok(MatchClause { patterns, body })
    }
}
