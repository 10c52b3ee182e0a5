use log::{debug, trace};
use trs_ast::ast::{Def, Item};
use trs_lexer::Tok;

use crate::error::SyntaxError;
use crate::parser::Parser;

impl<'t, 'src> Parser<'t, 'src> {
    /// program := (item ";")*
    ///
    /// The terminator is required after every item, the last one included.
    pub fn parse_program(&mut self) -> Result<Vec<Item>, SyntaxError> {
        let mut items = Vec::new();
        while self.cursor.has_more() {
            let item = self.parse_item()?;
            self.cursor.expect(&[Tok::Semicolon])?;
            debug!("parsed item #{}: {}", items.len(), item_kind(&item));
            items.push(item);
        }
        Ok(items)
    }

    /// item := def | term
    pub fn parse_item(&mut self) -> Result<Item, SyntaxError> {
        trace!("parse_item: next token = {:?}", self.cursor.peek().map(|t| t.tok));
        if self.cursor.peek_is(&[Tok::Let]) {
            return Ok(Item::Def(self.parse_def()?));
        }
        Ok(Item::Term(self.parse_term()?))
    }

    /// def := "let" ident ("(" pattern,* ")")? "=" term
    pub fn parse_def(&mut self) -> Result<Def, SyntaxError> {
        self.cursor.expect(&[Tok::Let])?;
        let name = self.cursor.expect(&[Tok::Ident])?.text.to_string();
        trace!("parse_def: {name}");
        let patterns = if self.cursor.peek_is(&[Tok::LParen]) {
            self.cursor.pop();
            let patterns = self.comma_sep(&[Tok::RParen], Self::parse_pattern)?;
            self.cursor.expect(&[Tok::RParen])?;
            patterns
        } else {
            Vec::new()
        };
        self.cursor.expect(&[Tok::Eq])?;
        let body = self.parse_term()?;
        Ok(Def { name, patterns, body })
    }
}

fn item_kind(item: &Item) -> &str {
    match item {
        Item::Def(d) => d.name.as_str(),
        Item::Term(_) => "<term>",
    }
}
