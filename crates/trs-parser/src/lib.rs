//! Recursive-descent parser for trs scripts.
//!
//! A program is a sequence of `;`-terminated items, each either a
//! definition `let name(p, ...) = term` or a bare term. Terms and patterns
//! share one surface shape (atoms, trees, variables, strings, lists and the
//! right-associative `:`); terms add application and `match`, patterns add
//! `_` and `name@pattern`.
//!
//! Parsing is one-shot and fail-fast: the first [`SyntaxError`] aborts the
//! whole parse and no partial tree is returned.

mod cursor;
mod error;
mod items;
mod parser;
mod pattern;
mod term;

pub use cursor::Cursor;
pub use error::{Error, Expected, SyntaxError, PATTERN_START, TERM_START};
pub use parser::{unescape_quoted, Parser, ParserConfig, DEFAULT_MAX_DEPTH};

use trs_ast::ast::{Item, Pattern, Term};
use trs_lexer::{lex, Lexed};

/// Parse a token stream into program items.
pub fn parse_program(toks: &[Lexed<'_>]) -> Result<Vec<Item>, SyntaxError> {
    parse_program_with(toks, &ParserConfig::default())
}

pub fn parse_program_with(toks: &[Lexed<'_>], config: &ParserConfig) -> Result<Vec<Item>, SyntaxError> {
    Parser::with_config(toks, *config).parse_program()
}

/// Lex and parse a whole source text.
pub fn parse_source(src: &str) -> Result<Vec<Item>, Error> {
    parse_source_with(src, &ParserConfig::default())
}

pub fn parse_source_with(src: &str, config: &ParserConfig) -> Result<Vec<Item>, Error> {
    let toks = lex(src)?;
    Ok(parse_program_with(&toks, config)?)
}

/// Parse `src` as exactly one term, with no terminator.
pub fn parse_term_str(src: &str) -> Result<Term, Error> {
    let toks = lex(src)?;
    let mut p = Parser::new(&toks);
    let t = p.parse_term()?;
    finish(&p)?;
    Ok(t)
}

/// Parse `src` as exactly one pattern.
pub fn parse_pattern_str(src: &str) -> Result<Pattern, Error> {
    let toks = lex(src)?;
    let mut p = Parser::new(&toks);
    let pat = p.parse_pattern()?;
    finish(&p)?;
    Ok(pat)
}

fn finish(p: &Parser<'_, '_>) -> Result<(), SyntaxError> {
    if p.cursor().has_more() {
        return Err(p.cursor().error(Expected::EndOfInput));
    }
    Ok(())
}
