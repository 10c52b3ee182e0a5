use trs_lexer::{Lexed, Tok};

use crate::cursor::Cursor;
use crate::error::SyntaxError;

pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of nested term/pattern rules before giving up.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Recursive-descent parser. Every rule advances the same cursor and
/// decides from one token of lookahead; nothing is ever re-read.
pub struct Parser<'t, 'src> {
    pub(crate) cursor: Cursor<'t, 'src>,
    config: ParserConfig,
    depth: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    pub fn new(toks: &'t [Lexed<'src>]) -> Self {
        Self::with_config(toks, ParserConfig::default())
    }

    pub fn with_config(toks: &'t [Lexed<'src>], config: ParserConfig) -> Self {
        Self { cursor: Cursor::new(toks), config, depth: 0 }
    }

    pub fn cursor(&self) -> &Cursor<'t, 'src> {
        &self.cursor
    }

    /// Run `rule` one nesting level deeper.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= self.config.max_depth {
            return Err(SyntaxError::TooDeep {
                limit: self.config.max_depth,
                span: self.cursor.span_here(),
            });
        }
        self.depth += 1;
        let res = rule(self);
        self.depth -= 1;
        res
    }

    /// `elem ("," elem)* ","?`, stopping before any token in `stop`.
    ///
    /// The stop token itself is left for the caller. A trailing comma is
    /// accepted; a leading or doubled comma is not.
    pub(crate) fn comma_sep<T>(
        &mut self,
        stop: &[Tok],
        mut elem: impl FnMut(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<Vec<T>, SyntaxError> {
        let mut out = Vec::new();
        if self.cursor.at_stop(stop) {
            return Ok(out);
        }
        out.push(elem(self)?);
        loop {
            if self.cursor.at_stop(stop) {
                break;
            }
            self.cursor.expect(&[Tok::Comma])?;
            if self.cursor.at_stop(stop) {
                break;
            }
            out.push(elem(self)?);
        }
        Ok(out)
    }
}

/// Strip the surrounding quotes and undo the escape of the matching quote
/// character. No other escape sequence is interpreted.
pub fn unescape_quoted(raw: &str) -> String {
    let mut chars = raw.chars();
    let quote = chars.next();
    chars.next_back();
    let inner = chars.as_str();
    match quote {
        Some('\'') => inner.replace("\\'", "'"),
        Some('"') => inner.replace("\\\"", "\""),
        _ => inner.to_string(),
    }
}

/// Text of an identifier or atom token, unquoted when it is a quoted atom.
pub(crate) fn name_text(t: &Lexed<'_>) -> String {
    match t.tok {
        Tok::QuotedAtom => unescape_quoted(t.text),
        _ => t.text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Expected;
    use pretty_assertions::assert_eq;
    use trs_lexer::lex;

    #[test]
    fn unescape_matching_quote_only() {
        assert_eq!(unescape_quoted(r#""a\"b""#), "a\"b");
        assert_eq!(unescape_quoted(r"'a\'b'"), "a'b");
        assert_eq!(unescape_quoted(r#""a\'b""#), r"a\'b");
        assert_eq!(unescape_quoted(r#"'a\"b'"#), r#"a\"b"#);
    }

    #[test]
    fn unescape_leaves_other_sequences() {
        assert_eq!(unescape_quoted(r#""tab\there\n""#), r"tab\there\n");
        assert_eq!(unescape_quoted(r#""back\\slash""#), r"back\\slash");
        assert_eq!(unescape_quoted(r#""""#), "");
        assert_eq!(unescape_quoted("'héllo'"), "héllo");
    }

    fn atoms(src: &str) -> Result<Vec<String>, SyntaxError> {
        let toks = lex(src).unwrap();
        let mut p = Parser::new(&toks);
        let xs = p.comma_sep(&[Tok::RParen], |p| p.cursor.expect(&[Tok::Atom]).map(|t| t.text.to_string()))?;
        p.cursor.expect(&[Tok::RParen])?;
        Ok(xs)
    }

    #[test]
    fn comma_sep_basic_and_trailing() {
        assert_eq!(atoms(")").unwrap(), Vec::<String>::new());
        assert_eq!(atoms("A)").unwrap(), vec!["A"]);
        assert_eq!(atoms("A, B, C)").unwrap(), vec!["A", "B", "C"]);
        assert_eq!(atoms("A, B,)").unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn comma_sep_rejects_stray_commas() {
        assert!(matches!(atoms(",A)"), Err(SyntaxError::Unexpected { found: Tok::Comma, .. })));
        assert!(matches!(atoms("A,,B)"), Err(SyntaxError::Unexpected { found: Tok::Comma, .. })));
        assert!(matches!(atoms(",)"), Err(SyntaxError::Unexpected { found: Tok::Comma, .. })));
    }

    #[test]
    fn comma_sep_needs_separator() {
        let err = atoms("A B)").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Unexpected {
                expected: Expected::Tokens(vec![Tok::Comma]),
                found: Tok::Atom,
                text: "B".into(),
                span: trs_ast::span::Span::new(2, 1),
            }
        );
    }

    #[test]
    fn comma_sep_stops_at_end_of_input() {
        let err = atoms("A,").unwrap_err();
        assert_eq!(err, SyntaxError::UnexpectedEof { expected: Expected::Tokens(vec![Tok::RParen]) });
    }

    #[test]
    fn nesting_limit() {
        let toks = lex("A").unwrap();
        let mut p = Parser::with_config(&toks, ParserConfig { max_depth: 2 });
        let r = p.nested(|p| p.nested(|p| p.nested(|_| Ok(()))));
        assert_eq!(r, Err(SyntaxError::TooDeep { limit: 2, span: trs_ast::span::Span::new(0, 1) }));
        // depth is restored after the failure
        assert_eq!(p.nested(|p| p.nested(|_| Ok(1))), Ok(1));
    }
}
