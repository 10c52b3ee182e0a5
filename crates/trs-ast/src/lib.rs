pub mod span {
    use serde::{Deserialize, Serialize};

    /// Byte range in the source text.
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
    pub struct Span {
        pub offset: usize,
        pub len: usize,
    }
    impl Span {
        pub fn new(offset: usize, len: usize) -> Self {
            Self { offset, len }
        }
        pub fn end(&self) -> usize {
            self.offset + self.len
        }
    }
}

pub mod ast {
    use serde::{Deserialize, Serialize};

    /// A top-level program element.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub enum Item {
        Def(Def),
        Term(Term),
    }

    /// `let name(p1, ..., pn) = body`
    ///
    /// `patterns` is empty exactly when no parameter list followed the name.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct Def {
        pub name: String,
        pub patterns: Vec<Pattern>,
        pub body: Term,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub enum Term {
        /// Compound value named by an atom. Zero children for a bare atom.
        Tree { functor: String, children: Vec<Term> },
        Var(String),
        /// Identifier applied to an argument list: `f(a, b)`
        App { op_name: String, rands: Vec<Term> },
        /// `head : tail`, right-associative
        Cons { head: Box<Term>, tail: Box<Term> },
        Str(String),
        // Kept as a literal list, never rewritten into Cons chains.
        List(Vec<Term>),
        Match { terms: Vec<Term>, clauses: Vec<MatchClause> },
    }

    impl Term {
        pub fn atom(functor: impl Into<String>) -> Self {
            Term::Tree { functor: functor.into(), children: Vec::new() }
        }
        pub fn tree(functor: impl Into<String>, children: Vec<Term>) -> Self {
            Term::Tree { functor: functor.into(), children }
        }
        pub fn var(name: impl Into<String>) -> Self {
            Term::Var(name.into())
        }
        pub fn app(op_name: impl Into<String>, rands: Vec<Term>) -> Self {
            Term::App { op_name: op_name.into(), rands }
        }
        pub fn cons(head: Term, tail: Term) -> Self {
            Term::Cons { head: Box::new(head), tail: Box::new(tail) }
        }
    }

    /// One arm of a `match`: one pattern per subject, then `=> body`.
    /// The parser does not check that the pattern count equals the subject count.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct MatchClause {
        pub patterns: Vec<Pattern>,
        pub body: Term,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub enum Pattern {
        Tree { functor: String, children: Vec<Pattern> },
        Wildcard,                                  // _
        Var(String),                               // x
        As { name: String, pattern: Box<Pattern> }, // x@p
        Cons { head: Box<Pattern>, tail: Box<Pattern> }, // h : t
        Str(String),
        List(Vec<Pattern>),
    }

    impl Pattern {
        pub fn atom(functor: impl Into<String>) -> Self {
            Pattern::Tree { functor: functor.into(), children: Vec::new() }
        }
        pub fn tree(functor: impl Into<String>, children: Vec<Pattern>) -> Self {
            Pattern::Tree { functor: functor.into(), children }
        }
        pub fn var(name: impl Into<String>) -> Self {
            Pattern::Var(name.into())
        }
        pub fn as_(name: impl Into<String>, pattern: Pattern) -> Self {
            Pattern::As { name: name.into(), pattern: Box::new(pattern) }
        }
        pub fn cons(head: Pattern, tail: Pattern) -> Self {
            Pattern::Cons { head: Box::new(head), tail: Box::new(tail) }
        }
    }
}

/// Printing back to surface syntax.
///
/// Output re-parses to the same tree, with one exception: string text ending
/// in a backslash cannot be written back, since only `\"` is ever unescaped.
pub mod pretty {
    use crate::ast::*;

    /// Whether `s` lexes as a bare (unquoted) atom.
    pub fn is_bare_atom(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => chars.all(|c| c.is_ascii_digit()),
            Some(c) if c.is_ascii_uppercase() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\'')
            }
            _ => false,
        }
    }

    fn print_functor(f: &str) -> String {
        if is_bare_atom(f) {
            f.to_string()
        } else {
            format!("'{}'", f.replace('\'', "\\'"))
        }
    }

    fn print_string(s: &str) -> String {
        format!("\"{}\"", s.replace('"', "\\\""))
    }

    fn join<T>(xs: &[T], f: fn(&T) -> String) -> String {
        xs.iter().map(f).collect::<Vec<_>>().join(", ")
    }

    pub fn print_term(t: &Term) -> String {
        match t {
            Term::Tree { functor, children } => {
                if children.is_empty() {
                    print_functor(functor)
                } else {
                    format!("{}({})", print_functor(functor), join(children, print_term))
                }
            }
            Term::Var(n) => n.clone(),
            Term::App { op_name, rands } => format!("{}({})", op_name, join(rands, print_term)),
            Term::Cons { head, tail } => {
                let h = match head.as_ref() {
                    Term::Cons { .. } => format!("({})", print_term(head)),
                    _ => print_term(head),
                };
                format!("{} : {}", h, print_term(tail))
            }
            Term::Str(s) => print_string(s),
            Term::List(xs) => format!("[{}]", join(xs, print_term)),
            Term::Match { terms, clauses } => {
                let arms = clauses
                    .iter()
                    .map(|c| format!("{} => {}", join(&c.patterns, print_pattern), print_term(&c.body)))
                    .collect::<Vec<_>>()
                    .join(", ");
                let mut out = String::from("match ");
                if !terms.is_empty() {
                    out.push_str(&join(terms, print_term));
                    out.push(' ');
                }
                if arms.is_empty() {
                    out.push_str("{ }");
                } else {
                    out.push_str(&format!("{{ {} }}", arms));
                }
                out
            }
        }
    }

    pub fn print_pattern(p: &Pattern) -> String {
        match p {
            Pattern::Tree { functor, children } => {
                if children.is_empty() {
                    print_functor(functor)
                } else {
                    format!("{}({})", print_functor(functor), join(children, print_pattern))
                }
            }
            Pattern::Wildcard => "_".into(),
            Pattern::Var(n) => n.clone(),
            Pattern::As { name, pattern } => format!("{}@{}", name, print_pattern(pattern)),
            Pattern::Cons { head, tail } => {
                // `x@h : t` would re-read as `x@(h : t)`
                let h = match head.as_ref() {
                    Pattern::Cons { .. } | Pattern::As { .. } => format!("({})", print_pattern(head)),
                    _ => print_pattern(head),
                };
                format!("{} : {}", h, print_pattern(tail))
            }
            Pattern::Str(s) => print_string(s),
            Pattern::List(xs) => format!("[{}]", join(xs, print_pattern)),
        }
    }

    pub fn print_item(item: &Item) -> String {
        match item {
            Item::Def(Def { name, patterns, body }) => {
                if patterns.is_empty() {
                    format!("let {} = {}", name, print_term(body))
                } else {
                    format!("let {}({}) = {}", name, join(patterns, print_pattern), print_term(body))
                }
            }
            Item::Term(t) => print_term(t),
        }
    }

    /// One item per line, each terminated with `;`.
    pub fn print_program(items: &[Item]) -> String {
        let mut out = String::new();
        for it in items {
            out.push_str(&print_item(it));
            out.push_str(";\n");
        }
        out
    }

}
