use pretty_assertions::assert_eq;
use trs_ast::pretty::print_program;
use trs_parser::parse_source;

fn reprint(src: &str) -> String {
    let items = parse_source(src).unwrap_or_else(|e| panic!("{src:?}: {e}"));
    print_program(&items)
}

#[test]
fn printing_is_stable() {
    let src = r#"
        let map(f, []) = [];
        let map(f, h : t) = apply(f, h) : map(f, t);
        let swap(Pair(a, b)) = Pair(b, a);
        let first(all@(x@h : _)) = match all, h { _, "k" => 'it\'s', _, _ => x };
        'odd functor'(X, "q\"uote", ((a : b) : c));
        match { };
    "#;
    let once = reprint(src);
    let twice = reprint(&once);
    assert_eq!(once, twice);
    assert_eq!(parse_source(&once).unwrap(), parse_source(src).unwrap());
}

#[test]
fn canonical_layout() {
    assert_eq!(reprint("let  id ( x ) =x ;F ( ) ;"), "let id(x) = x;\nF;\n");
    assert_eq!(reprint("x:y:z;"), "x : y : z;\n");
}
