use super::*;
use lispy_lexer::LexError;
use pretty_assertions::assert_eq;

fn parse_one(source: &str) -> Expr {
    let mut forms = parse(source).unwrap();
    assert_eq!(forms.len(), 1, "expected a single form in {source:?}");
    forms.remove(0)
}

#[test]
fn test_operator_application() {
    assert_eq!(
        parse_one("(+ 1 2 3)"),
        Expr::operator("+", vec![Expr::int(1), Expr::int(2), Expr::int(3)])
    );
}

#[test]
fn test_logical_keywords_are_operators() {
    assert_eq!(
        parse_one("(and TRUE FALSE)"),
        Expr::operator("and", vec![Expr::Boolean(true), Expr::Boolean(false)])
    );
}

#[test]
fn test_nested_operands() {
    assert_eq!(
        parse_one("(* 2 (- x 1.5))"),
        Expr::operator(
            "*",
            vec![
                Expr::int(2),
                Expr::operator("-", vec![Expr::symbol("x"), Expr::float(1.5)]),
            ]
        )
    );
}

#[test]
fn test_let() {
    assert_eq!(
        parse_one("(let x 10)"),
        Expr::let_binding("x", Expr::int(10))
    );
}

#[test]
fn test_definition_with_params() {
    assert_eq!(
        parse_one("(def f [a b] (+ a b))"),
        Expr::definition(
            "f",
            &["a", "b"],
            Expr::operator("+", vec![Expr::symbol("a"), Expr::symbol("b")])
        )
    );
}

#[test]
fn test_definition_without_params_and_bare_body() {
    assert_eq!(parse_one("(def k [] 42)"), Expr::definition("k", &[], Expr::int(42)));
    assert_eq!(
        parse_one("(def id [x] x)"),
        Expr::definition("id", &["x"], Expr::symbol("x"))
    );
}

#[test]
fn test_invocation() {
    assert_eq!(
        parse_one("(f 1 (g))"),
        Expr::invocation("f", vec![Expr::int(1), Expr::invocation("g", vec![])])
    );
}

#[test]
fn test_conditional() {
    assert_eq!(
        parse_one("(if (< n 2) 1 n)"),
        Expr::if_else(
            Expr::operator("<", vec![Expr::symbol("n"), Expr::int(2)]),
            Expr::int(1),
            Expr::symbol("n"),
        )
    );
}

#[test]
fn test_several_forms_per_line() {
    let forms = parse("(let x 7) (def f [x] x) (f x)").unwrap();
    assert_eq!(
        forms,
        vec![
            Expr::let_binding("x", Expr::int(7)),
            Expr::definition("f", &["x"], Expr::symbol("x")),
            Expr::invocation("f", vec![Expr::symbol("x")]),
        ]
    );
}

#[test]
fn test_bare_operands_at_top_level() {
    assert_eq!(parse("x 42").unwrap(), vec![Expr::symbol("x"), Expr::int(42)]);
    assert!(parse("").unwrap().is_empty());
}

#[test]
fn test_display_round_trip() {
    let source = "(def fact [n] (if (<= n 1) 1 (* n (fact (- n 1)))))";
    assert_eq!(parse_one(source).to_string(), source);
}

#[test]
fn test_missing_close_paren_is_incomplete() {
    let err = parse("(+ 1 2").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedEof {
            expected: "`)`",
            span: Span::point(6),
        }
    );
    assert!(err.is_incomplete());
}

#[test]
fn test_operator_needs_an_operand() {
    let err = parse("(+)").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: "an operand",
            found: "`)`".to_string(),
            span: Span::new(2, 3),
        }
    );
    assert!(!err.is_incomplete());
}

#[test]
fn test_let_requires_symbol() {
    let err = parse("(let 5 5)").unwrap_err();
    assert_eq!(err.to_string(), "expected a symbol, found number `5`");
}

#[test]
fn test_stray_close_paren() {
    let err = parse(")").unwrap_err();
    assert_eq!(err.span(), Span::new(0, 1));
}

#[test]
fn test_extra_operand_in_let() {
    let err = parse("(let x 1 2)").unwrap_err();
    assert_eq!(err.to_string(), "expected `)`, found number `2`");
}

#[test]
fn test_duplicate_parameter() {
    let err = parse("(def f [a a] a)").unwrap_err();
    assert_eq!(
        err,
        ParseError::DuplicateParameter {
            function: "f".into(),
            name: "a".into(),
            span: Span::new(10, 11),
        }
    );
}

#[test]
fn test_lex_error_passes_through() {
    let err = parse("(+ 1 $)").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Lex(LexError::UnexpectedChar { ch: '$', .. })
    ));
}

#[test]
fn test_deep_nesting() {
    let depth = 5_000;
    let source = format!("{}1{}", "(+ ".repeat(depth), ")".repeat(depth));
    let mut expr = parse_one(&source);
    let mut seen = 0;
    while let Expr::Operator { mut args, .. } = expr {
        seen += 1;
        expr = args.remove(0);
    }
    assert_eq!(seen, depth);
    assert_eq!(expr, Expr::int(1));
}
