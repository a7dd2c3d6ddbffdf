use super::*;

use lispy_ir::Expr;

use crate::EvalErrorKind;

#[test]
fn builder_defaults() {
    let interpreter = Interpreter::new();
    assert_eq!(interpreter.max_call_depth(), DEFAULT_MAX_CALL_DEPTH);
    assert!(interpreter.env().is_global_scope());

    let interpreter = Interpreter::builder().max_call_depth(None).build();
    assert_eq!(interpreter.max_call_depth(), DEFAULT_MAX_CALL_DEPTH);
}

#[test]
fn builder_sets_call_depth() {
    let interpreter = Interpreter::builder().max_call_depth(Some(12)).build();
    assert_eq!(interpreter.max_call_depth(), 12);
}

#[test]
fn builder_accepts_prepared_environment() {
    let mut env = Environment::new();
    env.assign(Name::from("seed"), Binding::Value(Value::Int(4)));

    let mut interpreter = Interpreter::builder().env(env).build();
    assert_eq!(interpreter.eval(&Expr::symbol("seed")), Ok(Value::Int(4)));
}

#[test]
fn scoped_guard_pops_on_drop() {
    let mut interpreter = Interpreter::new();
    {
        let scoped = interpreter.scoped();
        assert_eq!(scoped.env().depth(), 2);
    }
    assert_eq!(interpreter.env().depth(), 1);
}

#[test]
fn with_bindings_scopes_the_bindings() {
    let mut interpreter = Interpreter::new();
    let bindings = vec![(Name::from("a"), Binding::Value(Value::Int(1)))];

    let result = interpreter.with_bindings(bindings, |scoped| {
        assert_eq!(scoped.env().depth(), 2);
        scoped.eval(&Expr::operator("+", vec![Expr::symbol("a"), Expr::int(1)]))
    });

    assert_eq!(result, Ok(Value::Int(2)));
    assert!(interpreter.env().is_global_scope());
    assert!(matches!(
        interpreter.eval(&Expr::symbol("a")).unwrap_err().kind,
        EvalErrorKind::UndefinedSymbol { .. }
    ));
}

#[test]
fn scope_popped_when_body_fails() {
    let mut interpreter = Interpreter::new();
    let result = interpreter.with_env_scope(|scoped| scoped.eval(&Expr::symbol("missing")));
    assert!(result.is_err());
    assert!(interpreter.env().is_global_scope());
}

#[test]
fn unknown_operator_token() {
    let mut interpreter = Interpreter::new();
    let expr = Expr::operator("~", vec![Expr::int(1)]);
    assert_eq!(
        interpreter.eval(&expr).unwrap_err().kind,
        EvalErrorKind::UnknownOperator {
            token: "~".to_string()
        }
    );
}

#[test]
fn empty_operator_application() {
    let mut interpreter = Interpreter::new();
    let expr = Expr::operator("+", vec![]);
    assert_eq!(
        interpreter.eval(&expr).unwrap_err().kind,
        EvalErrorKind::ArityMismatch {
            name: "+".to_string(),
            expected: 1,
            got: 0,
        }
    );
}

#[test]
fn definition_registers_in_innermost_frame() {
    let mut interpreter = Interpreter::new();
    let def = Expr::definition("local", &[], Expr::int(1));

    interpreter.with_env_scope(|scoped| {
        let echo = scoped.eval(&def).unwrap();
        assert_eq!(echo.to_string(), "<FUNCTION: local>");
        assert_eq!(scoped.eval(&Expr::invocation("local", vec![])), Ok(Value::Int(1)));
    });

    assert!(matches!(
        interpreter
            .eval(&Expr::invocation("local", vec![]))
            .unwrap_err()
            .kind,
        EvalErrorKind::UndefinedSymbol { .. }
    ));
}

#[test]
fn eval_program_returns_last_value() {
    let mut interpreter = Interpreter::new();
    let forms = vec![
        Expr::let_binding("x", Expr::int(2)),
        Expr::operator("*", vec![Expr::symbol("x"), Expr::int(21)]),
    ];
    assert_eq!(interpreter.eval_program(&forms), Ok(Some(Value::Int(42))));
    assert_eq!(interpreter.eval_program(&[]), Ok(None));
}

#[test]
fn invocation_placeholder_reads_caller_binding() {
    let mut interpreter = Interpreter::new();
    let forms = vec![
        Expr::let_binding("x", Expr::int(7)),
        Expr::definition("f", &["x"], Expr::symbol("x")),
        Expr::invocation("f", vec![Expr::symbol("x")]),
    ];
    assert_eq!(interpreter.eval_program(&forms), Ok(Some(Value::Int(7))));
}

#[test]
fn invocation_checks_arity_before_evaluating_arguments() {
    let mut interpreter = Interpreter::new();
    interpreter
        .eval(&Expr::definition("f", &["a", "b"], Expr::symbol("a")))
        .unwrap();

    let call = Expr::invocation("f", vec![Expr::symbol("unbound")]);
    assert_eq!(
        interpreter.eval(&call).unwrap_err().kind,
        EvalErrorKind::ArityMismatch {
            name: "f".to_string(),
            expected: 2,
            got: 1,
        }
    );
}
