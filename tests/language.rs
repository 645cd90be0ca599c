use monkey_eval::repl::{run_source, RunError};
use monkey_eval::{parse, Environment, EvalError, Object};
use pretty_assertions::assert_eq;

fn run(source: &str) -> Result<Object, RunError> {
    run_source(source, &Environment::new())
}

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(run("5 + 5 * 2").ok(), Some(Object::Integer(15)));
    assert_eq!(run("(5 + 5) * 2").ok(), Some(Object::Integer(20)));
}

#[test]
fn closures_outlive_their_defining_call() {
    let source = "let adder = fn(x){ fn(y){ x + y } }; let add5 = adder(5); add5(3);";

    assert_eq!(run(source).ok(), Some(Object::Integer(8)));
}

#[test]
fn counter_via_higher_order_functions() {
    let source = "
let twice = fn(f, x) { f(f(x)) };
let inc = fn(x) { x + 1 };
let compose = fn(f, g) { fn(x) { g(f(x)) } };
twice(compose(inc, inc), 0)
";

    assert_eq!(run(source).ok(), Some(Object::Integer(4)));
}

#[test]
fn zero_is_falsy() {
    assert_eq!(run("!0").ok(), Some(Object::Boolean(true)));
    assert_eq!(run("!5").ok(), Some(Object::Boolean(false)));
    assert_eq!(run("if (0) { 1 } else { 2 }").ok(), Some(Object::Integer(2)));
}

#[test]
fn errors_reach_the_top() {
    match run("5 + true") {
        Err(RunError::Eval { source }) => assert_eq!(
            source.to_string(),
            "type mismatch: INTEGER + BOOLEAN"
        ),
        other => panic!("unexpected result {:?}", other),
    }

    match run("foobar;") {
        Err(RunError::Eval { source }) => assert_eq!(
            source,
            EvalError::IdentifierNotFound {
                id: "foobar".to_owned()
            }
        ),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn malformed_programs_are_not_evaluated() {
    let env = Environment::new();

    match run_source("let a = 1; let b 2;", &env) {
        Err(RunError::Parse { errors }) => assert_eq!(errors.len(), 1),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(env.get("a"), None);
}

#[test]
fn session_environment_is_shared_across_runs() {
    let env = Environment::new();

    run_source("let base = 10;", &env).expect("let should evaluate");
    run_source("let add_base = fn(x) { x + base };", &env).expect("let should evaluate");

    assert_eq!(
        run_source("add_base(5)", &env).ok(),
        Some(Object::Integer(15))
    );
    let names: Vec<String> = env.bindings().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["base", "add_base"]);
}

#[test]
fn rendering_matches_source_structure() {
    let program = parse("let max = fn(a, b) { if (a > b) { a } else { b } }; max(1, 2)")
        .expect("valid program");

    assert_eq!(
        program.to_string(),
        "let max = fn(a, b){ if((a > b)){ a; }else{ b; }; };max(1, 2)"
    );
}
