use crate::ast::{Node, Program, Statement};
use crate::environment::Environment;
use crate::evaluator;
use crate::object::{EvalError, Object};
use crate::parser::ParseError;
use custom_error::custom_error;
use std::env;
use std::io::{self, BufRead, Write};

static PROMPT: &str = ">> ";

custom_error! {
    pub RunError

    Parse{errors: Vec<ParseError>} = @{
        errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    },
    Eval{source: EvalError} = "ERROR: {source}",
}

/// The prompt, overridable through `MONKEY_PROMPT`.
pub fn prompt() -> String {
    env::var("MONKEY_PROMPT").unwrap_or_else(|_| PROMPT.to_owned())
}

/// Parses and evaluates a complete source text in `env`.
///
/// A program with parse errors is never evaluated.
pub fn run_source(source: &str, env: &Environment) -> Result<Object, RunError> {
    let program = crate::parse(source).map_err(|errors| RunError::Parse { errors })?;
    Ok(evaluator::eval(Node::from(&program), env)?)
}

/// Reads lines from `input` until it is exhausted, evaluating each one in a
/// single session environment so bindings carry over between lines.
pub fn start<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
    let env = Environment::new();
    let prompt = prompt();
    let mut lines = input.lines();

    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        match crate::parse(&line) {
            Err(errors) => {
                writeln!(output, "You wrote some really bad code!")?;
                writeln!(output, " parser errors:")?;
                for err in errors.iter() {
                    writeln!(output, "\t{}", err)?;
                }
            }
            Ok(program) => match eval_line(&program, &env) {
                Ok(Some(val)) => writeln!(output, "{}", val)?,
                Ok(None) => {}
                Err(err) => writeln!(output, "ERROR: {}", err)?,
            },
        }
    }
}

/// Evaluates one line's statements in order. `None` means there is
/// nothing to echo: the line was empty or evaluation finished on a `let`.
fn eval_line(program: &Program, env: &Environment) -> Result<Option<Object>, EvalError> {
    let mut result = None;
    for stmt in program.statements.iter() {
        let value = evaluator::eval(Node::from(stmt), env)?;
        if value.is_return_value() {
            return Ok(Some(value.unwrap_return()));
        }
        result = match stmt {
            Statement::Let(_) => None,
            _ => Some(value),
        };
    }
    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;

    fn session(input: &str) -> String {
        let mut output = Vec::new();
        start(input.as_bytes(), &mut output).expect("writing to a Vec cannot fail");
        String::from_utf8(output).expect("repl output is utf-8")
    }

    #[test]
    fn test_bindings_persist_between_lines() {
        let output = session("let x = 5;\nlet f = fn(y) { x * y };\nf(3)\n");

        assert_eq!(output.replace(&prompt(), ""), "15\n");
    }

    #[test]
    fn test_reports_errors() {
        let output = session("let = 1;\n1 + true\n");

        assert_eq!(
            output.replace(&prompt(), ""),
            "You wrote some really bad code!\n parser errors:\n\texpected next token to be Ident, got Assign instead\nERROR: type mismatch: INTEGER + BOOLEAN\n"
        );
    }

    #[test]
    fn test_echo_follows_evaluation() {
        let output = session("return 5; let x = 1;\nlet y = 2; y\nlet z = 3;\n\nx\n");

        assert_eq!(
            output.replace(&prompt(), ""),
            "5\n2\nERROR: identifier not found: x\n"
        );
    }

    #[test]
    fn test_echo_of_return_inside_if() {
        let output = session("if (true) { return 7; }; let w = 1;\nw\n");

        assert_eq!(
            output.replace(&prompt(), ""),
            "7\nERROR: identifier not found: w\n"
        );
    }

    #[test]
    fn test_run_source() {
        let env = Environment::new();

        assert_eq!(run_source("let a = 2; a * 21", &env).ok(), Some(Object::Integer(42)));
        assert_eq!(env.get("a"), Some(Object::Integer(2)));
        match run_source("let x 5; let y 6;", &env) {
            Err(RunError::Parse { errors }) => assert_eq!(errors.len(), 2),
            other => panic!("expected parse errors, got {:?}", other),
        }
        match run_source("nope", &env) {
            Err(err) => assert_eq!(err.to_string(), "ERROR: identifier not found: nope"),
            Ok(obj) => panic!("expected an error, got {}", obj),
        }
    }
}
