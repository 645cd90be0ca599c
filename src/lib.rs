pub mod ast;
mod environment;
pub mod evaluator;
mod lexer;
pub mod object;
mod parser;
pub mod repl;
mod stack;
mod token;

pub use environment::Environment;
pub use lexer::Lexer;
pub use object::{EvalError, Object};
pub use parser::{ParseError, Parser};
pub use token::{Token, TokenType};

/// Parses `input`, failing with every error found if any statement is
/// malformed.
pub fn parse(input: &str) -> Result<ast::Program, Vec<ParseError>> {
    let (program, errors) = Parser::new(Lexer::new(input.to_owned())).parse_program();

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}
