mod expression;
mod statement;
pub use expression::*;
pub use statement::*;

use std::fmt::{Display, Formatter};

/// Anything the evaluator can be pointed at.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Self::Program(program)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        Self::Statement(statement)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Self::Expression(expression)
    }
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Program(program) => write!(f, "{}", program),
            Self::Statement(stmt) => write!(f, "{}", stmt),
            Self::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for stmt in self.statements.iter() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub value: String,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self { value }
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        value.to_owned().into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ident(name: &str) -> Expression {
        Expression::Identifier(name.into())
    }

    #[test]
    fn test_display() {
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                name: "myVar".into(),
                value: ident("anotherVar"),
            })],
        };

        assert_eq!(format!("{}", program), "let myVar = anotherVar;");
    }

    #[test]
    fn test_display_if_and_function() {
        let body = BlockStatement {
            statements: vec![
                Statement::Expr(ExpressionStatement {
                    expression: Expression::Infix(InfixExpression {
                        left: Box::new(ident("a")),
                        operator: Operator::Plus,
                        right: Box::new(ident("b")),
                    }),
                }),
                Statement::Return(ReturnStatement { return_value: None }),
            ],
        };
        let program = Program {
            statements: vec![
                Statement::Expr(ExpressionStatement {
                    expression: Expression::If(IfExpression {
                        condition: Box::new(Expression::Boolean(true.into())),
                        consequence: BlockStatement {
                            statements: vec![Statement::Expr(ExpressionStatement {
                                expression: Expression::IntegerLiteral(2),
                            })],
                        },
                        alternative: Some(BlockStatement::default()),
                    }),
                }),
                Statement::Let(LetStatement {
                    name: "f".into(),
                    value: Expression::Function(FunctionLiteral {
                        parameters: vec!["a".into(), "b".into()],
                        body,
                    }),
                }),
            ],
        };

        assert_eq!(
            program.to_string(),
            "if(true){ 2; }else{  };let f = fn(a, b){ (a + b);return; };"
        );
    }
}
