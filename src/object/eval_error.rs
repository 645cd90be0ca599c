use crate::ast;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub EvalError

    IdentifierNotFound{id: String} = "identifier not found: {id}",
    UnknownPrefixOperator{operator: ast::Operator, operand: &'static str} = "unknown operator: {operator}{operand}",
    UnknownInfixOperator{left: &'static str, operator: ast::Operator, right: &'static str} = "unknown operator: {left} {operator} {right}",
    TypeMismatch{left: &'static str, operator: ast::Operator, right: &'static str} = "type mismatch: {left} {operator} {right}",
    NotAFunction{type_name: &'static str} = "not a function: {type_name}",
    IncorrectArity{got: usize, want: usize} = "wrong number of arguments. got={got}, want={want}",
    DivisionByZero = "division by zero",
    StackOverflow{depth: usize} = "maximum recursion depth exceeded (limit: {depth})",
}

impl EvalError {
    pub fn binary_op_error(
        left: &'static str,
        operator: ast::Operator,
        right: &'static str,
    ) -> Self {
        if left == right {
            Self::UnknownInfixOperator {
                left,
                operator,
                right,
            }
        } else {
            Self::TypeMismatch {
                left,
                operator,
                right,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EvalError::binary_op_error("INTEGER", ast::Operator::Plus, "BOOLEAN").to_string(),
            "type mismatch: INTEGER + BOOLEAN"
        );
        assert_eq!(
            EvalError::binary_op_error("BOOLEAN", ast::Operator::Plus, "BOOLEAN").to_string(),
            "unknown operator: BOOLEAN + BOOLEAN"
        );
        assert_eq!(
            EvalError::UnknownPrefixOperator {
                operator: ast::Operator::Minus,
                operand: "BOOLEAN"
            }
            .to_string(),
            "unknown operator: -BOOLEAN"
        );
        assert_eq!(
            EvalError::IncorrectArity { got: 1, want: 2 }.to_string(),
            "wrong number of arguments. got=1, want=2"
        );
        assert_eq!(
            EvalError::StackOverflow { depth: 200 }.to_string(),
            "maximum recursion depth exceeded (limit: 200)"
        );
    }
}
