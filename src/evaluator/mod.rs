
use crate::ast::{self, Expression, Node, Operator, Statement};
use crate::environment::Environment;
use crate::object::{EvalError, FunctionObject, Object, Result, NULL};
use crate::stack::ensure_sufficient_stack;

/// Deepest chain of active function calls before evaluation gives up with
/// `EvalError::StackOverflow`.
pub const MAX_CALL_DEPTH: usize = 10_000;

/// Evaluates a child expression, handing a pending `return` straight back
/// to the caller. Errors are relayed by `?`.
macro_rules! try_eval {
    ($expr:expr, $env:expr) => {
        match eval_expression($expr, $env)? {
            obj if obj.is_return_value() => return Ok(obj),
            obj => obj,
        }
    };
}

/// Evaluates `node` in `env`.
///
/// `Ok` carries either a plain value or, below the program level, an
/// `Object::ReturnValue` still looking for its call boundary. `Err` carries
/// a runtime error; nothing after it is evaluated.
pub fn eval(node: Node, env: &Environment) -> Result<Object> {
    match node {
        Node::Program(program) => eval_program(program, env),
        Node::Statement(stmt) => eval_statement(stmt, env),
        Node::Expression(expr) => eval_expression(expr, env),
    }
}

fn eval_program(program: &ast::Program, env: &Environment) -> Result<Object> {
    let mut result = NULL;
    for stmt in program.statements.iter() {
        result = eval_statement(stmt, env)?;
        if result.is_return_value() {
            return Ok(result.unwrap_return());
        }
    }
    Ok(result)
}

fn eval_block_statement(block: &ast::BlockStatement, env: &Environment) -> Result<Object> {
    let mut result = NULL;
    for stmt in block.statements.iter() {
        result = eval_statement(stmt, env)?;
        if result.is_return_value() {
            return Ok(result);
        }
    }
    Ok(result)
}

fn eval_statement(stmt: &Statement, env: &Environment) -> Result<Object> {
    match stmt {
        Statement::Expr(stmt) => eval_expression(&stmt.expression, env),
        Statement::Let(stmt) => {
            let value = try_eval!(&stmt.value, env);
            env.set(&stmt.name.value, value);
            Ok(NULL)
        }
        Statement::Return(stmt) => {
            let value = match &stmt.return_value {
                Some(expr) => try_eval!(expr, env),
                None => NULL,
            };
            Ok(Object::ReturnValue(Box::new(value)))
        }
    }
}

fn eval_expression(expr: &Expression, env: &Environment) -> Result<Object> {
    ensure_sufficient_stack(|| match expr {
        Expression::Identifier(id) => eval_identifier(id, env),
        Expression::IntegerLiteral(n) => Ok(Object::Integer(*n)),
        Expression::Boolean(b) => Ok(b.0.into()),
        Expression::Prefix(prefix) => {
            let right = try_eval!(&prefix.right, env);
            eval_prefix_expression(prefix.operator, right)
        }
        Expression::Infix(infix) => {
            let left = try_eval!(&infix.left, env);
            let right = try_eval!(&infix.right, env);
            eval_infix_expression(infix.operator, left, right)
        }
        Expression::If(if_expr) => eval_if_expression(if_expr, env),
        Expression::Function(func) => Ok(FunctionObject {
            parameters: func.parameters.clone(),
            body: func.body.clone(),
            env: env.clone(),
        }
        .into()),
        Expression::Call(call) => eval_call_expression(call, env),
    })
}

fn eval_identifier(id: &ast::Identifier, env: &Environment) -> Result<Object> {
    env.get(&id.value)
        .ok_or_else(|| EvalError::IdentifierNotFound {
            id: id.value.clone(),
        })
}

fn eval_prefix_expression(operator: Operator, right: Object) -> Result<Object> {
    match operator {
        Operator::Bang => Ok((!right.truth_value()).into()),
        Operator::Minus => eval_prefix_minus_operator(right),
        _ => Err(EvalError::UnknownPrefixOperator {
            operator,
            operand: right.type_name(),
        }),
    }
}

fn eval_prefix_minus_operator(right: Object) -> Result<Object> {
    match right {
        Object::Integer(n) => Ok(Object::Integer(n.wrapping_neg())),
        obj => Err(EvalError::UnknownPrefixOperator {
            operator: Operator::Minus,
            operand: obj.type_name(),
        }),
    }
}

fn eval_infix_expression(operator: Operator, left: Object, right: Object) -> Result<Object> {
    match (left, right) {
        (Object::Integer(x), Object::Integer(y)) => eval_integer_infix_expression(operator, x, y),
        (Object::Boolean(x), Object::Boolean(y)) => eval_boolean_infix_expression(operator, x, y),
        (left, right) => Err(EvalError::binary_op_error(
            left.type_name(),
            operator,
            right.type_name(),
        )),
    }
}

fn eval_integer_infix_expression(operator: Operator, left: i64, right: i64) -> Result<Object> {
    Ok(match operator {
        Operator::Plus => Object::Integer(left.wrapping_add(right)),
        Operator::Minus => Object::Integer(left.wrapping_sub(right)),
        Operator::Asterisk => Object::Integer(left.wrapping_mul(right)),
        Operator::Slash => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Object::Integer(left.wrapping_div(right))
        }
        Operator::LT => (left < right).into(),
        Operator::GT => (left > right).into(),
        Operator::LtEq => (left <= right).into(),
        Operator::GtEq => (left >= right).into(),
        Operator::Eq => (left == right).into(),
        Operator::NotEq => (left != right).into(),
        Operator::Bang => {
            return Err(EvalError::binary_op_error("INTEGER", operator, "INTEGER"));
        }
    })
}

fn eval_boolean_infix_expression(operator: Operator, left: bool, right: bool) -> Result<Object> {
    match operator {
        Operator::Eq => Ok((left == right).into()),
        Operator::NotEq => Ok((left != right).into()),
        _ => Err(EvalError::binary_op_error("BOOLEAN", operator, "BOOLEAN")),
    }
}

fn eval_if_expression(if_expr: &ast::IfExpression, env: &Environment) -> Result<Object> {
    let condition = try_eval!(&if_expr.condition, env);

    if let Object::Null = condition {
        Ok(NULL)
    } else if condition.truth_value() {
        eval_block_statement(&if_expr.consequence, env)
    } else if let Some(alternative) = &if_expr.alternative {
        eval_block_statement(alternative, env)
    } else {
        Ok(NULL)
    }
}

fn eval_call_expression(call: &ast::CallExpression, env: &Environment) -> Result<Object> {
    let function = match try_eval!(&call.function, env) {
        Object::Function(function) => function,
        obj => {
            return Err(EvalError::NotAFunction {
                type_name: obj.type_name(),
            })
        }
    };

    let mut arguments = Vec::with_capacity(call.arguments.len());
    for argument in call.arguments.iter() {
        arguments.push(try_eval!(argument, env));
    }

    apply_function(&function, arguments, env.call_depth() + 1)
}

#[tracing::instrument(level = "debug", skip(function, arguments), fields(arity = arguments.len()))]
fn apply_function(
    function: &FunctionObject,
    arguments: Vec<Object>,
    depth: usize,
) -> Result<Object> {
    if depth > MAX_CALL_DEPTH {
        return Err(EvalError::StackOverflow {
            depth: MAX_CALL_DEPTH,
        });
    }
    if arguments.len() != function.parameters.len() {
        return Err(EvalError::IncorrectArity {
            got: arguments.len(),
            want: function.parameters.len(),
        });
    }

    // Enclose the defining scope, not the caller's.
    let call_env = Environment::new_call(&function.env, depth);
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        call_env.set(&parameter.value, argument);
    }

    let result = eval_block_statement(&function.body, &call_env)?;
    tracing::trace!(%result, "function returned");
    Ok(result.unwrap_return())
}
