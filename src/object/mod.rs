use crate::ast;
use crate::environment::Environment;
use std::fmt::{self, Display, Formatter};

mod eval_error;
pub use eval_error::EvalError;

pub type Result<T> = std::result::Result<T, EvalError>;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Function(FunctionObject),
    /// Carries a `return` up to the enclosing call. Never escapes a call
    /// or the top-level program.
    ReturnValue(Box<Object>),
    Integer(i64),
    Boolean(bool),
    Null,
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Function(func) => write!(f, "{}", func),
            Self::ReturnValue(obj) => write!(f, "{}", obj),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Null => write!(f, "null"),
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        NULL
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        if b {
            TRUE
        } else {
            FALSE
        }
    }
}

impl From<FunctionObject> for Object {
    fn from(f: FunctionObject) -> Self {
        Self::Function(f)
    }
}

impl Object {
    pub fn is_return_value(&self) -> bool {
        matches!(self, Self::ReturnValue(_))
    }

    pub fn unwrap_return(self) -> Self {
        match self {
            Self::ReturnValue(o) => *o,
            obj => obj,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Function(_) => "FUNCTION",
            Self::ReturnValue(o) => o.type_name(),
            Self::Boolean(_) => "BOOLEAN",
            Self::Integer(_) => "INTEGER",
            Self::Null => "NULL",
        }
    }

    /// `false`, `null` and `0` are falsy; everything else is truthy.
    pub fn truth_value(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Null => false,
            Self::Integer(n) => *n != 0,
            Self::ReturnValue(o) => o.truth_value(),
            Self::Function(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionObject {
    pub parameters: Vec<ast::Identifier>,
    pub body: ast::BlockStatement,
    pub env: Environment,
}

impl Display for FunctionObject {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let identifier_names: Vec<String> = self
            .parameters
            .iter()
            .map(ast::Identifier::to_string)
            .collect();

        write!(f, "fn({}){}", identifier_names.join(", "), self.body)
    }
}
