use crate::token::TokenType;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Binding power of an operator, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

lazy_static! {
    static ref PRECEDENCES: HashMap<TokenType, Precedence> = vec![
        (TokenType::Eq, Precedence::Equals),
        (TokenType::NotEq, Precedence::Equals),
        (TokenType::LT, Precedence::LessGreater),
        (TokenType::GT, Precedence::LessGreater),
        (TokenType::LtEq, Precedence::LessGreater),
        (TokenType::GtEq, Precedence::LessGreater),
        (TokenType::Plus, Precedence::Sum),
        (TokenType::Minus, Precedence::Sum),
        (TokenType::Asterisk, Precedence::Product),
        (TokenType::Slash, Precedence::Product),
        (TokenType::LParen, Precedence::Call),
    ]
    .into_iter()
    .collect();
}

impl From<TokenType> for Precedence {
    fn from(token_type: TokenType) -> Self {
        PRECEDENCES
            .get(&token_type)
            .copied()
            .unwrap_or(Precedence::Lowest)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Precedence::Lowest < Precedence::Equals);
        assert!(Precedence::Sum < Precedence::Product);
        assert!(Precedence::Prefix < Precedence::Call);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Precedence::from(TokenType::GtEq), Precedence::LessGreater);
        assert_eq!(Precedence::from(TokenType::LParen), Precedence::Call);
        assert_eq!(Precedence::from(TokenType::Semicolon), Precedence::Lowest);
    }
}
