use crate::token::TokenType;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedToken{expected: TokenType, got: TokenType} = "expected next token to be {expected}, got {got} instead",
    NoPrefixParser{token_type: TokenType} = "no prefix parse function for {token_type} found",
    InvalidInteger{literal: String} = "could not parse {literal} as integer",
}
