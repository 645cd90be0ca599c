use strum_macros::{Display, EnumDiscriminants};

#[derive(Debug, Display, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(derive(Hash, Display))]
#[strum_discriminants(name(TokenType))]
pub enum Token {
    Illegal(u8),
    Eof,

    // Identifiers and literals
    Ident(String),
    Int(String),

    // Operators
    Assign,
    Plus,
    Minus,
    Slash,
    Asterisk,
    Bang,
    LT,
    GT,
    LtEq,
    GtEq,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Semicolon,

    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Else,
    False,
    Function,
    If,
    Let,
    Return,
    True,
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        match text {
            "let" => Self::Let,
            "fn" => Self::Function,
            "if" => Self::If,
            "return" => Self::Return,
            "true" => Self::True,
            "else" => Self::Else,
            "false" => Self::False,
            identifier => Self::Ident(identifier.to_owned()),
        }
    }
}

impl Token {
    pub fn is(&self, token_type: TokenType) -> bool {
        TokenType::from(self) == token_type
    }

    pub fn token_type(&self) -> TokenType {
        self.into()
    }

    /// The exact source text this token was scanned from.
    pub fn literal(&self) -> String {
        match self {
            Self::Illegal(c) => (*c as char).to_string(),
            Self::Eof => String::new(),
            Self::Ident(s) | Self::Int(s) => s.clone(),
            Self::Assign => "=".to_owned(),
            Self::Plus => "+".to_owned(),
            Self::Minus => "-".to_owned(),
            Self::Slash => "/".to_owned(),
            Self::Asterisk => "*".to_owned(),
            Self::Bang => "!".to_owned(),
            Self::LT => "<".to_owned(),
            Self::GT => ">".to_owned(),
            Self::LtEq => "<=".to_owned(),
            Self::GtEq => ">=".to_owned(),
            Self::Eq => "==".to_owned(),
            Self::NotEq => "!=".to_owned(),
            Self::Comma => ",".to_owned(),
            Self::Semicolon => ";".to_owned(),
            Self::LParen => "(".to_owned(),
            Self::RParen => ")".to_owned(),
            Self::LBrace => "{".to_owned(),
            Self::RBrace => "}".to_owned(),
            Self::Else => "else".to_owned(),
            Self::False => "false".to_owned(),
            Self::Function => "fn".to_owned(),
            Self::If => "if".to_owned(),
            Self::Let => "let".to_owned(),
            Self::Return => "return".to_owned(),
            Self::True => "true".to_owned(),
        }
    }
}
