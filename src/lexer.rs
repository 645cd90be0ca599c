use crate::token::Token;

pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}

impl Lexer {
    pub fn new(input: String) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        *self.input.as_bytes().get(self.read_position).unwrap_or(&0)
    }

    /// Picks `double` and consumes the lookahead when the next byte is `=`.
    fn with_equals(&mut self, single: Token, double: Token) -> Token {
        if self.peek_char() == b'=' {
            self.read_char();
            double
        } else {
            single
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            b'=' => self.with_equals(Token::Assign, Token::Eq),
            b'!' => self.with_equals(Token::Bang, Token::NotEq),
            b'<' => self.with_equals(Token::LT, Token::LtEq),
            b'>' => self.with_equals(Token::GT, Token::GtEq),
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Asterisk,
            b'/' => Token::Slash,
            b';' => Token::Semicolon,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b',' => Token::Comma,
            b'{' => Token::LBrace,
            b'}' => Token::RBrace,
            // Stay parked on the end of input so every later call is Eof too.
            0 if self.at_end() => return Token::Eof,
            c => {
                if is_letter(c) {
                    return self.read_identifier().into();
                } else if c.is_ascii_digit() {
                    return Token::Int(self.read_number().to_owned());
                } else {
                    Token::Illegal(c)
                }
            }
        };
        self.read_char();
        token
    }

    /// The token `next_token` would return, without consuming it.
    pub fn peek_token(&mut self) -> Token {
        let (position, read_position, ch) = (self.position, self.read_position, self.ch);
        let token = self.next_token();
        self.position = position;
        self.read_position = read_position;
        self.ch = ch;
        token
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn read_identifier(&mut self) -> &str {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self) -> &str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_ascii_whitespace() {
            self.read_char();
        }
    }
}
