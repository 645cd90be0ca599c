mod error;
mod precedence;

pub use error::ParseError;
pub use precedence::Precedence;

use crate::ast::{self, Expression, Operator, Statement};
use crate::lexer::Lexer;
use crate::stack::ensure_sufficient_stack;
use crate::token::{Token, TokenType};

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

fn prefix_parse_fn(token_type: TokenType) -> Option<PrefixParseFn> {
    let parse_fn: PrefixParseFn = match token_type {
        TokenType::Ident => Parser::parse_identifier,
        TokenType::Int => Parser::parse_integer_literal,
        TokenType::True | TokenType::False => Parser::parse_boolean,
        TokenType::Bang | TokenType::Minus => Parser::parse_prefix_expression,
        TokenType::LParen => Parser::parse_grouped_expression,
        TokenType::If => Parser::parse_if_expression,
        TokenType::Function => Parser::parse_function_literal,
        _ => return None,
    };
    Some(parse_fn)
}

fn infix_parse_fn(token_type: TokenType) -> Option<InfixParseFn> {
    let parse_fn: InfixParseFn = match token_type {
        TokenType::Plus
        | TokenType::Minus
        | TokenType::Asterisk
        | TokenType::Slash
        | TokenType::LT
        | TokenType::GT
        | TokenType::LtEq
        | TokenType::GtEq
        | TokenType::Eq
        | TokenType::NotEq => Parser::parse_infix_expression,
        TokenType::LParen => Parser::parse_call_expression,
        _ => return None,
    };
    Some(parse_fn)
}

/// Pratt parser over a token stream with one token of lookahead, plus a
/// peek one further for the `;` an if-expression may carry.
///
/// Errors never stop the parse: a failed statement is recorded, the
/// parser skips to the next `;` and carries on, so one pass reports
/// every independent problem it can find.
pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        Self {
            lexer,
            cur_token,
            peek_token,
            errors: vec![],
        }
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    /// Parses the whole input. The program holds every statement that
    /// could be recovered; it is only safe to evaluate when the error
    /// list is empty.
    pub fn parse_program(mut self) -> (ast::Program, Vec<ParseError>) {
        let mut program = ast::Program::default();

        while !self.cur_token.is(TokenType::Eof) {
            if !self.cur_token.is(TokenType::Semicolon) {
                match self.parse_statement() {
                    Some(stmt) => program.statements.push(stmt),
                    None => self.synchronize(),
                }
            }
            self.next_token();
        }

        (program, self.errors)
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type() {
            TokenType::Let => self.parse_let_statement().map(Statement::Let),
            TokenType::Return => self.parse_return_statement().map(Statement::Return),
            _ => self
                .parse_expression_statement()
                .map(Statement::Expr),
        }
    }

    fn parse_let_statement(&mut self) -> Option<ast::LetStatement> {
        let name = self.expect_peek_ident()?;
        self.expect_peek(TokenType::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_peek(TokenType::Semicolon);

        Some(ast::LetStatement { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ast::ReturnStatement> {
        let return_value = if self.peek_token.is(TokenType::Semicolon)
            || self.peek_token.is(TokenType::RBrace)
            || self.peek_token.is(TokenType::Eof)
        {
            None
        } else {
            self.next_token();
            Some(self.parse_expression(Precedence::Lowest)?)
        };
        self.skip_peek(TokenType::Semicolon);

        Some(ast::ReturnStatement { return_value })
    }

    fn parse_expression_statement(&mut self) -> Option<ast::ExpressionStatement> {
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_peek(TokenType::Semicolon);

        Some(ast::ExpressionStatement { expression })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        ensure_sufficient_stack(|| {
            let token_type = self.cur_token.token_type();
            let prefix = match prefix_parse_fn(token_type) {
                Some(prefix) => prefix,
                None => {
                    self.push_error(ParseError::NoPrefixParser { token_type });
                    return None;
                }
            };
            let mut left = prefix(self)?;

            while precedence < self.peek_precedence() {
                let infix = match infix_parse_fn(self.peek_token.token_type()) {
                    Some(infix) => infix,
                    None => return Some(left),
                };
                self.next_token();
                left = infix(self, left)?;
            }

            Some(left)
        })
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        match &self.cur_token {
            Token::Ident(name) => Some(Expression::Identifier(name.as_str().into())),
            _ => None,
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let literal = match &self.cur_token {
            Token::Int(literal) => literal.clone(),
            _ => return None,
        };
        match literal.parse() {
            Ok(value) => Some(Expression::IntegerLiteral(value)),
            Err(_) => {
                self.push_error(ParseError::InvalidInteger { literal });
                None
            }
        }
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_token.is(TokenType::True).into()))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = Operator::from_token(&self.cur_token)?;
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(ast::PrefixExpression {
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = Operator::from_token(&self.cur_token)?;
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(ast::InfixExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenType::RParen)?;

        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        self.expect_peek(TokenType::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenType::RParen)?;
        self.expect_peek(TokenType::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token.is(TokenType::Else) {
            self.next_token();
            self.expect_peek(TokenType::LBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        // A rendered if-expression carries its own `;`, which may land
        // inside a call, a group or a statement that adds another.
        if self.peek_token.is(TokenType::Semicolon)
            && matches!(
                self.lexer.peek_token(),
                Token::RParen | Token::Comma | Token::Semicolon
            )
        {
            self.next_token();
        }

        Some(Expression::If(ast::IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// Expects `cur_token` to be the opening `{` and leaves it on the
    /// closing `}`.
    fn parse_block_statement(&mut self) -> Option<ast::BlockStatement> {
        let mut block = ast::BlockStatement::default();
        self.next_token();

        while !self.cur_token.is(TokenType::RBrace) && !self.cur_token.is(TokenType::Eof) {
            if self.cur_token.is(TokenType::Semicolon) {
                self.next_token();
                continue;
            }
            match self.parse_statement() {
                Some(stmt) => block.statements.push(stmt),
                None => {
                    self.synchronize();
                    if self.cur_token.is(TokenType::RBrace) {
                        break;
                    }
                }
            }
            self.next_token();
        }

        if self.cur_token.is(TokenType::Eof) {
            self.push_error(ParseError::UnexpectedToken {
                expected: TokenType::RBrace,
                got: TokenType::Eof,
            });
            return None;
        }

        Some(block)
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        self.expect_peek(TokenType::LParen)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenType::LBrace)?;
        let body = self.parse_block_statement()?;

        Some(Expression::Function(ast::FunctionLiteral { parameters, body }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<ast::Identifier>> {
        let mut parameters = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(parameters);
        }

        parameters.push(self.expect_peek_ident()?);
        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            parameters.push(self.expect_peek_ident()?);
        }
        self.expect_peek(TokenType::RParen)?;

        Some(parameters)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_call_arguments()?;

        Some(Expression::Call(ast::CallExpression {
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(TokenType::RParen)?;

        Some(arguments)
    }

    /// Skips the rest of a statement that failed to parse. Stops on the
    /// terminating `;`, or just before a `}` so the enclosing block can
    /// still close.
    fn synchronize(&mut self) {
        while !self.cur_token.is(TokenType::Semicolon)
            && !self.cur_token.is(TokenType::RBrace)
            && !self.cur_token.is(TokenType::Eof)
            && !self.peek_token.is(TokenType::RBrace)
        {
            self.next_token();
        }
    }

    fn peek_precedence(&self) -> Precedence {
        self.peek_token.token_type().into()
    }

    fn cur_precedence(&self) -> Precedence {
        self.cur_token.token_type().into()
    }

    fn skip_peek(&mut self, token_type: TokenType) {
        if self.peek_token.is(token_type) {
            self.next_token();
        }
    }

    fn expect_peek(&mut self, expected: TokenType) -> Option<()> {
        if self.peek_token.is(expected) {
            self.next_token();
            Some(())
        } else {
            self.peek_error(expected);
            None
        }
    }

    fn expect_peek_ident(&mut self) -> Option<ast::Identifier> {
        self.expect_peek(TokenType::Ident)?;
        match &self.cur_token {
            Token::Ident(name) => Some(name.as_str().into()),
            _ => None,
        }
    }

    fn peek_error(&mut self, expected: TokenType) {
        self.push_error(ParseError::UnexpectedToken {
            expected,
            got: self.peek_token.token_type(),
        });
    }

    fn push_error(&mut self, error: ParseError) {
        tracing::debug!(%error, "parse error");
        self.errors.push(error);
    }
}
