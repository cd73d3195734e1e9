//! Recursive-descent parser for formula expressions.
//!
//! ```text
//! Expression     ::= Comparison
//! Comparison     ::= Concat ( ( "=" | "<>" | "<" | "<=" | ">" | ">=" ) Concat )*
//! Concat         ::= Addition ( "&" Addition )*
//! Addition       ::= Multiplication ( ( "+" | "-" ) Multiplication )*
//! Multiplication ::= Unary ( ( "*" | "/" ) Unary )*
//! Unary          ::= ( "+" | "-" ) Unary | Primary
//! Primary        ::= Number | Text | CellRef | Range | FunctionCall | "(" Expression ")"
//! FunctionCall   ::= Identifier "(" ( Expression ( "," Expression )* )? ")"
//! Range          ::= CellRef ":" CellRef
//! ```
//!
//! All binary operators are left-associative. Nesting (parentheses, unary
//! operators, calls) is bounded by [`EvalOptions::max_depth`], and a call
//! inside another call's arguments is rejected unless
//! [`EvalOptions::nested_calls`] is set.

use super::error::{EvalError, Result};
use super::lexer::{Lexer, Spanned, Token};
use super::options::EvalOptions;
use crate::address::{Address, Range};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Text(String),
    CellRef(Address),
    Range(Range),

    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },

    FunctionCall {
        name: String,
        args: Vec<Expr>,
    },
}

impl Drop for Expr {
    // Long operator chains are as deep as they are long; unlink children
    // onto a heap stack instead of letting the default drop recurse.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);
        while let Some(mut expr) = stack.pop() {
            expr.take_children(&mut stack);
        }
    }
}

impl Expr {
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            Expr::Unary { operand, .. } => {
                out.push(std::mem::replace(&mut **operand, Expr::Number(0.0)));
            }
            Expr::Binary { left, right, .. } => {
                out.push(std::mem::replace(&mut **left, Expr::Number(0.0)));
                out.push(std::mem::replace(&mut **right, Expr::Number(0.0)));
            }
            Expr::FunctionCall { args, .. } => out.append(args),
            Expr::Number(_) | Expr::Text(_) | Expr::CellRef(_) | Expr::Range(_) => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    Concat,

    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

pub struct Parser<'o> {
    tokens: Vec<Spanned>,
    position: usize,
    options: &'o EvalOptions,
    depth: usize,
    call_depth: usize,
}

impl<'o> Parser<'o> {
    /// Tokenize `input` and prepare to parse it.
    pub fn new(input: &str, options: &'o EvalOptions) -> Result<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            options,
            depth: 0,
            call_depth: 0,
        })
    }

    /// Parse a complete expression; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Expr> {
        let expr = self.parse_comparison()?;
        if self.current() != &Token::Eof {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    fn current(&self) -> &Token {
        // tokenize() always ends with Eof and we never advance past it.
        &self.tokens[self.position.min(self.tokens.len() - 1)].token
    }

    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    fn unexpected(&self) -> EvalError {
        let spanned = &self.tokens[self.position.min(self.tokens.len() - 1)];
        EvalError::UnexpectedToken(format!("{} at offset {}", spanned.token, spanned.offset))
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        if *self.current() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(EvalError::TooDeep {
                max: self.options.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut left = self.parse_concat()?;
        loop {
            let operator = match self.current() {
                Token::Equal => BinaryOp::Equal,
                Token::NotEqual => BinaryOp::NotEqual,
                Token::Less => BinaryOp::Less,
                Token::LessEqual => BinaryOp::LessEqual,
                Token::Greater => BinaryOp::Greater,
                Token::GreaterEqual => BinaryOp::GreaterEqual,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_concat()?;
            left = binary(left, operator, right);
        }
    }

    fn parse_concat(&mut self) -> Result<Expr> {
        let mut left = self.parse_addition()?;
        while self.current() == &Token::Ampersand {
            self.advance();
            let right = self.parse_addition()?;
            left = binary(left, BinaryOp::Concat, right);
        }
        Ok(left)
    }

    fn parse_addition(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplication()?;
        loop {
            let operator = match self.current() {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_multiplication()?;
            left = binary(left, operator, right);
        }
    }

    fn parse_multiplication(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let operator = match self.current() {
                Token::Star => BinaryOp::Multiply,
                Token::Slash => BinaryOp::Divide,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(left, operator, right);
        }
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let operator = match self.current() {
            Token::Plus => UnaryOp::Plus,
            Token::Minus => UnaryOp::Minus,
            _ => return self.parse_primary(),
        };
        self.advance();
        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();
        Ok(Expr::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.current().clone() {
            Token::Number(value) => {
                self.advance();
                Ok(Expr::Number(value))
            }
            Token::Text(text) => {
                self.advance();
                Ok(Expr::Text(text))
            }
            Token::CellRef(start) => {
                self.advance();
                if self.current() != &Token::Colon {
                    return Ok(Expr::CellRef(start));
                }
                self.advance();
                match self.current().clone() {
                    Token::CellRef(end) => {
                        self.advance();
                        Ok(Expr::Range(Range::new(start, end)))
                    }
                    _ => Err(self.unexpected()),
                }
            }
            Token::Ident(name) => {
                self.advance();
                if self.current() != &Token::LeftParen {
                    return Err(EvalError::UnknownName(name));
                }
                self.advance();
                self.parse_call(name)
            }
            Token::LeftParen => {
                self.advance();
                self.enter()?;
                let expr = self.parse_comparison()?;
                self.leave();
                self.expect(Token::RightParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Arguments of `name(`; the opening parenthesis is already consumed.
    fn parse_call(&mut self, name: String) -> Result<Expr> {
        if self.call_depth > 0 && !self.options.nested_calls {
            return Err(EvalError::NestedCall(name));
        }
        self.enter()?;
        self.call_depth += 1;

        let mut args = Vec::new();
        if self.current() != &Token::RightParen {
            args.push(self.parse_comparison()?);
            while self.current() == &Token::Comma {
                self.advance();
                args.push(self.parse_comparison()?);
            }
        }
        self.expect(Token::RightParen)?;

        self.call_depth -= 1;
        self.leave();
        Ok(Expr::FunctionCall { name, args })
    }
}

fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

/// Parse an expression (without the leading `=`).
pub fn parse_expression(input: &str, options: &EvalOptions) -> Result<Expr> {
    Parser::new(input, options)?.parse()
}
