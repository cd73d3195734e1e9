//! Formula tokenizer.
//!
//! Splits the expression part of a formula (without the leading `=`) into
//! tokens. Identifiers that match the address pattern `[A-Z]+[0-9]+` become
//! [`Token::CellRef`]; every other identifier is a candidate function name.

use std::fmt;

use super::error::{EvalError, Result};
use crate::address::{Address, parse_address};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(f64),
    Text(String),
    CellRef(Address),
    Ident(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Ampersand,

    // Comparison
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,
    Colon,

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Text(s) => write!(f, "\"{}\"", s),
            Token::CellRef(a) => write!(f, "{}", a),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Ampersand => write!(f, "&"),
            Token::Equal => write!(f, "="),
            Token::NotEqual => write!(f, "<>"),
            Token::Less => write!(f, "<"),
            Token::LessEqual => write!(f, "<="),
            Token::Greater => write!(f, ">"),
            Token::GreaterEqual => write!(f, ">="),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A token plus the character offset it started at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the whole input. The last token is always [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Spanned>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let offset = self.position;
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(Spanned { token, offset });
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.input.get(self.position + ahead).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn syntax(&self, offset: usize, message: impl Into<String>) -> EvalError {
        EvalError::Syntax {
            offset,
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };

        let token = match ch {
            '0'..='9' => return self.read_number(),
            '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                return self.read_number();
            }
            'A'..='Z' | 'a'..='z' | '_' => return Ok(self.read_identifier()),
            '"' => return self.read_text(),
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '&' => Token::Ampersand,
            '=' => Token::Equal,
            '<' => match self.peek_at(1) {
                Some('=') => {
                    self.advance();
                    Token::LessEqual
                }
                Some('>') => {
                    self.advance();
                    Token::NotEqual
                }
                _ => Token::Less,
            },
            '>' => {
                if self.peek_at(1) == Some('=') {
                    self.advance();
                    Token::GreaterEqual
                } else {
                    Token::Greater
                }
            }
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            ':' => Token::Colon,
            other => {
                return Err(self.syntax(self.position, format!("unexpected character '{}'", other)));
            }
        };
        self.advance();
        Ok(token)
    }

    fn take_digits(&mut self, out: &mut String) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            out.push(c);
            self.advance();
        }
    }

    /// `digits [. digits] [e|E [+|-] digits]`, or `. digits ...`.
    fn read_number(&mut self) -> Result<Token> {
        let start = self.position;
        let mut text = String::new();
        self.take_digits(&mut text);

        if self.peek() == Some('.') {
            text.push('.');
            self.advance();
            self.take_digits(&mut text);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    text.push(self.peek().unwrap_or('e'));
                    self.advance();
                }
                self.take_digits(&mut text);
            }
        }

        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            _ => Err(self.syntax(start, format!("invalid number '{}'", text))),
        }
    }

    fn read_identifier(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(c) = self
            .peek()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        {
            ident.push(c);
            self.advance();
        }
        match parse_address(&ident) {
            Some(addr) => Token::CellRef(addr),
            None => Token::Ident(ident),
        }
    }

    /// Double-quoted text; `""` inside the quotes is a literal quote.
    fn read_text(&mut self) -> Result<Token> {
        let start = self.position;
        self.advance();
        let mut text = String::new();
        loop {
            match self.peek() {
                None => return Err(self.syntax(start, "unterminated string")),
                Some('"') if self.peek_at(1) == Some('"') => {
                    text.push('"');
                    self.advance();
                    self.advance();
                }
                Some('"') => {
                    self.advance();
                    return Ok(Token::Text(text));
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    fn cell(s: &str) -> Token {
        Token::CellRef(parse_address(s).unwrap())
    }

    #[test]
    fn test_lexer_numbers() {
        assert_eq!(
            tokens("42 2.75 .5 1e3 2E-2"),
            vec![
                Token::Number(42.0),
                Token::Number(2.75),
                Token::Number(0.5),
                Token::Number(1000.0),
                Token::Number(0.02),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_operators() {
        assert_eq!(
            tokens("+ - * / & = <> < <= > >="),
            vec![
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Ampersand,
                Token::Equal,
                Token::NotEqual,
                Token::Less,
                Token::LessEqual,
                Token::Greater,
                Token::GreaterEqual,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_identifiers_and_refs() {
        assert_eq!(
            tokens("SUM(A1:B2, AA10)"),
            vec![
                Token::Ident("SUM".into()),
                Token::LeftParen,
                cell("A1"),
                Token::Colon,
                cell("B2"),
                Token::Comma,
                cell("AA10"),
                Token::RightParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_lowercase_is_not_a_reference() {
        assert_eq!(tokens("a1"), vec![Token::Ident("a1".into()), Token::Eof]);
    }

    #[test]
    fn test_lexer_strings() {
        assert_eq!(
            tokens(r#""High" "say ""hi""" """#),
            vec![
                Token::Text("High".into()),
                Token::Text("say \"hi\"".into()),
                Token::Text(String::new()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_unterminated_string() {
        let err = Lexer::new("\"abc").tokenize().unwrap_err();
        assert!(matches!(err, EvalError::Syntax { offset: 0, .. }));
    }

    #[test]
    fn test_lexer_rejects_unknown_characters() {
        assert!(Lexer::new("1 ; 2").tokenize().is_err());
        assert!(Lexer::new("A1 ^ 2").tokenize().is_err());
    }

    #[test]
    fn test_lexer_rejects_overflowing_number() {
        assert!(Lexer::new("1e400").tokenize().is_err());
    }

    #[test]
    fn test_lexer_offsets() {
        let spans = Lexer::new("1 +  A1").tokenize().unwrap();
        let offsets: Vec<usize> = spans.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 2, 5, 7]);
    }
}
