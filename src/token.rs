use std::fmt::{self, Display};

use crate::literal::Literal;

/// Every kind of token the scanner can produce.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Type {
  // Single-character tokens.
  LeftParen, RightParen, LeftBrace, RightBrace,
  Comma, Dot, Minus, Plus, Semicolon, Slash, Star,

  // One or two character tokens.
  Bang, BangEqual,
  Equal, EqualEqual, EqualGreater,
  Greater, GreaterEqual,
  Less, LessEqual,

  // Literals.
  Identifier, String, Number,

  // Keywords.
  And, Base, Break, Class, Else, False, Fn, For, If,
  Let, None, Or, Print, Return, SelfKw, True, While,

  EOF
}

/// Represents a token in the language. Tokens are immutable once produced.
/// `line` is the 1-based line of the token's first character; a multi-line
/// string keeps the line of its opening quote.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub r#type: Type,
    pub lexeme: String, // String representation of the token
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    /// Creates a new token.
    pub fn new(
        r#type: Type,
        lexeme: String,
        literal: Option<Literal>,
        line: usize,
    ) -> Token {
        Token { r#type, lexeme, literal, line }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} {} {:?} @ line {}", self.r#type, self.lexeme, self.literal, self.line)
    }
}
