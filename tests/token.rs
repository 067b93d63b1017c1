extern crate slang_lang;

use slang_lang::literal::Literal;
use slang_lang::token::{Token, Type};

#[test]
fn create_token() {
    let token = Token::new(
        Type::LeftParen,
        "(".to_string(),
        None,
        1,
    );

    assert_eq!(token.r#type, Type::LeftParen);
    assert_eq!(token.lexeme, "(");
    assert_eq!(token.literal, None);
    assert_eq!(token.line, 1);
}

#[test]
fn create_token_with_literal() {
    let token = Token::new(
        Type::Number,
        "12.5".to_string(),
        Some(Literal::Number(12.5)),
        3,
    );

    assert_eq!(token.r#type, Type::Number);
    assert_eq!(token.literal, Some(Literal::Number(12.5)));
    assert_eq!(token.line, 3);
}

#[test]
fn display_token() {
    let token = Token::new(
        Type::LeftParen,
        "(".to_string(),
        None,
        1,
    );

    assert_eq!(format!("{}", token), "LeftParen ( None @ line 1");
}

#[test]
fn tokens_with_same_parts_are_equal() {
    let token = Token::new(Type::Identifier, "init".to_string(), None, 2);
    let token_copy = Token::new(Type::Identifier, "init".to_string(), None, 2);

    assert_eq!(token, token_copy);
}
