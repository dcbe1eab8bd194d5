//! Unit tests for the lexer module.
//!
//! Covers keywords, identifiers, literals, punctuation (including the
//! multi-character operators that share a prefix), comments, positions and
//! error cases.

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.qk".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "def module open as const class model final rec end begin";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Def,
            TokenKind::Module,
            TokenKind::Open,
            TokenKind::As,
            TokenKind::Const,
            TokenKind::Class,
            TokenKind::Model,
            TokenKind::Final,
            TokenKind::Rec,
            TokenKind::End,
            TokenKind::Begin,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_statement_keywords() {
    let source = "if elif else while foreach in break continue goto label global print raise return";
    let tokens = kinds(source);

    assert_eq!(tokens.len(), 15);
    assert_eq!(tokens[0], TokenKind::If);
    assert_eq!(tokens[4], TokenKind::Foreach);
    assert_eq!(tokens[9], TokenKind::Label);
    assert_eq!(tokens[13], TokenKind::Return);
    assert_eq!(tokens[14], TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar_1 _hidden Animal defined".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar_1");
    assert_eq!(tokens[2].value, "_hidden");
    assert_eq!(tokens[3].value, "Animal");
    // A keyword prefix does not make a keyword
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "defined");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "two words" "say \"hi\"\n""#.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "two words");
    assert_eq!(tokens[2].value, "say \"hi\"\n");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_shared_prefixes() {
    assert_eq!(
        kinds(": :- . ... < <= <> > >= = !"),
        vec![
            TokenKind::Colon,
            TokenKind::Bind,
            TokenKind::Dot,
            TokenKind::Ellipsis,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::NotEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::Equals,
            TokenKind::Bang,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_parameter_markers() {
    assert_eq!(
        kinds("[...*rest; *a]"),
        vec![
            TokenKind::OpenBracket,
            TokenKind::Ellipsis,
            TokenKind::Star,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Star,
            TokenKind::Identifier,
            TokenKind::CloseBracket,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("print x // trailing words def\nprint y"),
        vec![
            TokenKind::Print,
            TokenKind::Identifier,
            TokenKind::Print,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("module Foo\n  open Bar".to_string(), Some("pos.qk".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.line, 1);
    assert_eq!(tokens[0].span.start.column, 1);
    assert_eq!(tokens[1].span.start.column, 8);
    assert_eq!(tokens[2].span.start.line, 2);
    assert_eq!(tokens[2].span.start.column, 3);
    assert_eq!(tokens[2].span.start.offset, 13);
    assert_eq!(tokens[3].span.end.column, 11);
    assert_eq!(tokens[3].span.start.file.as_str(), "pos.qk");

    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!(eof.span.start.offset, 21);
}

#[test]
fn test_columns_count_characters() {
    let tokens = tokenize("print \"héllo\" x".to_string(), None).unwrap();

    assert_eq!(tokens[1].value, "héllo");
    assert_eq!(tokens[1].span.start.column, 7);
    assert_eq!(tokens[1].span.end.column, 14);
    assert_eq!(tokens[2].span.start.column, 15);
    assert_eq!(tokens[2].span.start.offset, 15);
    assert_eq!(tokens[2].span.end.column, 16);
}

#[test]
fn test_tokenize_native() {
    assert_eq!(
        kinds("native class nativeness"),
        vec![TokenKind::Native, TokenKind::Class, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_empty() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("  \n\t "), vec![TokenKind::EOF]);
}

#[test]
fn test_tokenize_unrecognised() {
    let error = tokenize("print @".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().offset, 6);
    assert_eq!(error.get_source().map(|s| s.as_str()), Some("print @"));
}
