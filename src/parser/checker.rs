//! Lookahead predicates.
//!
//! Each answers whether the current token can begin a production, looking at
//! that one token only and consuming nothing. The grammar engine commits to a
//! production as soon as its predicate holds, so a predicate must never admit
//! a token its production cannot start with.

use crate::lexer::tokens::TokenKind;

use super::parser::Parser;

pub fn is_eof(parser: &Parser) -> bool {
    parser.is(TokenKind::EOF)
}

pub fn starts_expr(parser: &Parser) -> bool {
    parser.get_nud_lookup().contains_key(&parser.current_token_kind())
}

/// Ordinary statements: those with a registered handler, and expressions.
pub fn starts_stmt(parser: &Parser) -> bool {
    parser.get_stmt_lookup().contains_key(&parser.current_token_kind()) || starts_expr(parser)
}

pub fn starts_class_decl_stmt(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::Native | TokenKind::Class | TokenKind::Model | TokenKind::Final
    )
}

pub fn starts_top_stmt(parser: &Parser) -> bool {
    starts_stmt(parser)
        || starts_class_decl_stmt(parser)
        || matches!(
            parser.current_token_kind(),
            TokenKind::Def | TokenKind::Module | TokenKind::Open | TokenKind::Const
        )
}

pub fn starts_inner_stmt(parser: &Parser) -> bool {
    starts_stmt(parser) || parser.is(TokenKind::Def) || starts_class_decl_stmt(parser)
}

pub fn starts_parameter(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::Ellipsis | TokenKind::Star | TokenKind::Identifier
    )
}

pub fn starts_signature(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::Rec | TokenKind::Star | TokenKind::Identifier
    )
}
