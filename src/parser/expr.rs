use crate::{
    ast::expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, Expr, GroupingExpr, Literal, LiteralExpr, MemberExpr,
        PrefixExpr, SymbolExpr,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::{checker::starts_expr, lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let nud_fn = match parser.get_nud_lookup().get(&parser.current_token_kind()) {
        Some(nud_fn) => *nud_fn,
        None => return Err(parser.syntax_error("expression")),
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than the caller, keep extending lhs
    while let Some(next_bp) = parser.get_bp_lookup().get(&parser.current_token_kind()).copied() {
        if next_bp <= bp {
            break;
        }

        let led_fn = match parser.get_led_lookup().get(&parser.current_token_kind()) {
            Some(led_fn) => *led_fn,
            None => return Err(parser.syntax_error("operator")),
        };

        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let value = match token.kind {
        TokenKind::Number => Literal::Number(token.value.clone()),
        TokenKind::String => Literal::String(token.value.clone()),
        TokenKind::True => Literal::Boolean(true),
        TokenKind::False => Literal::Boolean(false),
        TokenKind::Nil => Literal::Nil,
        TokenKind::Identifier => {
            return Ok(Expr::Symbol(SymbolExpr {
                name: parser.resolve_scope(&token),
                span: token.span,
            }));
        }
        _ => return Err(Error::syntax("expression", &token, parser.source())),
    };

    Ok(Expr::Literal(LiteralExpr {
        value,
        span: token.span,
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator = parser.advance().kind;
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: right.get_span().end.clone(),
        },
        operator: operator_token.kind,
        right: Box::new(right),
    }))
}

/// `target :- value`, right associative.
pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Assignment(AssignmentExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: value.get_span().end.clone(),
        },
        assignee: Box::new(left),
        value: Box::new(value),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let inner = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Grouping(GroupingExpr {
        inner: Box::new(inner),
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];
    if starts_expr(parser) {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        while parser.is(TokenKind::Comma) {
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: parser.get_previous_end(),
        },
        callee: Box::new(left),
        arguments,
    }))
}

/// `object.property`; the property is a field name and is not resolved.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let property = parser.expect(TokenKind::Identifier)?;

    Ok(Expr::Member(MemberExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: property.span.end.clone(),
        },
        object: Box::new(left),
        property: property.value,
    }))
}
