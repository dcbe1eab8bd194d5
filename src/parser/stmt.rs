use crate::{
    ast::{
        ast::Stmt,
        statements::{
            BlockStmt, BreakStmt, ContinueStmt, ElifClause, ExprStmt, ForeachStmt, GlobalStmt,
            GotoStmt, IfStmt, LabelStmt, PrintStmt, RaiseStmt, ReturnStmt, WhileStmt,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    checker::starts_expr,
    expr::parse_expr,
    grammar::{identifier, inner_stmt_list},
    lookups::BindingPower,
    parser::Parser,
};

/// Ordinary statements: a registered handler for the lookahead, otherwise an
/// expression statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return stmt_fn(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Expr(ExprStmt {
        span: expression.get_span().clone(),
        expression,
    }))
}

/// `[ inner-stmt* [end] ]`. The `end` before the bracket is optional and
/// is not kept.
pub fn parse_body(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let body = inner_stmt_list(parser)?;
    if parser.is(TokenKind::End) {
        parser.advance();
    }
    parser.expect(TokenKind::CloseBracket)?;
    Ok(body)
}

fn span_from(parser: &Parser, start: crate::Position) -> Span {
    Span {
        start,
        end: parser.get_previous_end(),
    }
}

/// The optional loop depth after `break` / `continue`.
fn parse_levels(parser: &mut Parser) -> Result<Option<u32>, Error> {
    if !parser.is(TokenKind::Number) {
        return Ok(None);
    }

    match parser.current_token().value.parse::<u32>() {
        Ok(levels) => {
            parser.advance();
            Ok(Some(levels))
        }
        Err(_) => Err(parser.syntax_error("loop depth")),
    }
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Print(PrintStmt {
        value,
        span: span_from(parser, start),
    }))
}

pub fn parse_raise_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Raise(RaiseStmt {
        value,
        span: span_from(parser, start),
    }))
}

/// `return [expr]`; an expression starting right after `return` is always
/// taken as its value.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if starts_expr(parser) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: span_from(parser, start),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let levels = parse_levels(parser)?;

    Ok(Stmt::Break(BreakStmt {
        levels,
        span: span_from(parser, start),
    }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let levels = parse_levels(parser)?;

    Ok(Stmt::Continue(ContinueStmt {
        levels,
        span: span_from(parser, start),
    }))
}

pub fn parse_goto_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let label = identifier(parser)?;

    Ok(Stmt::Goto(GotoStmt {
        label,
        span: span_from(parser, start),
    }))
}

pub fn parse_label_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let name = identifier(parser)?;

    Ok(Stmt::Label(LabelStmt {
        name,
        span: span_from(parser, start),
    }))
}

pub fn parse_global_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let mut names = vec![identifier(parser)?];
    while parser.is(TokenKind::Comma) {
        parser.advance();
        names.push(identifier(parser)?);
    }

    Ok(Stmt::Global(GlobalStmt {
        names,
        span: span_from(parser, start),
    }))
}

/// `begin inner-stmt* end`
pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let body = inner_stmt_list(parser)?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::Block(BlockStmt {
        body,
        span: span_from(parser, start),
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_body(parser)?;

    let mut elifs = vec![];
    while parser.is(TokenKind::Elif) {
        parser.advance();
        let condition = parse_expr(parser, BindingPower::Default)?;
        let body = parse_body(parser)?;
        elifs.push(ElifClause { condition, body });
    }

    let else_body = if parser.is(TokenKind::Else) {
        parser.advance();
        Some(parse_body(parser)?)
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        elifs,
        else_body,
        span: span_from(parser, start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_body(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: span_from(parser, start),
    }))
}

/// `foreach [*]name in expr [ ... ]`
pub fn parse_foreach_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let by_reference = parser.is(TokenKind::Star);
    if by_reference {
        parser.advance();
    }

    let variable = identifier(parser)?;
    parser.expect(TokenKind::In)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;
    let body = parse_body(parser)?;

    Ok(Stmt::Foreach(ForeachStmt {
        by_reference,
        variable,
        iterable,
        body,
        span: span_from(parser, start),
    }))
}
