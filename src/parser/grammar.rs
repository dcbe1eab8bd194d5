//! Declaration-level productions.
//!
//! One function per nonterminal. Each commits to its production once the
//! matching lookahead predicate holds and never backtracks; a failed
//! `expect` aborts the whole parse.

use crate::{
    ast::{
        ast::Stmt,
        statements::{ClassCategory, ClassStmt, ConstStmt, DefStmt, ModuleStmt, OpenStmt, Parameter, Signature},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    checker::{
        is_eof, starts_class_decl_stmt, starts_inner_stmt, starts_parameter, starts_signature,
        starts_stmt, starts_top_stmt,
    },
    expr::parse_primary_expr,
    parser::Parser,
    stmt::{parse_body, parse_stmt},
};

/// The top-level statements of a program, produced one at a time.
///
/// Pulling an item advances the shared parser, so the list can only be
/// walked once. It ends after the first error.
pub struct TopStmtList<'a> {
    parser: &'a mut Parser,
    finished: bool,
}

impl Iterator for TopStmtList<'_> {
    type Item = Result<Stmt, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if starts_top_stmt(self.parser) {
            let stmt = top_stmt(self.parser);
            self.finished = stmt.is_err();
            return Some(stmt);
        }

        self.finished = true;
        if is_eof(self.parser) {
            None
        } else {
            Some(Err(self.parser.syntax_error("statement")))
        }
    }
}

pub fn top_stmt_list(parser: &mut Parser) -> TopStmtList<'_> {
    TopStmtList {
        parser,
        finished: false,
    }
}

/// Statements nested in a body. The caller matches the closing token.
pub fn inner_stmt_list(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut body = vec![];
    while starts_inner_stmt(parser) {
        body.push(inner_stmt(parser)?);
    }
    Ok(body)
}

pub fn top_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if starts_stmt(parser) {
        return parse_stmt(parser);
    }
    if starts_class_decl_stmt(parser) {
        return class_decl_stmt(parser);
    }

    match parser.current_token_kind() {
        TokenKind::Def => def_stmt(parser),
        TokenKind::Module => module_stmt(parser),
        TokenKind::Open => open_stmt(parser),
        TokenKind::Const => const_stmt(parser),
        _ => Err(parser.syntax_error("statement")),
    }
}

pub fn inner_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if starts_stmt(parser) {
        return parse_stmt(parser);
    }
    if parser.is(TokenKind::Def) {
        return def_stmt(parser);
    }
    if starts_class_decl_stmt(parser) {
        return class_decl_stmt(parser);
    }

    Err(parser.syntax_error("statement"))
}

/// `[native] class|model|final Name [: Base] [# Iface (; [#] Iface)*] signature* end`
pub fn class_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();

    let native = parser.is(TokenKind::Native);
    if native {
        parser.advance();
    }

    let category = match ClassCategory::from_token_kind(parser.current_token_kind()) {
        Some(category) => category,
        None => return Err(parser.syntax_error("class")),
    };
    parser.advance();

    let name = identifier(parser)?;

    let extends = if parser.is(TokenKind::Colon) {
        parser.advance();
        Some(identifier(parser)?)
    } else {
        None
    };

    let mut implements = vec![];
    if parser.is(TokenKind::Hash) {
        parser.advance();
        implements.push(identifier(parser)?);

        while parser.is(TokenKind::Semicolon) {
            parser.advance();
            if parser.is(TokenKind::Hash) {
                parser.advance();
            }
            implements.push(identifier(parser)?);
        }
    }

    let mut body = vec![];
    while starts_signature(parser) {
        body.push(signature(parser)?);
    }
    parser.expect(TokenKind::End)?;

    Ok(Stmt::Class(ClassStmt {
        category,
        name,
        extends,
        implements,
        body,
        native,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

/// `[rec] [*] name ( [param (, param)*] )`
pub fn signature(parser: &mut Parser) -> Result<Signature, Error> {
    let start = parser.get_position();

    let is_recursive = parser.is(TokenKind::Rec);
    if is_recursive {
        parser.advance();
    }

    let is_reference = parser.is(TokenKind::Star);
    if is_reference {
        parser.advance();
    }

    let name = identifier(parser)?;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];
    if starts_parameter(parser) {
        loop {
            parameters.push(parameter(parser)?);
            if parser.is(TokenKind::Comma) {
                parser.advance();
            } else {
                break;
            }
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(Signature {
        name,
        is_recursive,
        is_reference,
        parameters,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    })
}

/// `def [*] name parameters [ inner-stmt* ]`
pub fn def_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Def)?.span.start;

    let by_reference = parser.is(TokenKind::Star);
    if by_reference {
        parser.advance();
    }

    let name = identifier(parser)?;
    let parameters = parameters(parser)?;
    let body = parse_body(parser)?;

    Ok(Stmt::Def(DefStmt {
        name,
        by_reference,
        parameters,
        body,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

pub fn module_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Module)?.span.start;
    let name = qualified_name(parser)?;

    Ok(Stmt::Module(ModuleStmt {
        name,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

pub fn open_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Open)?.span.start;
    let name = qualified_name(parser)?;

    let alias = if parser.is(TokenKind::As) {
        parser.advance();
        Some(identifier(parser)?)
    } else {
        None
    };

    Ok(Stmt::Open(OpenStmt {
        name,
        alias,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

/// `const name :- static-scalar`
pub fn const_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Const)?.span.start;
    let name = identifier(parser)?;
    parser.expect(TokenKind::Bind)?;

    let value = match parser.current_token_kind() {
        TokenKind::Number
        | TokenKind::String
        | TokenKind::True
        | TokenKind::False
        | TokenKind::Nil
        | TokenKind::Identifier => parse_primary_expr(parser)?,
        _ => return Err(parser.syntax_error("static scalar")),
    };

    Ok(Stmt::Const(ConstStmt {
        name,
        value,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

/// `!` for no parameters, otherwise `[ [param (; param)*] ]`
pub fn parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    let mut parameters = vec![];

    if parser.is(TokenKind::Bang) {
        parser.advance();
        return Ok(parameters);
    }

    parser.expect(TokenKind::OpenBracket)?;

    if starts_parameter(parser) {
        loop {
            parameters.push(parameter(parser)?);

            if parser.is(TokenKind::Semicolon) {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseBracket)?;
    Ok(parameters)
}

/// `[...] [*] name`
pub fn parameter(parser: &mut Parser) -> Result<Parameter, Error> {
    let start = parser.get_position();

    let is_ellipsis = parser.is(TokenKind::Ellipsis);
    if is_ellipsis {
        parser.advance();
    }

    let is_reference = parser.is(TokenKind::Star);
    if is_reference {
        parser.advance();
    }

    let name = identifier(parser)?;

    Ok(Parameter {
        name,
        is_reference,
        is_ellipsis,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    })
}

/// `name (. name)*`, each segment resolved on its own.
pub fn qualified_name(parser: &mut Parser) -> Result<Vec<String>, Error> {
    let mut segments = vec![identifier(parser)?];

    while parser.is(TokenKind::Dot) {
        parser.advance();
        segments.push(identifier(parser)?);
    }

    Ok(segments)
}

pub fn identifier(parser: &mut Parser) -> Result<String, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(parser.resolve_scope(&token))
}
