//! Expression nodes.
//!
//! Expressions only appear inside statements, so they render to a single
//! line and take no part in scope injection.

use crate::{lexer::tokens::TokenKind, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Symbol(SymbolExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    Member(MemberExpr),
    Grouping(GroupingExpr),
}

impl Expr {
    pub fn format(&self) -> String {
        match self {
            Expr::Literal(expr) => expr.value.format(),
            Expr::Symbol(expr) => expr.name.clone(),
            Expr::Prefix(expr) => match expr.operator {
                TokenKind::Not => format!("not {}", expr.right.format()),
                operator => format!("{}{}", operator, expr.right.format()),
            },
            Expr::Binary(expr) => format!(
                "{} {} {}",
                expr.left.format(),
                expr.operator,
                expr.right.format()
            ),
            Expr::Assignment(expr) => {
                format!("{} :- {}", expr.assignee.format(), expr.value.format())
            }
            Expr::Call(expr) => format!(
                "{}({})",
                expr.callee.format(),
                expr.arguments
                    .iter()
                    .map(Expr::format)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Expr::Member(expr) => format!("{}.{}", expr.object.format(), expr.property),
            Expr::Grouping(expr) => format!("({})", expr.inner.format()),
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Assignment(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Member(expr) => &expr.span,
            Expr::Grouping(expr) => &expr.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Kept as written so rendering reproduces the source digits
    Number(String),
    String(String),
    Boolean(bool),
    Nil,
}

impl Literal {
    pub fn format(&self) -> String {
        match self {
            Literal::Number(value) => value.clone(),
            Literal::String(value) => format!("\"{}\"", escape(value)),
            Literal::Boolean(value) => value.to_string(),
            Literal::Nil => String::from("nil"),
        }
    }
}

fn escape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\0' => result.push_str("\\0"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            _ => result.push(ch),
        }
    }
    result
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Literal,
    pub span: Span,
}

/// A scope-resolved name.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: TokenKind,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: TokenKind,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: Box<Expr>,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: String,
    pub span: Span,
}

/// Parentheses are kept in the tree so rendering does not need to know
/// operator precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}
