//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the Quack constructs including:
//! - Function, module, open and const declarations
//! - Class declarations and their signatures
//! - Parameter lists
//! - Ordinary statements and expressions
//! - Syntax errors and where they are reported

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{format_program, Stmt},
        expressions::{Expr, Literal},
        statements::ClassCategory,
    },
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::TokenKind},
    scope::resolver::AliasResolver,
};

use super::{
    checker::{
        is_eof, starts_class_decl_stmt, starts_expr, starts_inner_stmt, starts_parameter,
        starts_stmt, starts_top_stmt,
    },
    grammar::{inner_stmt, top_stmt, top_stmt_list},
    parser::{parse, parse_with_resolver, Parser},
};

fn parse_source(source: &str) -> Result<Vec<Stmt>, Error> {
    let tokens = tokenize(source.to_string(), Some("test.qk".to_string()))?;
    parse(tokens, Rc::new(source.to_string()))
}

fn parse_one(source: &str) -> Stmt {
    let mut statements = parse_source(source).unwrap();
    assert_eq!(statements.len(), 1, "expected a single statement in {:?}", source);
    statements.remove(0)
}

fn parser_for(source: &str) -> Parser {
    let tokens = tokenize(source.to_string(), None).unwrap();
    Parser::new(tokens, Rc::new(source.to_string()))
}

#[test]
fn test_parse_empty_program() {
    assert!(parse_source("").unwrap().is_empty());
    assert!(parse_source("  // nothing here\n").unwrap().is_empty());
}

#[test]
fn test_parse_def() {
    let Stmt::Def(def) = parse_one("def greet [name] []") else {
        panic!("expected a def");
    };

    assert_eq!(def.name, "greet");
    assert!(!def.by_reference);
    assert_eq!(def.parameters.len(), 1);
    assert_eq!(def.parameters[0].name, "name");
    assert!(!def.parameters[0].is_reference);
    assert!(!def.parameters[0].is_ellipsis);
    assert!(def.body.is_empty());
}

#[test]
fn test_parse_def_by_reference() {
    let Stmt::Def(def) = parse_one("def * swap [* a; * b] []") else {
        panic!("expected a def");
    };

    assert_eq!(def.name, "swap");
    assert!(def.by_reference);
    assert_eq!(def.parameters.len(), 2);
    assert!(def.parameters.iter().all(|parameter| parameter.is_reference));
    assert_eq!(def.parameters[1].name, "b");
}

#[test]
fn test_body_may_close_with_end() {
    let statements = parse_source("def greet [name] [ end ]\ndef * swap [* a; * b] [ end ]").unwrap();

    let Stmt::Def(greet) = &statements[0] else {
        panic!("expected a def");
    };
    assert_eq!(greet.parameters.len(), 1);
    assert!(greet.body.is_empty());

    let Stmt::Def(swap) = &statements[1] else {
        panic!("expected a def");
    };
    assert!(swap.by_reference);
    assert!(swap.body.is_empty());
    assert_eq!(format_program(&statements), "def greet [name] []\ndef *swap [*a; *b] []\n");
}

#[test]
fn test_parse_def_without_parameters() {
    let Stmt::Def(def) = parse_one("def main ! [ print 1 ]") else {
        panic!("expected a def");
    };

    assert!(def.parameters.is_empty());
    assert_eq!(def.body.len(), 1);
    assert!(matches!(def.body[0], Stmt::Print(_)));
}

#[test]
fn test_parse_variadic_parameter() {
    let Stmt::Def(def) = parse_one("def log [level; ...*rest] []") else {
        panic!("expected a def");
    };

    assert!(!def.parameters[0].is_ellipsis);
    assert!(def.parameters[1].is_ellipsis);
    assert!(def.parameters[1].is_reference);
    assert_eq!(def.parameters[1].name, "rest");
}

#[test]
fn test_trailing_semicolon_in_parameters_is_rejected() {
    let error = parse_source("def f [a;] []").unwrap_err();

    assert!(error.is_syntax_error());
    assert_eq!(error.expected(), Some("identifier"));
    assert_eq!(error.found(), Some("]"));
}

#[test]
fn test_missing_close_bracket() {
    let error = parse_source("def f [a; b").unwrap_err();

    assert_eq!(error.expected(), Some("]"));
    assert_eq!(error.found(), Some("EOF"));
}

#[test]
fn test_parse_class() {
    let Stmt::Class(class) = parse_one("class Animal speak() end") else {
        panic!("expected a class");
    };

    assert_eq!(class.category, ClassCategory::Class);
    assert_eq!(class.name, "Animal");
    assert_eq!(class.extends, None);
    assert!(class.implements.is_empty());
    assert_eq!(class.body.len(), 1);
    assert_eq!(class.body[0].name, "speak");
    assert!(class.body[0].parameters.is_empty());
    assert!(!class.native);
}

#[test]
fn test_parse_class_header() {
    let source = "final Dog : Animal # Named; # Walker\n  rec *fetch(ball, ...rest)\n  bark()\nend";
    let Stmt::Class(class) = parse_one(source) else {
        panic!("expected a class");
    };

    assert_eq!(class.category, ClassCategory::Final);
    assert_eq!(class.extends.as_deref(), Some("Animal"));
    assert_eq!(class.implements, vec!["Named".to_string(), "Walker".to_string()]);

    let fetch = &class.body[0];
    assert!(fetch.is_recursive);
    assert!(fetch.is_reference);
    assert_eq!(fetch.parameters.len(), 2);
    assert!(fetch.parameters[1].is_ellipsis);
}

#[test]
fn test_implements_hash_after_semicolon_is_optional() {
    let Stmt::Class(class) = parse_one("model Shape # Drawable; Sized end") else {
        panic!("expected a class");
    };

    assert_eq!(class.category, ClassCategory::Model);
    assert_eq!(class.implements, vec!["Drawable".to_string(), "Sized".to_string()]);
}

#[test]
fn test_class_without_end() {
    let error = parse_source("class Animal speak()").unwrap_err();
    assert_eq!(error.expected(), Some("end"));
}

#[test]
fn test_parse_module_and_open() {
    let statements = parse_source("module Foo.Bar\nopen Foo.Bar as FB\nopen Baz").unwrap();

    let Stmt::Module(module) = &statements[0] else {
        panic!("expected a module");
    };
    assert_eq!(module.name, vec!["Foo".to_string(), "Bar".to_string()]);

    let Stmt::Open(open) = &statements[1] else {
        panic!("expected an open");
    };
    assert_eq!(open.name, vec!["Foo".to_string(), "Bar".to_string()]);
    assert_eq!(open.alias.as_deref(), Some("FB"));
    assert_eq!(open.local_name(), "FB");

    let Stmt::Open(open) = &statements[2] else {
        panic!("expected an open");
    };
    assert_eq!(open.alias, None);
    assert_eq!(open.local_name(), "Baz");
}

#[test]
fn test_qualified_name_segments_are_resolved() {
    let source = "module a.b.c";
    let tokens = tokenize(source.to_string(), None).unwrap();
    let resolver = AliasResolver::new().alias("a", "root").alias("c", "leaf");

    let statements = parse_with_resolver(tokens, Rc::new(source.to_string()), Box::new(resolver)).unwrap();

    let Stmt::Module(module) = &statements[0] else {
        panic!("expected a module");
    };
    assert_eq!(module.name, vec!["root".to_string(), "b".to_string(), "leaf".to_string()]);
}

#[test]
fn test_parse_const() {
    let Stmt::Const(constant) = parse_one("const limit :- 10") else {
        panic!("expected a const");
    };

    assert_eq!(constant.name, "limit");
    let Expr::Literal(literal) = &constant.value else {
        panic!("expected a literal");
    };
    assert_eq!(literal.value, Literal::Number("10".to_string()));
}

#[test]
fn test_const_requires_static_scalar() {
    let error = parse_source("const limit :- (1)").unwrap_err();
    assert_eq!(error.expected(), Some("static scalar"));
    assert_eq!(error.found(), Some("("));
}

#[test]
fn test_trailing_junk_is_reported() {
    let error = parse_source("module Foo ]").unwrap_err();

    assert!(error.is_syntax_error());
    assert_eq!(error.expected(), Some("statement"));
    assert_eq!(error.found(), Some("]"));

    let position = error.get_position();
    assert_eq!(position.offset, 11);
    assert_eq!(position.line, 1);
    assert_eq!(position.column, 12);
    assert!(error.get_source().is_some());
}

#[test]
fn test_top_stmt_list_stops_after_error() {
    let source = "module Foo ] module Bar";
    let mut parser = parser_for(source);
    let mut statements = top_stmt_list(&mut parser);

    assert!(matches!(statements.next(), Some(Ok(Stmt::Module(_)))));
    assert!(matches!(statements.next(), Some(Err(_))));
    assert!(statements.next().is_none());
    assert!(statements.next().is_none());
}

#[test]
fn test_predicates_do_not_consume() {
    let parser = parser_for("print 1");

    assert!(starts_stmt(&parser));
    assert!(starts_top_stmt(&parser));
    assert!(starts_inner_stmt(&parser));
    assert!(!starts_expr(&parser));
    assert_eq!(parser.current_token_kind(), TokenKind::Print);
}

/// One minimal statement for every kind of lookahead a body admits.
const INNER_STARTERS: &[&str] = &[
    "print 1",
    "raise 1",
    "return",
    "break",
    "continue",
    "goto l",
    "label l",
    "global g",
    "begin end",
    "if x []",
    "while x []",
    "foreach x in xs []",
    "x",
    "1",
    "\"text\"",
    "true",
    "false",
    "nil",
    "(x)",
    "-x",
    "not x",
    "class A end",
    "model A end",
    "final A end",
    "native class A end",
    "def f ! []",
];

/// Admitted only at the top level.
const TOP_ONLY_STARTERS: &[&str] = &["module M", "open M", "const c :- 1"];

#[test]
fn test_every_top_starter_yields_a_statement() {
    for source in INNER_STARTERS.iter().chain(TOP_ONLY_STARTERS) {
        let mut parser = parser_for(source);

        assert!(starts_top_stmt(&parser), "{:?} should start a top statement", source);
        assert!(top_stmt(&mut parser).is_ok(), "{:?} should parse as a top statement", source);
        assert!(is_eof(&parser), "{:?} should be fully consumed", source);
    }
}

#[test]
fn test_every_inner_starter_yields_a_statement() {
    for source in INNER_STARTERS {
        let mut parser = parser_for(source);

        assert!(starts_inner_stmt(&parser), "{:?} should start an inner statement", source);
        assert!(inner_stmt(&mut parser).is_ok(), "{:?} should parse as an inner statement", source);
        assert!(is_eof(&parser), "{:?} should be fully consumed", source);
    }

    for source in TOP_ONLY_STARTERS {
        assert!(!starts_inner_stmt(&parser_for(source)), "{:?} is top level only", source);
    }
}

#[test]
fn test_non_starters_are_rejected() {
    for source in ["]", "end", "elif", "else", "in", "as", ":-", ";", "*"] {
        let parser = parser_for(source);

        assert!(!starts_top_stmt(&parser), "{:?} should not start a statement", source);
        assert!(!starts_inner_stmt(&parser), "{:?} should not start a statement", source);
        assert!(!is_eof(&parser));
    }

    assert!(is_eof(&parser_for("")));
    assert!(is_eof(&parser_for("  // only a comment")));
}

#[test]
fn test_starts_parameter() {
    for source in ["...rest", "*a", "a"] {
        assert!(starts_parameter(&parser_for(source)), "{:?} should start a parameter", source);
    }
    for source in ["]", ";", "!", "def"] {
        assert!(!starts_parameter(&parser_for(source)), "{:?} should not start a parameter", source);
    }
}

#[test]
fn test_starts_class_decl_stmt() {
    for source in ["class", "model", "final", "native"] {
        assert!(starts_class_decl_stmt(&parser_for(source)));
    }
    assert!(!starts_class_decl_stmt(&parser_for("def")));
}

#[test]
fn test_parse_native_class() {
    let Stmt::Class(class) = parse_one("native model Buffer : Base write(data) end") else {
        panic!("expected a class");
    };

    assert!(class.native);
    assert_eq!(class.category, ClassCategory::Model);
    assert_eq!(class.extends.as_deref(), Some("Base"));

    let error = parse_source("native def f ! []").unwrap_err();
    assert_eq!(error.expected(), Some("class"));
    assert_eq!(error.found(), Some("def"));
}

#[test]
fn test_declarations_only_at_top_level() {
    let parser = parser_for("module Foo");
    assert!(starts_top_stmt(&parser));
    assert!(!starts_inner_stmt(&parser));

    let error = parse_source("def f ! [ module Foo ]").unwrap_err();
    assert_eq!(error.expected(), Some("]"));
    assert_eq!(error.found(), Some("module"));
}

#[test]
fn test_parse_control_flow() {
    let source = "while i < 10 [\n  if i = 5 [ break ] elif i = 6 [ continue 2 ] else [ i :- i + 1 ]\n]";
    let Stmt::While(while_stmt) = parse_one(source) else {
        panic!("expected a while");
    };

    let Stmt::If(if_stmt) = &while_stmt.body[0] else {
        panic!("expected an if");
    };
    assert_eq!(if_stmt.elifs.len(), 1);
    assert!(if_stmt.else_body.is_some());

    let Stmt::Continue(continue_stmt) = &if_stmt.elifs[0].body[0] else {
        panic!("expected a continue");
    };
    assert_eq!(continue_stmt.levels, Some(2));
}

#[test]
fn test_parse_foreach() {
    let Stmt::Foreach(foreach) = parse_one("foreach *item in items [ print item ]") else {
        panic!("expected a foreach");
    };

    assert!(foreach.by_reference);
    assert_eq!(foreach.variable, "item");
    assert_eq!(foreach.iterable.format(), "items");
    assert_eq!(foreach.body.len(), 1);
}

#[test]
fn test_parse_goto_label_global() {
    let statements = parse_source("global a, b\nlabel top\ngoto top").unwrap();

    let Stmt::Global(global) = &statements[0] else {
        panic!("expected a global");
    };
    assert_eq!(global.names, vec!["a".to_string(), "b".to_string()]);
    assert!(matches!(&statements[1], Stmt::Label(label) if label.name == "top"));
    assert!(matches!(&statements[2], Stmt::Goto(goto) if goto.label == "top"));
}

#[test]
fn test_expression_precedence() {
    let Stmt::Expr(stmt) = parse_one("x :- 1 + 2 * -y.z(3) and not done") else {
        panic!("expected an expression statement");
    };

    let Expr::Assignment(assignment) = &stmt.expression else {
        panic!("expected an assignment");
    };
    let Expr::Binary(logical) = assignment.value.as_ref() else {
        panic!("expected a binary expression");
    };
    assert_eq!(logical.operator, TokenKind::And);

    let Expr::Binary(sum) = logical.left.as_ref() else {
        panic!("expected a binary expression");
    };
    assert_eq!(sum.operator, TokenKind::Plus);
    assert!(matches!(sum.right.as_ref(), Expr::Binary(product) if product.operator == TokenKind::Star));
}

#[test]
fn test_and_binds_tighter_than_or() {
    let Stmt::Expr(stmt) = parse_one("a or b and c") else {
        panic!("expected an expression statement");
    };

    let Expr::Binary(or) = &stmt.expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(or.operator, TokenKind::Or);
    assert!(matches!(or.left.as_ref(), Expr::Symbol(symbol) if symbol.name == "a"));
    assert!(matches!(or.right.as_ref(), Expr::Binary(and) if and.operator == TokenKind::And));

    let Stmt::Expr(stmt) = parse_one("a and b or c") else {
        panic!("expected an expression statement");
    };
    let Expr::Binary(or) = &stmt.expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(or.operator, TokenKind::Or);
    assert!(matches!(or.left.as_ref(), Expr::Binary(and) if and.operator == TokenKind::And));
}

#[test]
fn test_spans_cover_statement() {
    let stmt = parse_one("print a + b");
    let span = match &stmt {
        Stmt::Print(print) => &print.span,
        _ => panic!("expected a print"),
    };

    assert_eq!(span.start.offset, 0);
    assert_eq!(span.end.offset, 11);
}

#[test]
fn test_format_after_parse() {
    let source = "def * swap [* a; * b] []\nclass Animal speak() end\nopen Foo.Bar as FB";
    let statements = parse_source(source).unwrap();

    assert_eq!(
        format_program(&statements),
        "def *swap [*a; *b] []\nclass Animal\n  speak()\nend\nopen Foo.Bar as FB\n"
    );
}
