use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    parser::parser::parse,
    Position, Span,
};

use super::{
    resolver::{AliasResolver, IdentityResolver, ScopeResolver},
    scope::{analyze, Scope, ScopeManager, Symbol},
};

fn analyze_source(source: &str) -> Result<Scope, Error> {
    let tokens = tokenize(source.to_string(), Some("test.qk".to_string()))?;
    let statements = parse(tokens, Rc::new(source.to_string()))?;
    analyze(&statements)
}

fn identifier(value: &str) -> Token {
    Token {
        kind: TokenKind::Identifier,
        value: value.to_string(),
        span: Span {
            start: Position::null(),
            end: Position::null(),
        },
    }
}

#[test]
fn test_scope_manager_indent() {
    let mut ctx = ScopeManager::new();
    assert_eq!(ctx.indent(), "");

    ctx.open_scope();
    ctx.open_scope();
    assert_eq!(ctx.get_depth(), 2);
    assert_eq!(ctx.indent(), "    ");

    ctx.close_scope();
    assert_eq!(ctx.indent(), "  ");
    ctx.close_scope();
    assert_eq!(ctx.get_depth(), 0);
}

#[test]
fn test_scope_manager_nested() {
    let mut ctx = ScopeManager::with_indent_width(4);

    let inner = ctx.nested(|ctx| ctx.nested(|ctx| ctx.indent()));

    assert_eq!(inner, " ".repeat(8));
    assert_eq!(ctx.get_depth(), 0);
}

#[test]
fn test_declare_rejects_duplicates() {
    let mut scope = Scope::new();
    let position = Position::null();

    scope.declare("f", Symbol::Function, &position).unwrap();
    let error = scope.declare("f", Symbol::Constant, &position).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::SymbolAlreadyDeclared {
            symbol: "f".to_string()
        }
    );
    assert_eq!(scope.get_symbol("f"), Some(&Symbol::Function));
}

#[test]
fn test_labels_live_apart_from_symbols() {
    let mut scope = Scope::new();
    let position = Position::null();

    scope.declare("top", Symbol::Global, &position).unwrap();
    scope.declare_label("top", &position).unwrap();

    assert!(scope.has_label("top"));
    assert!(scope.declare_label("top", &position).is_err());
    assert_eq!(scope.symbol_count(), 1);
    assert_eq!(scope.label_count(), 1);
}

#[test]
fn test_scope_with_only_labels_is_not_empty() {
    let mut scope = Scope::new();
    scope.declare_label("start", &Position::null()).unwrap();

    assert_eq!(scope.symbol_count(), 0);
    assert_eq!(scope.label_count(), 1);
    assert!(!scope.is_empty());
}

#[test]
fn test_identity_resolver() {
    assert_eq!(IdentityResolver.resolve_scope(&identifier("name")), "name");
}

#[test]
fn test_alias_resolver() {
    let resolver = AliasResolver::new().alias("io", "Std.Io");

    assert_eq!(resolver.resolve_scope(&identifier("io")), "Std.Io");
    assert_eq!(resolver.resolve_scope(&identifier("other")), "other");
}

#[test]
fn test_analyze_program() {
    let scope = analyze_source("module App\nopen Std.Io as io\ndef main ! [ label again\n goto again ]").unwrap();

    assert_eq!(scope.get_symbol("App"), Some(&Symbol::Module));
    assert_eq!(scope.get_symbol("io"), Some(&Symbol::Alias("Std.Io".to_string())));
    assert_eq!(scope.get_symbol("main"), Some(&Symbol::Function));
    // Labels inside a def belong to the def
    assert!(!scope.has_label("again"));
}

#[test]
fn test_goto_may_jump_forward() {
    assert!(analyze_source("goto done\nprint 1\nlabel done").is_ok());
}

#[test]
fn test_undefined_label() {
    let error = analyze_source("label outer\ndef f ! [ goto outer ]").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UndefinedLabel {
            label: "outer".to_string()
        }
    );
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_duplicate_def() {
    let error = analyze_source("def f ! []\ndef f [x] []").unwrap_err();

    assert_eq!(error.get_error_name(), "SymbolAlreadyDeclared");
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_parameter_shadowed_in_body() {
    let error = analyze_source("def f [x] [ global x ]").unwrap_err();
    assert_eq!(error.get_error_name(), "SymbolAlreadyDeclared");
}
