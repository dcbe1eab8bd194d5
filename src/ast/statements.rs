use std::collections::HashSet;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    scope::scope::{Scope, ScopeManager, Symbol},
    Span,
};

use super::{
    ast::{Node, Stmt},
    expressions::Expr,
};

/// Renders a bracketed body one level deeper than the current scope. An
/// empty body is `[]`.
fn format_body(body: &[Stmt], ctx: &mut ScopeManager) -> String {
    if body.is_empty() {
        return String::from("[]");
    }

    let mut source = String::from("[\n");
    source.push_str(&format_lines(body, ctx));
    source.push_str(&ctx.indent());
    source.push(']');
    source
}

/// Renders each statement on its own line(s), one level deeper than `ctx`.
fn format_lines(body: &[Stmt], ctx: &mut ScopeManager) -> String {
    ctx.nested(|ctx| {
        let mut source = String::new();
        for stmt in body {
            source.push_str(&ctx.indent());
            source.push_str(&stmt.format(ctx));
        }
        source
    })
}

fn inject_body(body: &[Stmt], parent_scope: &mut Scope) -> Result<(), Error> {
    for stmt in body {
        stmt.inject_scope(parent_scope)?;
    }
    Ok(())
}

fn check_body(body: &[Stmt], scope: &Scope) -> Result<(), Error> {
    for stmt in body {
        stmt.check(scope)?;
    }
    Ok(())
}

// PARAMETERS AND SIGNATURES

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub is_reference: bool,
    /// Collects the remaining arguments; only valid on the last parameter
    pub is_ellipsis: bool,
    pub span: Span,
}

impl Parameter {
    pub fn format(&self) -> String {
        let mut source = String::new();
        if self.is_ellipsis {
            source.push_str("...");
        }
        if self.is_reference {
            source.push('*');
        }
        source.push_str(&self.name);
        source
    }
}

/// Rejects a variadic parameter that is not last and any repeated name.
pub fn check_parameters(parameters: &[Parameter]) -> Result<(), Error> {
    let mut seen = HashSet::new();

    for (index, parameter) in parameters.iter().enumerate() {
        if parameter.is_ellipsis && index + 1 != parameters.len() {
            return Err(Error::new(
                ErrorImpl::VariadicNotLast { parameter: parameter.name.clone() },
                parameter.span.start.clone(),
            ));
        }

        if !seen.insert(parameter.name.as_str()) {
            return Err(Error::new(
                ErrorImpl::DuplicateParameter { parameter: parameter.name.clone() },
                parameter.span.start.clone(),
            ));
        }
    }

    Ok(())
}

/// A method contract inside a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub name: String,
    pub is_recursive: bool,
    pub is_reference: bool,
    pub parameters: Vec<Parameter>,
    pub span: Span,
}

impl Signature {
    pub fn format(&self) -> String {
        format!(
            "{}{}{}({})",
            if self.is_recursive { "rec " } else { "" },
            if self.is_reference { "*" } else { "" },
            self.name,
            self.parameters
                .iter()
                .map(Parameter::format)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

// DECLARATIONS

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassCategory {
    Class,
    Model,
    Final,
}

impl ClassCategory {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Class => Some(ClassCategory::Class),
            TokenKind::Model => Some(ClassCategory::Model),
            TokenKind::Final => Some(ClassCategory::Final),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassCategory::Class => "class",
            ClassCategory::Model => "model",
            ClassCategory::Final => "final",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassStmt {
    pub category: ClassCategory,
    pub name: String,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub body: Vec<Signature>,
    /// Set by a later phase for classes implemented by the host
    pub native: bool,
    pub span: Span,
}

impl ClassStmt {
    pub fn mark_native(&mut self) {
        self.native = true;
    }
}

impl Node for ClassStmt {
    fn format(&self, ctx: &mut ScopeManager) -> String {
        let mut source = String::new();
        if self.native {
            source.push_str("native ");
        }
        source.push_str(self.category.as_str());
        source.push(' ');
        source.push_str(&self.name);

        if let Some(extends) = &self.extends {
            source.push_str(" : ");
            source.push_str(extends);
        }

        if !self.implements.is_empty() {
            source.push_str(" # ");
            source.push_str(&self.implements.join("; # "));
        }
        source.push('\n');

        source.push_str(&ctx.nested(|ctx| {
            self.body
                .iter()
                .map(|signature| format!("{}{}\n", ctx.indent(), signature.format()))
                .collect::<String>()
        }));

        source.push_str(&ctx.indent());
        source.push_str("end\n");
        source
    }
    fn inject_scope(&self, _parent_scope: &mut Scope) -> Result<(), Error> {
        Ok(())
    }
    fn check(&self, _scope: &Scope) -> Result<(), Error> {
        Ok(())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefStmt {
    pub name: String,
    pub by_reference: bool,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Node for DefStmt {
    fn format(&self, ctx: &mut ScopeManager) -> String {
        let parameters = if self.parameters.is_empty() {
            String::from("!")
        } else {
            format!(
                "[{}]",
                self.parameters
                    .iter()
                    .map(Parameter::format)
                    .collect::<Vec<_>>()
                    .join("; ")
            )
        };

        format!(
            "def {}{} {} {}\n",
            if self.by_reference { "*" } else { "" },
            self.name,
            parameters,
            format_body(&self.body, ctx)
        )
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        parent_scope.declare(&self.name, Symbol::Function, &self.span.start)
    }
    fn check(&self, _scope: &Scope) -> Result<(), Error> {
        check_parameters(&self.parameters)?;

        let mut local = Scope::new();
        for parameter in &self.parameters {
            local.declare(&parameter.name, Symbol::Parameter, &parameter.span.start)?;
        }
        inject_body(&self.body, &mut local)?;
        check_body(&self.body, &local)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleStmt {
    pub name: Vec<String>,
    pub span: Span,
}

impl Node for ModuleStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        format!("module {}\n", self.name.join("."))
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        parent_scope.declare(&self.name.join("."), Symbol::Module, &self.span.start)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenStmt {
    pub name: Vec<String>,
    pub alias: Option<String>,
    pub span: Span,
}

impl OpenStmt {
    /// The name the opened module is reachable under: the alias, or the
    /// last segment of the qualified name.
    pub fn local_name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.name.last().map(String::as_str).unwrap_or_default(),
        }
    }
}

impl Node for OpenStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        match &self.alias {
            Some(alias) => format!("open {} as {}\n", self.name.join("."), alias),
            None => format!("open {}\n", self.name.join(".")),
        }
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        parent_scope.declare(
            self.local_name(),
            Symbol::Alias(self.name.join(".")),
            &self.span.start,
        )
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstStmt {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

impl Node for ConstStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        format!("const {} :- {}\n", self.name, self.value.format())
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        parent_scope.declare(&self.name, Symbol::Constant, &self.span.start)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

// STATEMENTS

/// `begin ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Node for BlockStmt {
    fn format(&self, ctx: &mut ScopeManager) -> String {
        format!("begin\n{}{}end\n", format_lines(&self.body, ctx), ctx.indent())
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        inject_body(&self.body, parent_scope)
    }
    fn check(&self, scope: &Scope) -> Result<(), Error> {
        check_body(&self.body, scope)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub levels: Option<u32>,
    pub span: Span,
}

impl Node for BreakStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        match self.levels {
            Some(levels) => format!("break {}\n", levels),
            None => String::from("break\n"),
        }
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub levels: Option<u32>,
    pub span: Span,
}

impl Node for ContinueStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        match self.levels {
            Some(levels) => format!("continue {}\n", levels),
            None => String::from("continue\n"),
        }
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expression: Expr,
    pub span: Span,
}

impl Node for ExprStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        format!("{}\n", self.expression.format())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeachStmt {
    pub by_reference: bool,
    pub variable: String,
    pub iterable: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Node for ForeachStmt {
    fn format(&self, ctx: &mut ScopeManager) -> String {
        format!(
            "foreach {}{} in {} {}\n",
            if self.by_reference { "*" } else { "" },
            self.variable,
            self.iterable.format(),
            format_body(&self.body, ctx)
        )
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        inject_body(&self.body, parent_scope)
    }
    fn check(&self, scope: &Scope) -> Result<(), Error> {
        check_body(&self.body, scope)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalStmt {
    pub names: Vec<String>,
    pub span: Span,
}

impl Node for GlobalStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        format!("global {}\n", self.names.join(", "))
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        for name in &self.names {
            parent_scope.declare(name, Symbol::Global, &self.span.start)?;
        }
        Ok(())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GotoStmt {
    pub label: String,
    pub span: Span,
}

impl Node for GotoStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        format!("goto {}\n", self.label)
    }
    fn check(&self, scope: &Scope) -> Result<(), Error> {
        if scope.has_label(&self.label) {
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UndefinedLabel { label: self.label.clone() },
                self.span.start.clone(),
            ))
        }
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElifClause {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    pub elifs: Vec<ElifClause>,
    pub else_body: Option<Vec<Stmt>>,
    pub span: Span,
}

impl IfStmt {
    fn bodies(&self) -> impl Iterator<Item = &Vec<Stmt>> {
        std::iter::once(&self.then_body)
            .chain(self.elifs.iter().map(|elif| &elif.body))
            .chain(self.else_body.iter())
    }
}

impl Node for IfStmt {
    fn format(&self, ctx: &mut ScopeManager) -> String {
        let mut source = format!(
            "if {} {}",
            self.condition.format(),
            format_body(&self.then_body, ctx)
        );

        for elif in &self.elifs {
            source.push_str(&format!(
                " elif {} {}",
                elif.condition.format(),
                format_body(&elif.body, ctx)
            ));
        }

        if let Some(else_body) = &self.else_body {
            source.push_str(" else ");
            source.push_str(&format_body(else_body, ctx));
        }

        source.push('\n');
        source
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        for body in self.bodies() {
            inject_body(body, parent_scope)?;
        }
        Ok(())
    }
    fn check(&self, scope: &Scope) -> Result<(), Error> {
        for body in self.bodies() {
            check_body(body, scope)?;
        }
        Ok(())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStmt {
    pub name: String,
    pub span: Span,
}

impl Node for LabelStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        format!("label {}\n", self.name)
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        parent_scope.declare_label(&self.name, &self.span.start)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Expr,
    pub span: Span,
}

impl Node for PrintStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        format!("print {}\n", self.value.format())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaiseStmt {
    pub value: Expr,
    pub span: Span,
}

impl Node for RaiseStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        format!("raise {}\n", self.value.format())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

impl Node for ReturnStmt {
    fn format(&self, _ctx: &mut ScopeManager) -> String {
        match &self.value {
            Some(value) => format!("return {}\n", value.format()),
            None => String::from("return\n"),
        }
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Node for WhileStmt {
    fn format(&self, ctx: &mut ScopeManager) -> String {
        format!(
            "while {} {}\n",
            self.condition.format(),
            format_body(&self.body, ctx)
        )
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        inject_body(&self.body, parent_scope)
    }
    fn check(&self, scope: &Scope) -> Result<(), Error> {
        check_body(&self.body, scope)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}
