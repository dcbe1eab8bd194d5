use crate::{
    errors::errors::Error,
    scope::scope::{Scope, ScopeManager},
    Span,
};

use super::statements::{
    BlockStmt, BreakStmt, ClassStmt, ConstStmt, ContinueStmt, DefStmt, ExprStmt, ForeachStmt,
    GlobalStmt, GotoStmt, IfStmt, LabelStmt, ModuleStmt, OpenStmt, PrintStmt, RaiseStmt,
    ReturnStmt, WhileStmt,
};

/// Node Trait
///
/// What every statement can do once parsed. The tree is built once and
/// then handed to each pass in turn.
pub trait Node {
    /// Renders the canonical source text of the node.
    ///
    /// The first line is not indented (the caller places it); any further
    /// lines are indented from `ctx`, and the text ends with a newline.
    fn format(&self, ctx: &mut ScopeManager) -> String;
    /// Registers the symbols this node declares in the enclosing scope.
    fn inject_scope(&self, _parent_scope: &mut Scope) -> Result<(), Error> {
        Ok(())
    }
    /// Validates the node against the symbols injected before it.
    fn check(&self, _scope: &Scope) -> Result<(), Error> {
        Ok(())
    }
    fn get_span(&self) -> &Span;
}

/// Statement
///
/// The closed set of statements the parser produces. Each variant owns its
/// children.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Break(BreakStmt),
    Class(ClassStmt),
    Const(ConstStmt),
    Continue(ContinueStmt),
    Def(DefStmt),
    Expr(ExprStmt),
    Foreach(ForeachStmt),
    Global(GlobalStmt),
    Goto(GotoStmt),
    If(IfStmt),
    Label(LabelStmt),
    Module(ModuleStmt),
    Open(OpenStmt),
    Print(PrintStmt),
    Raise(RaiseStmt),
    Return(ReturnStmt),
    While(WhileStmt),
}

impl Stmt {
    fn as_node(&self) -> &dyn Node {
        match self {
            Stmt::Block(stmt) => stmt,
            Stmt::Break(stmt) => stmt,
            Stmt::Class(stmt) => stmt,
            Stmt::Const(stmt) => stmt,
            Stmt::Continue(stmt) => stmt,
            Stmt::Def(stmt) => stmt,
            Stmt::Expr(stmt) => stmt,
            Stmt::Foreach(stmt) => stmt,
            Stmt::Global(stmt) => stmt,
            Stmt::Goto(stmt) => stmt,
            Stmt::If(stmt) => stmt,
            Stmt::Label(stmt) => stmt,
            Stmt::Module(stmt) => stmt,
            Stmt::Open(stmt) => stmt,
            Stmt::Print(stmt) => stmt,
            Stmt::Raise(stmt) => stmt,
            Stmt::Return(stmt) => stmt,
            Stmt::While(stmt) => stmt,
        }
    }
}

impl Node for Stmt {
    fn format(&self, ctx: &mut ScopeManager) -> String {
        self.as_node().format(ctx)
    }
    fn inject_scope(&self, parent_scope: &mut Scope) -> Result<(), Error> {
        self.as_node().inject_scope(parent_scope)
    }
    fn check(&self, scope: &Scope) -> Result<(), Error> {
        self.as_node().check(scope)
    }
    fn get_span(&self) -> &Span {
        self.as_node().get_span()
    }
}

/// Renders a whole program at depth zero.
pub fn format_program(statements: &[Stmt]) -> String {
    let mut ctx = ScopeManager::new();
    statements.iter().map(|stmt| stmt.format(&mut ctx)).collect()
}
