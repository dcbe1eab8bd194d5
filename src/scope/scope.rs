use std::collections::HashMap;

use crate::{
    ast::ast::{Node, Stmt},
    errors::errors::{Error, ErrorImpl},
    Position,
};

const DEFAULT_INDENT_WIDTH: usize = 2;

/// Tracks nesting depth while rendering so every line can be indented to
/// the body it belongs to.
#[derive(Debug, Clone)]
pub struct ScopeManager {
    depth: usize,
    indent_width: usize,
}

impl Default for ScopeManager {
    fn default() -> Self {
        ScopeManager::new()
    }
}

impl ScopeManager {
    pub fn new() -> Self {
        ScopeManager::with_indent_width(DEFAULT_INDENT_WIDTH)
    }

    pub fn with_indent_width(indent_width: usize) -> Self {
        ScopeManager {
            depth: 0,
            indent_width,
        }
    }

    pub fn open_scope(&mut self) {
        self.depth += 1;
    }

    /// Leaves the innermost scope. Closing more scopes than were opened is a
    /// bug in the caller.
    pub fn close_scope(&mut self) {
        debug_assert!(self.depth > 0, "closed a scope that was never opened");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn get_depth(&self) -> usize {
        self.depth
    }

    pub fn indent(&self) -> String {
        " ".repeat(self.depth * self.indent_width)
    }

    /// Runs `f` one level deeper, closing the scope again before returning.
    pub fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.open_scope();
        let result = f(self);
        self.close_scope();
        result
    }
}

/// What a name was declared as.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Module,
    /// An `open`ed module, holding the qualified name it stands for
    Alias(String),
    Function,
    Constant,
    Global,
    Parameter,
}

/// Names declared by the statements of one module or function body.
#[derive(Debug, Default, Clone)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    labels: HashMap<String, Position>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn declare(&mut self, name: &str, symbol: Symbol, position: &Position) -> Result<(), Error> {
        if self.symbols.contains_key(name) {
            Err(Error::new(ErrorImpl::SymbolAlreadyDeclared { symbol: name.to_string() }, position.clone()))
        } else {
            self.symbols.insert(name.to_string(), symbol);
            Ok(())
        }
    }

    pub fn declare_label(&mut self, name: &str, position: &Position) -> Result<(), Error> {
        if self.labels.contains_key(name) {
            Err(Error::new(ErrorImpl::SymbolAlreadyDeclared { symbol: name.to_string() }, position.clone()))
        } else {
            self.labels.insert(name.to_string(), position.clone());
            Ok(())
        }
    }

    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    /// Number of declared symbols. Labels are not counted.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// True when neither symbols nor labels have been declared.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty() && self.labels.is_empty()
    }
}

/// Injects every statement into a fresh module scope, then runs each
/// statement's check against it.
pub fn analyze(statements: &[Stmt]) -> Result<Scope, Error> {
    let mut scope = Scope::new();

    for stmt in statements {
        stmt.inject_scope(&mut scope)?;
    }

    for stmt in statements {
        stmt.check(&scope)?;
    }

    Ok(scope)
}
