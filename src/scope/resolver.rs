use std::collections::HashMap;

use crate::lexer::tokens::Token;

/// Binds a name token to the name it denotes in the current module context.
///
/// The parser calls this for every identifier it reads.
pub trait ScopeResolver {
    fn resolve_scope(&self, token: &Token) -> String;
}

/// Leaves every name as written.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityResolver;

impl ScopeResolver for IdentityResolver {
    fn resolve_scope(&self, token: &Token) -> String {
        token.value.clone()
    }
}

/// Expands names opened under an alias to their qualified target.
#[derive(Debug, Default, Clone)]
pub struct AliasResolver {
    aliases: HashMap<String, String>,
}

impl AliasResolver {
    pub fn new() -> Self {
        AliasResolver::default()
    }

    pub fn alias(mut self, alias: &str, target: &str) -> Self {
        self.aliases.insert(alias.to_string(), target.to_string());
        self
    }
}

impl ScopeResolver for AliasResolver {
    fn resolve_scope(&self, token: &Token) -> String {
        self.aliases
            .get(&token.value)
            .cloned()
            .unwrap_or_else(|| token.value.clone())
    }
}
