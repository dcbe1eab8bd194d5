//! Scope bookkeeping.
//!
//! - `ScopeManager`: nesting depth and indentation while rendering
//! - `Scope`: symbols declared by statements, filled by scope injection
//! - `ScopeResolver`: name resolution used by the parser for every identifier

pub mod resolver;
pub mod scope;

#[cfg(test)]
mod tests;
