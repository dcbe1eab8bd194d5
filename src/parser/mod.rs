//! Parser module for building the Abstract Syntax Tree (AST).
//!
//! A recursive-descent parser with single-token lookahead:
//!
//! - `checker`: side-effect free predicates over the lookahead
//! - `grammar`: declaration productions (module, open, const, def, class)
//!   and the statement lists
//! - `stmt`: ordinary statements, dispatched through a lookup table
//! - `expr`: a Pratt parser for expressions, using NUD (null denotation) and
//!   LED (left denotation) handlers with binding powers for precedence
//!
//! There is no error recovery: the first syntax error ends the parse.

pub mod checker;
pub mod expr;
pub mod grammar;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
