//! Lexical analysis module.
//!
//! Converts source text into the token stream consumed by the parser:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, identifiers, literals and punctuation
//! - Line/column tracking for error reporting
//! - Comments and whitespace skipping

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
