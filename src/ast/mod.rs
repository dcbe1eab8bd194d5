/// AST (Abstract Syntax Tree) module
/// Contains everything the parser builds
///
/// Submodules:
/// - ast: the `Stmt` sum type and the `Node` capabilities every statement has
/// - expressions: expression nodes
/// - statements: one struct per statement, plus parameters and signatures
pub mod ast;
pub mod expressions;
pub mod statements;
