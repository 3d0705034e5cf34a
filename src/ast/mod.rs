/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure handed over by the parser
///
/// Submodules:
/// - ast: Program and declaration nodes (functions, patterns, main)
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes and loop ranges
/// - types: The structural types inferred for expressions
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
