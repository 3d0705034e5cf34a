//! Scoped symbol table.
//!
//! Holds the global table of functions and patterns and the stack of lexical
//! scopes opened while a pass walks a body:
//!
//! - Function and pattern entries with their inferred type slots
//! - Variable records shared between a scope and its branch copies
//! - Body scopes that hide the caller, branch scopes that inherit from it

pub mod items;
pub mod scope;
pub mod symbol_table;

#[cfg(test)]
mod tests;
