//! Type inference.
//!
//! Nothing in a program carries a type annotation, so every type is inferred:
//!
//! - Functions are checked per call site with that call's argument types
//! - Patterns are checked per match with the matched value's type
//! - Return types, list elements and pattern cases must agree on one type
//! - Only main and what it reaches is checked
//!
//! A call into a function that is already being checked, or that sits on a
//! reported call cycle, is not followed and yields `Unresolved`.
//!
//! [`query::TypeQuery`] replays the same rules without diagnostics for
//! consumers of a finished analysis.

pub mod expr;
pub mod query;
pub mod stmt;
pub mod type_checker;
