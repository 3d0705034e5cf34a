//! Name resolution.
//!
//! Runs before every other pass and checks that names refer to something:
//!
//! - Duplicate functions and patterns are reported and renamed `name#k`
//! - Variables, call targets, function pointers and match targets must resolve
//! - Calls must supply between the required and the declared argument count
//! - A parameter may not share its function's name

pub mod name_analyzer;

#[cfg(test)]
mod tests;
