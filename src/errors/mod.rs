//! Error types and error handling for the front-end.
//!
//! This module defines the diagnostics produced by the semantic passes.
//! It includes:
//!
//! - Error structures with source position information
//! - One error variant per diagnosable condition
//! - Error names, categories and suggestions
//! - The accumulating diagnostics sink shared by every pass

pub mod diagnostics;
pub mod errors;
