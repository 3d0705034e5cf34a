#![allow(clippy::module_inception)]

//! Semantic front-end for a small imperative language without type annotations.
//!
//! The crate takes a parsed [`ast::ast::Program`] and runs three passes over it:
//!
//! - name analysis (redefinitions, unresolved names, call arity)
//! - dependency detection (call graph cycles)
//! - type inference (call-site re-analysis of every reachable function)
//!
//! The result is an [`Analysis`]: the populated global symbol table, the ordered
//! diagnostics, the call graph cycles and the set of analysed functions.

use std::{collections::BTreeSet, fmt::Display, rc::Rc};

use log::debug;

use crate::{
    ast::ast::Program,
    dependency::dependency_detector::DependencyDetector,
    errors::{diagnostics::Diagnostics, errors::Error},
    name_analyzer::name_analyzer::NameAnalyzer,
    symbol_table::symbol_table::SymbolTable,
    type_checker::type_checker::TypeChecker,
};

pub mod ast;
pub mod config;
pub mod dependency;
pub mod errors;
pub mod name_analyzer;
pub mod symbol_table;
pub mod type_checker;

pub use config::AnalyzerConfig;

/// A source location: the line number and the file it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }

    /// Position on `line` of the default input file.
    pub fn at(line: u32) -> Self {
        Position(line, Rc::new(String::from(config::DEFAULT_FILE_NAME)))
    }

    pub fn line(&self) -> u32 {
        self.0
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

/// Everything the front-end hands over to the code generator.
#[derive(Debug)]
pub struct Analysis {
    /// Global table with the last inferred types of every function and pattern.
    pub symbol_table: SymbolTable,
    pub diagnostics: Vec<Error>,
    /// Call graph cycles, each an ordered list of function names.
    pub cycles: Vec<Vec<String>>,
    /// Functions and patterns that were reached from main during inference.
    pub visited: BTreeSet<String>,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Diagnostics whose error name matches `name`, in reporting order.
    pub fn diagnostics_of(&self, name: &str) -> Vec<&Error> {
        self.diagnostics
            .iter()
            .filter(|error| error.get_error_name() == name)
            .collect()
    }
}

/// Runs every pass over `program`.
///
/// The program is taken mutably because duplicate declarations are renamed in
/// place so that later passes (and the code generator) see unique names.
pub fn analyze(program: &mut Program, config: &AnalyzerConfig) -> Analysis {
    let mut diagnostics = Diagnostics::new(config.deduplicate_diagnostics);

    debug!("name analysis of {}", config.file_name);
    let mut name_analyzer = NameAnalyzer::new(&mut diagnostics);
    name_analyzer.analyze(program);

    let mut cycles = vec![];
    if config.check_dependencies {
        debug!("dependency detection of {}", config.file_name);
        let mut detector = DependencyDetector::new();
        detector.visit_program(program);
        cycles = detector.report_cycles(&mut diagnostics);
    }

    debug!("type checking of {}", config.file_name);
    let mut symbol_table = SymbolTable::new();
    let visited = {
        let mut type_checker = TypeChecker::new(&mut symbol_table, &mut diagnostics, config);
        type_checker.block_cycles(&cycles);
        type_checker.check_program(program);
        type_checker.into_visited()
    };

    Analysis {
        symbol_table,
        diagnostics: diagnostics.into_errors(),
        cycles,
        visited,
    }
}
