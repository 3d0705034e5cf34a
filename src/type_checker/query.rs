use log::debug;

use crate::{
    ast::{
        expressions::Expr,
        statements::{Stmt, StmtKind},
        types::Type,
    },
    config::AnalyzerConfig,
    errors::diagnostics::Diagnostics,
    symbol_table::symbol_table::SymbolTable,
    Analysis,
};

use super::{
    expr::check_expression,
    stmt::{bind_iterator, check_range, check_statement},
    type_checker::TypeChecker,
};

/// The body a query answers for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Main,
    Function(String),
    Pattern(String),
}

/// Answers the type of expressions of an analysed body without reporting
/// anything. The caller walks the body in order and replays each binding
/// with `record`, so an answer reflects that point of the body.
///
/// The query works on its own copy of the symbol table: re-analysing a call
/// rewrites the callee's entry, and the analysis it was opened on must stay as
/// it was.
#[derive(Debug)]
pub struct TypeQuery {
    symbol_table: SymbolTable,
    diagnostics: Diagnostics,
    cycles: Vec<Vec<String>>,
    config: AnalyzerConfig,
}

impl TypeQuery {
    /// Opens a fresh body scope for `owner`, holding only its parameter slots
    /// as the last analysed call left them. Bindings made inside the body are
    /// seen once they are replayed with `record`.
    pub fn open(analysis: &Analysis, owner: &Owner, config: &AnalyzerConfig) -> Self {
        let mut symbol_table = analysis.symbol_table.clone();
        symbol_table.push_body();
        for (name, ty) in slots(&symbol_table, owner) {
            debug!("{:?}: slot {} is {}", owner, name, ty);
            // Slot names are unique per declaration.
            let _ = symbol_table.declare_variable(&name, ty);
        }

        TypeQuery {
            symbol_table,
            diagnostics: Diagnostics::muted(),
            cycles: analysis.cycles.clone(),
            config: config.clone(),
        }
    }

    fn with_checker<T>(&mut self, run: impl FnOnce(&mut TypeChecker) -> T) -> T {
        let mut type_checker =
            TypeChecker::new(&mut self.symbol_table, &mut self.diagnostics, &self.config);
        type_checker.block_cycles(&self.cycles);
        run(&mut type_checker)
    }

    pub fn type_of(&mut self, expression: &Expr) -> Type {
        self.with_checker(|type_checker| check_expression(type_checker, expression))
    }

    /// Opens a branch copy, as the checker does for `if`, loop and lambda
    /// bodies.
    pub fn enter_branch(&mut self) {
        self.symbol_table.branch_copy();
    }

    /// Closes the innermost branch. The owner's own scope is never closed.
    pub fn exit_branch(&mut self) {
        if self.symbol_table.depth() > 1 {
            self.symbol_table.pop();
        }
    }

    /// Replays the bindings `statement` makes in the current scope:
    /// assignments, pushes that refine a list and `for` iterators.
    pub fn record(&mut self, statement: &Stmt) {
        match &statement.kind {
            StmtKind::Assign { .. } | StmtKind::Push { .. } => self.with_checker(|type_checker| {
                check_statement(type_checker, statement, &mut vec![]);
            }),
            StmtKind::For {
                iterator, range, ..
            } => self.with_checker(|type_checker| {
                let ty = check_range(type_checker, range, &statement.position);
                bind_iterator(type_checker, iterator, ty);
            }),
            _ => {}
        }
    }
}

fn slots(symbol_table: &SymbolTable, owner: &Owner) -> Vec<(String, Type)> {
    match owner {
        Owner::Main => vec![],
        Owner::Function(name) => symbol_table
            .get_function(name)
            .map(|function| {
                function
                    .parameters
                    .iter()
                    .map(|slot| (slot.name.clone(), slot.ty.clone()))
                    .collect()
            })
            .unwrap_or_default(),
        Owner::Pattern(name) => symbol_table
            .get_pattern(name)
            .map(|pattern| vec![(pattern.target.name.clone(), pattern.target.ty.clone())])
            .unwrap_or_default(),
    }
}
