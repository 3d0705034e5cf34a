use log::debug;

use crate::{
    ast::{
        ast::{
            trailing_defaults, FunctionDeclaration, MainDeclaration, PatternDeclaration, Program,
            VarDeclaration, RENAME_SEPARATOR,
        },
        expressions::{Expr, ExprKind},
        statements::{Range, Stmt, StmtKind},
        types::Type,
    },
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    symbol_table::{
        items::{FunctionItem, PatternItem},
        symbol_table::SymbolTable,
    },
    Position,
};

/// Name reported by arity diagnostics of immediately invoked lambdas.
pub const LAMBDA_NAME: &str = "lambda";

/// Resolves every name of a program.
///
/// Registers functions and patterns in the global table (renaming duplicates so
/// the rest of the file can still be analysed), then walks every body checking
/// that identifiers, call targets and match targets resolve and that calls
/// supply an acceptable number of arguments.
pub struct NameAnalyzer<'a> {
    symbol_table: SymbolTable,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> NameAnalyzer<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        NameAnalyzer {
            symbol_table: SymbolTable::new(),
            diagnostics,
        }
    }

    pub fn analyze(&mut self, program: &mut Program) {
        self.register_functions(&mut program.functions);
        self.register_patterns(&mut program.patterns);

        for function in program.functions.iter() {
            self.symbol_table.push_body();
            self.visit_function(function);
            self.symbol_table.pop();
        }
        for pattern in program.patterns.iter() {
            self.symbol_table.push_body();
            self.visit_pattern(pattern);
            self.symbol_table.pop();
        }
        self.symbol_table.push_body();
        self.visit_main(&program.main);
        self.symbol_table.pop();
    }

    fn register_functions(&mut self, functions: &mut [FunctionDeclaration]) {
        let mut duplicates = 0;
        for function in functions.iter_mut() {
            if self
                .symbol_table
                .declare_function(FunctionItem::new(function.clone()))
                .is_ok()
            {
                continue;
            }
            self.diagnostics.report(
                ErrorImpl::RedefinitionOfFunction {
                    function: function.name.name.clone(),
                },
                function.position.clone(),
            );
            duplicates += 1;
            let fresh_name = format!("{}{}{}", function.name.name, RENAME_SEPARATOR, duplicates);
            debug!("function {} registered as {}", function.name.name, fresh_name);
            function.name.set_name(fresh_name);
            // A fresh name cannot collide: source names never contain the separator.
            let _ = self
                .symbol_table
                .declare_function(FunctionItem::new(function.clone()));
        }
    }

    fn register_patterns(&mut self, patterns: &mut [PatternDeclaration]) {
        let mut duplicates = 0;
        for pattern in patterns.iter_mut() {
            if self
                .symbol_table
                .declare_pattern(PatternItem::new(pattern.clone()))
                .is_ok()
            {
                continue;
            }
            self.diagnostics.report(
                ErrorImpl::RedefinitionOfPattern {
                    pattern: pattern.name.name.clone(),
                },
                pattern.position.clone(),
            );
            duplicates += 1;
            let fresh_name = format!("{}{}{}", pattern.name.name, RENAME_SEPARATOR, duplicates);
            debug!("pattern {} registered as {}", pattern.name.name, fresh_name);
            pattern.name.set_name(fresh_name);
            let _ = self
                .symbol_table
                .declare_pattern(PatternItem::new(pattern.clone()));
        }
    }

    fn visit_function(&mut self, function: &FunctionDeclaration) {
        for arg in function.args.iter() {
            if arg.name.name == function.name.base_name() {
                self.diagnostics.report(
                    ErrorImpl::IdenticalArgFunctionName {
                        argument: arg.name.name.clone(),
                    },
                    function.position.clone(),
                );
            }
        }
        self.declare_args(&function.args);
        self.visit_body(&function.body);
    }

    fn visit_pattern(&mut self, pattern: &PatternDeclaration) {
        self.declare(&pattern.target.name);
        self.visit_exprs(&pattern.conditions);
        self.visit_exprs(&pattern.returns);
    }

    fn visit_main(&mut self, main: &MainDeclaration) {
        self.visit_body(&main.body);
    }

    /// Declares parameters in order, each default resolved after its own
    /// parameter is declared.
    fn declare_args(&mut self, args: &[VarDeclaration]) {
        for arg in args.iter() {
            self.declare(&arg.name.name);
            if let Some(default) = &arg.default {
                self.visit_expr(default);
            }
        }
    }

    fn declare(&mut self, name: &str) {
        // Redeclaring in the same scope keeps the first binding.
        let _ = self.symbol_table.declare_variable(name, Type::Unresolved);
    }

    fn resolve_variable(&mut self, name: &str, position: &Position) {
        if !self.symbol_table.has_variable(name) {
            self.diagnostics.report(
                ErrorImpl::VariableNotDeclared {
                    variable: name.to_string(),
                },
                position.clone(),
            );
        }
    }

    fn check_arity(
        &mut self,
        name: &str,
        args: &[VarDeclaration],
        supplied: usize,
        position: &Position,
    ) {
        let max = args.len();
        let min = max - trailing_defaults(args);
        if supplied < min || supplied > max {
            self.diagnostics.report(
                ErrorImpl::ArgMisMatch {
                    function: name.to_string(),
                    min,
                    max,
                    received: supplied,
                },
                position.clone(),
            );
        }
    }

    fn visit_body(&mut self, body: &[Stmt]) {
        for stmt in body.iter() {
            self.visit_stmt(stmt);
        }
    }

    fn visit_branch(&mut self, body: &[Stmt]) {
        self.symbol_table.branch_copy();
        self.visit_body(body);
        self.symbol_table.pop();
    }

    fn visit_exprs(&mut self, exprs: &[Expr]) {
        for expr in exprs.iter() {
            self.visit_expr(expr);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expression(expr) | StmtKind::Put(expr) => self.visit_expr(expr),
            StmtKind::Assign {
                target,
                index,
                operator,
                value,
            } => {
                if let Some(index) = index {
                    self.visit_expr(index);
                }
                self.visit_expr(value);
                if index.is_none() && !operator.is_compound() {
                    if !self.symbol_table.has_variable(target) {
                        self.declare(target);
                    }
                } else {
                    self.resolve_variable(target, &stmt.position);
                }
            }
            StmtKind::If {
                conditions,
                then_body,
                else_body,
            } => {
                self.visit_exprs(conditions);
                self.visit_branch(then_body);
                self.visit_branch(else_body);
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
            StmtKind::Push { target, value } => {
                self.visit_expr(target);
                self.visit_expr(value);
            }
            StmtKind::LoopDo { body } => self.visit_branch(body),
            StmtKind::For {
                iterator,
                range,
                body,
            } => {
                self.symbol_table.branch_copy();
                match range {
                    Range::List(elements) => self.visit_exprs(elements),
                    Range::Expression(expr) => self.visit_expr(expr),
                    Range::DoubleDot(from, to) => {
                        self.visit_expr(from);
                        self.visit_expr(to);
                    }
                }
                self.declare(iterator);
                self.visit_body(body);
                self.symbol_table.pop();
            }
            StmtKind::Break { conditions } | StmtKind::Next { conditions } => {
                self.visit_exprs(conditions)
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Identifier(name) => self.resolve_variable(name, &expr.position),
            ExprKind::Int(_) | ExprKind::Float(_) | ExprKind::Bool(_) | ExprKind::String(_) => {}
            ExprKind::List(elements) => self.visit_exprs(elements),
            ExprKind::FunctionPointer(name) => {
                if !self.symbol_table.has_function(name) {
                    self.diagnostics.report(
                        ErrorImpl::FunctionNotDeclared {
                            function: name.clone(),
                        },
                        expr.position.clone(),
                    );
                }
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            ExprKind::Unary { operand, .. } => self.visit_expr(operand),
            ExprKind::Call { callee, args } => {
                self.visit_call(callee, args.len());
                self.visit_exprs(args);
            }
            ExprKind::Index { target, indices } => {
                self.visit_expr(target);
                self.visit_exprs(indices);
            }
            ExprKind::Lambda { args, body } => {
                self.symbol_table.branch_copy();
                self.declare_args(args);
                self.visit_body(body);
                self.symbol_table.pop();
            }
            ExprKind::Append { appendee, appended } => {
                self.visit_expr(appendee);
                self.visit_exprs(appended);
            }
            ExprKind::Len(operand) | ExprKind::Chop(operand) | ExprKind::Chomp(operand) => {
                self.visit_expr(operand)
            }
            ExprKind::Match { pattern, argument } => {
                if !self.symbol_table.has_pattern(pattern) {
                    self.diagnostics.report(
                        ErrorImpl::PatternNotDeclared {
                            pattern: pattern.clone(),
                        },
                        expr.position.clone(),
                    );
                }
                self.visit_expr(argument);
            }
        }
    }

    fn visit_call(&mut self, callee: &Expr, supplied: usize) {
        match &callee.kind {
            ExprKind::Identifier(name) => {
                let args = self
                    .symbol_table
                    .get_function(name)
                    .map(|function| function.declaration.args.clone());
                match args {
                    Ok(args) => self.check_arity(name, &args, supplied, &callee.position),
                    // A variable holding a function pointer.
                    Err(_) if self.symbol_table.has_variable(name) => {}
                    Err(_) => self.diagnostics.report(
                        ErrorImpl::FunctionNotDeclared {
                            function: name.clone(),
                        },
                        callee.position.clone(),
                    ),
                }
            }
            ExprKind::Lambda { args, .. } => {
                self.visit_expr(callee);
                self.check_arity(LAMBDA_NAME, args, supplied, &callee.position);
            }
            _ => self.visit_expr(callee),
        }
    }
}
