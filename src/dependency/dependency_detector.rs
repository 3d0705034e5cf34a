use std::collections::HashMap;

use log::debug;

use crate::{
    ast::{
        ast::{FunctionDeclaration, Program, VarDeclaration},
        expressions::{Expr, ExprKind},
        statements::{Range, Stmt, StmtKind},
    },
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    Position,
};

use super::dependency_graph::DependencyGraph;

/// Builds the call graph of a program.
///
/// Must run after name analysis so that renamed duplicates get their own node.
#[derive(Debug, Default)]
pub struct DependencyDetector {
    graph: DependencyGraph,
    current_function: String,
    declared_at: HashMap<String, Position>,
}

impl DependencyDetector {
    pub fn new() -> Self {
        DependencyDetector::default()
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn visit_program(&mut self, program: &Program) {
        for function in program.functions.iter() {
            self.declared_at
                .insert(function.name.name.clone(), function.position.clone());
        }
        for function in program.functions.iter() {
            self.visit_function(function);
        }
    }

    fn visit_function(&mut self, function: &FunctionDeclaration) {
        self.current_function = function.name.name.clone();
        self.graph.add_node(&function.name.name);

        // Defaults are type checked as part of the callee.
        self.visit_args(&function.args);
        self.visit_body(&function.body);
    }

    fn visit_args(&mut self, args: &[VarDeclaration]) {
        for default in args.iter().filter_map(|arg| arg.default.as_ref()) {
            self.visit_expr(default);
        }
    }

    fn visit_body(&mut self, body: &[Stmt]) {
        for stmt in body.iter() {
            self.visit_stmt(stmt);
        }
    }

    fn visit_exprs(&mut self, exprs: &[Expr]) {
        for expr in exprs.iter() {
            self.visit_expr(expr);
        }
    }

    /// Calls through variables and names that were never declared have no
    /// node to point at.
    fn add_dependency(&mut self, callee: &str) {
        if !self.declared_at.contains_key(callee) {
            return;
        }
        debug!("dependency {} -> {}", self.current_function, callee);
        let caller = self.current_function.clone();
        self.graph.add_edge(&caller, callee);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expression(expr) | StmtKind::Put(expr) => self.visit_expr(expr),
            StmtKind::Assign { index, value, .. } => {
                if let Some(index) = index {
                    self.visit_expr(index);
                }
                self.visit_expr(value);
            }
            StmtKind::If {
                conditions,
                then_body,
                else_body,
            } => {
                self.visit_exprs(conditions);
                self.visit_body(then_body);
                self.visit_body(else_body);
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
            StmtKind::LoopDo { body } => self.visit_body(body),
            StmtKind::For { range, body, .. } => {
                match range {
                    Range::List(elements) => self.visit_exprs(elements),
                    Range::Expression(expr) => self.visit_expr(expr),
                    Range::DoubleDot(from, to) => {
                        self.visit_expr(from);
                        self.visit_expr(to);
                    }
                }
                self.visit_body(body);
            }
            StmtKind::Break { conditions } | StmtKind::Next { conditions } => {
                self.visit_exprs(conditions)
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Identifier(_)
            | ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Bool(_)
            | ExprKind::String(_) => {}
            ExprKind::List(elements) => self.visit_exprs(elements),
            ExprKind::FunctionPointer(name) => self.add_dependency(name),
            ExprKind::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            ExprKind::Unary { operand, .. } => self.visit_expr(operand),
            ExprKind::Call { callee, args } => {
                match &callee.kind {
                    ExprKind::Identifier(name) => self.add_dependency(name),
                    _ => self.visit_expr(callee),
                }
                self.visit_exprs(args);
            }
            ExprKind::Index { target, indices } => {
                self.visit_expr(target);
                self.visit_exprs(indices);
            }
            ExprKind::Lambda { args, body } => {
                self.visit_args(args);
                self.visit_body(body);
            }
            ExprKind::Append { appendee, appended } => {
                self.visit_expr(appendee);
                self.visit_exprs(appended);
            }
            ExprKind::Len(operand) | ExprKind::Chop(operand) | ExprKind::Chomp(operand) => {
                self.visit_expr(operand)
            }
            ExprKind::Match { argument, .. } => self.visit_expr(argument),
        }
    }

    /// Reports one `CircularDependency` per elementary cycle and returns the
    /// cycles.
    pub fn report_cycles(&self, diagnostics: &mut Diagnostics) -> Vec<Vec<String>> {
        let cycles = self.graph.find_cycles();
        for cycle in cycles.iter() {
            let position = cycle
                .first()
                .and_then(|name| self.declared_at.get(name))
                .cloned()
                .unwrap_or_else(Position::null);
            debug!("cycle {:?}", cycle);
            diagnostics.report(
                ErrorImpl::CircularDependency {
                    cycle: cycle.clone(),
                },
                position,
            );
        }
        cycles
    }
}
