use std::collections::{BTreeSet, HashSet};

use log::{debug, warn};

use crate::{
    ast::{
        ast::{Program, VarDeclaration},
        statements::Stmt,
        types::{unify_all, Type},
    },
    config::AnalyzerConfig,
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    name_analyzer::name_analyzer::LAMBDA_NAME,
    symbol_table::{
        items::{FunctionItem, PatternItem},
        symbol_table::SymbolTable,
    },
    Position,
};

use super::{expr::check_expression, stmt::check_body};

/// Type inference context.
///
/// Parameter types are never declared, so a function body is type checked once
/// per call with that call's argument types. The symbol table entries keep the
/// types of the last call that was checked.
#[derive(Debug)]
pub struct TypeChecker<'a> {
    pub symbol_table: &'a mut SymbolTable,
    pub diagnostics: &'a mut Diagnostics,
    infer_cyclic_functions: bool,
    /// Functions on a reported call graph cycle.
    blocked: HashSet<String>,
    /// Functions and patterns whose bodies are being checked, outermost first.
    active: Vec<String>,
    visited: BTreeSet<String>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(
        symbol_table: &'a mut SymbolTable,
        diagnostics: &'a mut Diagnostics,
        config: &AnalyzerConfig,
    ) -> Self {
        TypeChecker {
            symbol_table,
            diagnostics,
            infer_cyclic_functions: config.infer_cyclic_functions,
            blocked: HashSet::new(),
            active: vec![],
            visited: BTreeSet::new(),
        }
    }

    /// Refuses calls into every function of `cycles`. Their bodies have no
    /// call site to start inference from.
    pub fn block_cycles(&mut self, cycles: &[Vec<String>]) {
        self.blocked.extend(cycles.iter().flatten().cloned());
    }

    /// Names of the functions and patterns checked so far.
    pub fn into_visited(self) -> BTreeSet<String> {
        self.visited
    }

    pub fn report(&mut self, error_impl: ErrorImpl, position: &Position) {
        self.diagnostics.report(error_impl, position.clone());
    }

    /// Registers every declaration, then checks main. Only functions and
    /// patterns reachable from main are ever checked.
    pub fn check_program(&mut self, program: &Program) {
        for function in program.functions.iter() {
            if self
                .symbol_table
                .declare_function(FunctionItem::new(function.clone()))
                .is_err()
            {
                debug!("function {} already registered", function.name.name);
            }
        }
        for pattern in program.patterns.iter() {
            if self
                .symbol_table
                .declare_pattern(PatternItem::new(pattern.clone()))
                .is_err()
            {
                debug!("pattern {} already registered", pattern.name.name);
            }
        }

        self.symbol_table.push_body();
        check_body(self, &program.main.body, &mut vec![]);
        if let Some(scope) = self.symbol_table.pop() {
            self.symbol_table.set_main_scope(scope);
        }
    }

    fn refuses(&self, name: &str) -> bool {
        if self.active.iter().any(|active| active == name) {
            warn!("{} is already being checked, call not followed", name);
            return true;
        }
        if !self.infer_cyclic_functions && self.blocked.contains(name) {
            warn!("{} is on a call cycle, call not followed", name);
            return true;
        }
        false
    }

    /// Checks the body of `name` for one call and returns its return type.
    ///
    /// Supplied argument types overwrite the parameter slots; trailing slots
    /// without an argument take the type of their default value, checked in the
    /// callee's scope after the supplied parameters are bound.
    pub fn infer_call(&mut self, name: &str, arg_types: Vec<Type>) -> Type {
        if self.refuses(name) {
            return Type::Unresolved;
        }
        let Ok(function) = self.symbol_table.get_function(name) else {
            return Type::Unresolved;
        };
        let declaration = function.declaration.clone();
        debug!("checking {} with ({:?})", name, arg_types);

        self.visited.insert(name.to_string());
        self.active.push(name.to_string());
        self.symbol_table.push_body();

        let parameters = self.bind_arguments(&declaration.args, arg_types);
        let mut returns = vec![];
        check_body(self, &declaration.body, &mut returns);
        let scope = self.symbol_table.pop();

        let return_type = self.unify_returns(&returns).unwrap_or_else(|| {
            self.report(
                ErrorImpl::FunctionIncompatibleReturnTypes {
                    function: declaration.name.base_name().to_string(),
                },
                &declaration.position,
            );
            Type::Unresolved
        });
        self.active.pop();

        if let Ok(function) = self.symbol_table.get_function_mut(name) {
            for (slot, ty) in function.parameters.iter_mut().zip(parameters) {
                debug!("{}: parameter {} is {}", name, slot.name, ty);
                slot.ty = ty;
            }
            function.return_type = return_type.clone();
            function.scope = scope;
        }
        debug!("{} returns {}", name, return_type);
        return_type
    }

    /// Checks an immediately invoked lambda in a branch copy of the current
    /// scope.
    pub fn infer_lambda(
        &mut self,
        args: &[VarDeclaration],
        body: &[Stmt],
        arg_types: Vec<Type>,
        position: &Position,
    ) -> Type {
        self.symbol_table.branch_copy();
        self.bind_arguments(args, arg_types);
        let mut returns = vec![];
        check_body(self, body, &mut returns);
        self.symbol_table.pop();

        match self.unify_returns(&returns) {
            Some(ty) => ty,
            None => {
                self.report(
                    ErrorImpl::FunctionIncompatibleReturnTypes {
                        function: String::from(LAMBDA_NAME),
                    },
                    position,
                );
                Type::Unresolved
            }
        }
    }

    /// Declares `args` in the innermost scope and returns their types.
    fn bind_arguments(&mut self, args: &[VarDeclaration], arg_types: Vec<Type>) -> Vec<Type> {
        let mut supplied = arg_types.into_iter();
        let mut bound = Vec::with_capacity(args.len());
        for arg in args.iter() {
            let ty = match (supplied.next(), &arg.default) {
                (Some(ty), _) => ty,
                (None, Some(default)) => check_expression(self, default),
                (None, None) => Type::Unresolved,
            };
            if self
                .symbol_table
                .declare_variable(&arg.name.name, ty.clone())
                .is_err()
            {
                debug!("parameter {} declared twice", arg.name.name);
            }
            bound.push(ty);
        }
        bound
    }

    /// Binds `value_type` to the pattern's variable, checks its cases and
    /// returns the type they agree on.
    pub fn infer_match(&mut self, name: &str, value_type: Type) -> Type {
        if self.refuses(name) {
            return Type::Unresolved;
        }
        let Ok(pattern) = self.symbol_table.get_pattern(name) else {
            return Type::Unresolved;
        };
        let declaration = pattern.declaration.clone();
        debug!("checking pattern {} with {}", name, value_type);

        self.visited.insert(name.to_string());
        self.active.push(name.to_string());
        self.symbol_table.push_body();
        if self
            .symbol_table
            .declare_variable(&declaration.target.name, value_type.clone())
            .is_err()
        {
            debug!("pattern target {} declared twice", declaration.target.name);
        }

        let conditions_hold = declaration.conditions.iter().all(|condition| {
            let ty = check_expression(self, condition);
            if ty == Type::Bool || ty == Type::Unresolved {
                true
            } else {
                self.report(ErrorImpl::ConditionIsNotBool, &condition.position);
                false
            }
        });
        let result = if conditions_hold {
            let returns: Vec<Type> = declaration
                .returns
                .iter()
                .map(|value| check_expression(self, value))
                .collect();
            self.unify_returns(&returns).unwrap_or_else(|| {
                self.report(
                    ErrorImpl::PatternIncompatibleReturnTypes {
                        pattern: declaration.name.base_name().to_string(),
                    },
                    &declaration.position,
                );
                Type::Unresolved
            })
        } else {
            Type::NoValue
        };

        let scope = self.symbol_table.pop();
        self.active.pop();
        if let Ok(pattern) = self.symbol_table.get_pattern_mut(name) {
            pattern.target.ty = value_type;
            pattern.value_type = result.clone();
            pattern.scope = scope;
        }
        debug!("pattern {} yields {}", name, result);
        result
    }

    /// The single type a list of return types agrees on. `NoValue` when there
    /// is none, `None` when they disagree. Unresolved entries already failed
    /// elsewhere and are skipped.
    pub fn unify_returns(&self, returns: &[Type]) -> Option<Type> {
        if returns.is_empty() {
            return Some(Type::NoValue);
        }
        match unify_all(returns.iter().filter(|ty| **ty != Type::Unresolved)) {
            Ok(unified) => Some(unified.unwrap_or(Type::Unresolved)),
            Err(_) => None,
        }
    }
}
