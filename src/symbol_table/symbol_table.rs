use std::rc::Rc;

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use crate::ast::types::Type;

use super::{
    items::{FunctionItem, ItemKind, PatternItem, VariableItem},
    scope::{Scope, ScopeKind, VariableRef},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolTableError {
    #[error("item {key:?} already exists")]
    ItemAlreadyExists { key: String },
    #[error("item {key:?} not found")]
    ItemNotFound { key: String },
    #[error("no scope is open")]
    NoOpenScope,
}

/// A resolved name.
#[derive(Debug)]
pub enum Entry<'a> {
    Function(&'a FunctionItem),
    Pattern(&'a PatternItem),
    Variable(VariableRef),
}

/// Global table of functions and patterns plus the stack of open lexical
/// scopes.
///
/// Functions and patterns are only ever declared in, and resolved against, the
/// global table. Variables are declared in the innermost scope and resolved
/// from the innermost scope outwards, stopping at the nearest body scope.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    functions: IndexMap<String, FunctionItem>,
    patterns: IndexMap<String, PatternItem>,
    /// Top-level scope of main once it has been type checked.
    main_scope: Option<Scope>,
    scopes: Vec<Scope>,
    next_scope_id: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    // Global

    pub fn declare_function(&mut self, item: FunctionItem) -> Result<(), SymbolTableError> {
        let name = item.name().to_string();
        if self.functions.contains_key(&name) {
            return Err(SymbolTableError::ItemAlreadyExists {
                key: ItemKind::Function.key(&name),
            });
        }
        self.functions.insert(name, item);
        Ok(())
    }

    pub fn declare_pattern(&mut self, item: PatternItem) -> Result<(), SymbolTableError> {
        let name = item.name().to_string();
        if self.patterns.contains_key(&name) {
            return Err(SymbolTableError::ItemAlreadyExists {
                key: ItemKind::Pattern.key(&name),
            });
        }
        self.patterns.insert(name, item);
        Ok(())
    }

    pub fn get_function(&self, name: &str) -> Result<&FunctionItem, SymbolTableError> {
        self.functions
            .get(name)
            .ok_or_else(|| SymbolTableError::ItemNotFound {
                key: ItemKind::Function.key(name),
            })
    }

    pub fn get_function_mut(&mut self, name: &str) -> Result<&mut FunctionItem, SymbolTableError> {
        self.functions
            .get_mut(name)
            .ok_or_else(|| SymbolTableError::ItemNotFound {
                key: ItemKind::Function.key(name),
            })
    }

    pub fn get_pattern(&self, name: &str) -> Result<&PatternItem, SymbolTableError> {
        self.patterns
            .get(name)
            .ok_or_else(|| SymbolTableError::ItemNotFound {
                key: ItemKind::Pattern.key(name),
            })
    }

    pub fn get_pattern_mut(&mut self, name: &str) -> Result<&mut PatternItem, SymbolTableError> {
        self.patterns
            .get_mut(name)
            .ok_or_else(|| SymbolTableError::ItemNotFound {
                key: ItemKind::Pattern.key(name),
            })
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn has_pattern(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionItem> {
        self.functions.values()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &PatternItem> {
        self.patterns.values()
    }

    /// Resolves `name` in the namespace of `kind`.
    pub fn lookup(&self, kind: ItemKind, name: &str) -> Result<Entry<'_>, SymbolTableError> {
        match kind {
            ItemKind::Function => self.get_function(name).map(Entry::Function),
            ItemKind::Pattern => self.get_pattern(name).map(Entry::Pattern),
            ItemKind::Variable => self.get_variable(name).map(Entry::Variable),
        }
    }

    pub fn main_scope(&self) -> Option<&Scope> {
        self.main_scope.as_ref()
    }

    pub fn set_main_scope(&mut self, scope: Scope) {
        self.main_scope = Some(scope);
    }

    // Scopes

    fn open(&mut self, kind: ScopeKind) -> usize {
        let id = self.next_scope_id;
        self.next_scope_id += 1;
        trace!("push {:?} scope {} (depth {})", kind, id, self.scopes.len() + 1);
        self.scopes.push(Scope::new(id, kind));
        id
    }

    /// Opens a fresh scope for a function, pattern or main body. Nothing
    /// declared outside of it is visible from inside.
    pub fn push_body(&mut self) -> usize {
        self.open(ScopeKind::Body)
    }

    /// Opens a branch copy of the innermost scope. Every binding visible before
    /// stays visible and shared; new declarations are dropped on `pop`.
    pub fn branch_copy(&mut self) -> usize {
        self.open(ScopeKind::Branch)
    }

    /// Re-opens a scope kept from an earlier analysis.
    pub fn push(&mut self, scope: Scope) {
        trace!("push stored scope {} (depth {})", scope.id, self.scopes.len() + 1);
        self.next_scope_id = self.next_scope_id.max(scope.id + 1);
        self.scopes.push(scope);
    }

    pub fn pop(&mut self) -> Option<Scope> {
        let scope = self.scopes.pop();
        if let Some(scope) = &scope {
            trace!("pop scope {} (depth {})", scope.id, self.scopes.len());
        }
        scope
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current_scope(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    /// Scopes visible from the innermost one, innermost first.
    fn visible_scopes(&self) -> impl Iterator<Item = &Scope> {
        let mut reached_body = false;
        self.scopes.iter().rev().take_while(move |scope| {
            let visible = !reached_body;
            reached_body |= scope.kind == ScopeKind::Body;
            visible
        })
    }

    // Variables

    /// Declares `name` in the innermost scope. The first declaration in a scope
    /// wins; a second one is an error and leaves the first untouched.
    pub fn declare_variable(&mut self, name: &str, ty: Type) -> Result<(), SymbolTableError> {
        let scope = self.scopes.last_mut().ok_or(SymbolTableError::NoOpenScope)?;
        let item = VariableItem {
            name: name.to_string(),
            ty,
            scope_id: scope.id,
        };
        if scope.insert(item) {
            Ok(())
        } else {
            Err(SymbolTableError::ItemAlreadyExists {
                key: ItemKind::Variable.key(name),
            })
        }
    }

    pub fn get_variable(&self, name: &str) -> Result<VariableRef, SymbolTableError> {
        self.visible_scopes()
            .find_map(|scope| scope.get(name))
            .map(Rc::clone)
            .ok_or_else(|| SymbolTableError::ItemNotFound {
                key: ItemKind::Variable.key(name),
            })
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.get_variable(name).is_ok()
    }

    pub fn variable_type(&self, name: &str) -> Result<Type, SymbolTableError> {
        self.get_variable(name)
            .map(|variable| variable.borrow().ty.clone())
    }

    /// Re-types a visible variable, or declares it in the innermost scope when
    /// no visible scope has it.
    pub fn declare_or_update(&mut self, name: &str, ty: Type) -> Result<(), SymbolTableError> {
        match self.get_variable(name) {
            Ok(variable) => {
                variable.borrow_mut().ty = ty;
                Ok(())
            }
            Err(_) => self.declare_variable(name, ty),
        }
    }
}
