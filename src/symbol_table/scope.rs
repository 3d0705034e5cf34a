use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;

use crate::ast::types::Type;

use super::items::VariableItem;

pub type VariableRef = Rc<RefCell<VariableItem>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Body of a function, pattern or main. Lookups stop here.
    Body,
    /// Branch, loop or lambda body. Lookups continue into the enclosing scope.
    Branch,
}

/// One level of variable bindings.
///
/// A scope only stores the variables declared in it. Inherited variables are
/// reached through the enclosing scopes of the symbol table's stack, so a type
/// written through a branch lands on the record the outer scope owns.
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: usize,
    pub kind: ScopeKind,
    variables: IndexMap<String, VariableRef>,
}

impl Scope {
    pub fn new(id: usize, kind: ScopeKind) -> Self {
        Scope {
            id,
            kind,
            variables: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&VariableRef> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Inserts `variable` unless the name is already taken in this scope.
    /// Returns whether it was inserted.
    pub fn insert(&mut self, variable: VariableItem) -> bool {
        if self.variables.contains_key(&variable.name) {
            return false;
        }
        self.variables
            .insert(variable.name.clone(), Rc::new(RefCell::new(variable)));
        true
    }

    pub fn variable_type(&self, name: &str) -> Option<Type> {
        self.variables
            .get(name)
            .map(|variable| variable.borrow().ty.clone())
    }

    /// Variable names and types in declaration order.
    pub fn variables(&self) -> Vec<(String, Type)> {
        self.variables
            .values()
            .map(|variable| {
                let variable = variable.borrow();
                (variable.name.clone(), variable.ty.clone())
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
