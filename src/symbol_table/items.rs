use std::fmt::Display;

use crate::ast::{
    ast::{FunctionDeclaration, PatternDeclaration},
    types::Type,
};

use super::scope::Scope;

/// The namespaces a name can live in. A function, a pattern and a variable may
/// share a name without clashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Function,
    Pattern,
    Variable,
}

impl ItemKind {
    pub fn key(&self, name: &str) -> String {
        format!("{}{}", self, name)
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Function => write!(f, "Function:"),
            ItemKind::Pattern => write!(f, "Pattern:"),
            ItemKind::Variable => write!(f, "Var:"),
        }
    }
}

/// A named, typed slot: a function parameter or a pattern's bound variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub name: String,
    pub ty: Type,
}

impl Slot {
    pub fn new(name: impl Into<String>) -> Self {
        Slot {
            name: name.into(),
            ty: Type::Unresolved,
        }
    }
}

/// Global entry of a function.
///
/// The parameter slots belong to the function, not to a call: every call
/// overwrites them, so after analysis they hold the argument types of the last
/// call that was checked.
#[derive(Debug, Clone)]
pub struct FunctionItem {
    pub declaration: FunctionDeclaration,
    pub parameters: Vec<Slot>,
    pub return_type: Type,
    /// Top-level scope of the last analysis of the body.
    pub scope: Option<Scope>,
}

impl FunctionItem {
    pub fn new(declaration: FunctionDeclaration) -> Self {
        let parameters = declaration
            .args
            .iter()
            .map(|arg| Slot::new(arg.name.name.clone()))
            .collect();
        FunctionItem {
            declaration,
            parameters,
            return_type: Type::Unresolved,
            scope: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.name
    }

    pub fn parameter_types(&self) -> Vec<Type> {
        self.parameters.iter().map(|slot| slot.ty.clone()).collect()
    }
}

/// Global entry of a pattern. Like function parameters, the bound variable's
/// slot keeps the type of the last match that was checked.
#[derive(Debug, Clone)]
pub struct PatternItem {
    pub declaration: PatternDeclaration,
    pub target: Slot,
    pub value_type: Type,
    pub scope: Option<Scope>,
}

impl PatternItem {
    pub fn new(declaration: PatternDeclaration) -> Self {
        let target = Slot::new(declaration.target.name.clone());
        PatternItem {
            declaration,
            target,
            value_type: Type::Unresolved,
            scope: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.name
    }
}

/// A variable binding, shared by reference between a scope and its branch
/// copies.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableItem {
    pub name: String,
    pub ty: Type,
    /// Id of the scope that declared the variable.
    pub scope_id: usize,
}
