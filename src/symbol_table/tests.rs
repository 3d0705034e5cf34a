//! Unit tests for the symbol table.

use crate::ast::{
    ast::{FunctionDeclaration, Identifier, PatternDeclaration, VarDeclaration},
    expressions::Expr,
    types::Type,
};
use crate::Position;

use super::{
    items::{FunctionItem, ItemKind, PatternItem},
    symbol_table::{Entry, SymbolTable, SymbolTableError},
};

fn function(name: &str, args: &[&str]) -> FunctionItem {
    FunctionItem::new(FunctionDeclaration::new(
        Identifier::new(name, Position::at(1)),
        args.iter()
            .map(|arg| VarDeclaration::new(Identifier::new(*arg, Position::at(1))))
            .collect(),
        vec![],
    ))
}

fn pattern(name: &str) -> PatternItem {
    PatternItem::new(PatternDeclaration::new(
        Identifier::new(name, Position::at(1)),
        Identifier::new("x", Position::at(1)),
        vec![(Expr::bool(true, Position::at(1)), Expr::int(1, Position::at(1)))],
    ))
}

#[test]
fn test_declare_function_first_writer_wins() {
    let mut table = SymbolTable::new();
    table.declare_function(function("f", &["a"])).unwrap();

    let error = table.declare_function(function("f", &["a", "b"])).unwrap_err();

    assert_eq!(
        error,
        SymbolTableError::ItemAlreadyExists {
            key: "Function:f".to_string()
        }
    );
    assert_eq!(table.get_function("f").unwrap().parameters.len(), 1);
}

#[test]
fn test_function_and_pattern_namespaces_are_separate() {
    let mut table = SymbolTable::new();
    table.declare_function(function("p", &[])).unwrap();
    table.declare_pattern(pattern("p")).unwrap();

    assert!(matches!(table.lookup(ItemKind::Function, "p"), Ok(Entry::Function(_))));
    assert!(matches!(table.lookup(ItemKind::Pattern, "p"), Ok(Entry::Pattern(_))));
}

#[test]
fn test_new_function_slots_are_unresolved() {
    let item = function("f", &["a", "b"]);

    assert_eq!(item.parameter_types(), vec![Type::Unresolved, Type::Unresolved]);
    assert_eq!(item.return_type, Type::Unresolved);
}

#[test]
fn test_lookup_missing_function() {
    let table = SymbolTable::new();

    assert!(matches!(
        table.lookup(ItemKind::Function, "missing"),
        Err(SymbolTableError::ItemNotFound { .. })
    ));
}

#[test]
fn test_declare_variable_without_scope() {
    let mut table = SymbolTable::new();

    assert_eq!(
        table.declare_variable("x", Type::Int),
        Err(SymbolTableError::NoOpenScope)
    );
}

#[test]
fn test_declare_variable_first_writer_wins() {
    let mut table = SymbolTable::new();
    table.push_body();
    table.declare_variable("x", Type::Int).unwrap();

    assert!(table.declare_variable("x", Type::String).is_err());
    assert_eq!(table.variable_type("x").unwrap(), Type::Int);
}

#[test]
fn test_body_scope_hides_enclosing_variables() {
    let mut table = SymbolTable::new();
    table.push_body();
    table.declare_variable("x", Type::Int).unwrap();
    table.push_body();

    assert!(!table.has_variable("x"));

    table.pop();
    assert!(table.has_variable("x"));
}

#[test]
fn test_branch_declarations_vanish_on_pop() {
    let mut table = SymbolTable::new();
    table.push_body();
    table.branch_copy();
    table.declare_variable("inner", Type::Bool).unwrap();
    assert!(table.has_variable("inner"));

    table.pop();

    assert!(!table.has_variable("inner"));
}

#[test]
fn test_branch_refinement_survives_pop() {
    let mut table = SymbolTable::new();
    table.push_body();
    table.declare_variable("x", Type::Int).unwrap();
    table.branch_copy();
    table.declare_or_update("x", Type::String).unwrap();

    table.pop();

    assert_eq!(table.variable_type("x").unwrap(), Type::String);
}

#[test]
fn test_branch_can_shadow_in_own_storage() {
    let mut table = SymbolTable::new();
    table.push_body();
    table.declare_variable("x", Type::Int).unwrap();
    table.branch_copy();

    // a fresh declaration goes to the branch, not to the shared record
    table.declare_variable("x", Type::Float).unwrap();
    assert_eq!(table.variable_type("x").unwrap(), Type::Float);

    table.pop();
    assert_eq!(table.variable_type("x").unwrap(), Type::Int);
}

#[test]
fn test_declare_or_update_declares_in_innermost() {
    let mut table = SymbolTable::new();
    table.push_body();
    let branch = table.branch_copy();
    table.declare_or_update("y", Type::Float).unwrap();

    let variable = table.get_variable("y").unwrap();
    assert_eq!(variable.borrow().scope_id, branch);
}

#[test]
fn test_popped_scope_keeps_variables() {
    let mut table = SymbolTable::new();
    table.push_body();
    table.declare_variable("a", Type::Int).unwrap();
    table.declare_variable("b", Type::list(Type::String)).unwrap();

    let scope = table.pop().unwrap();

    assert_eq!(
        scope.variables(),
        vec![
            ("a".to_string(), Type::Int),
            ("b".to_string(), Type::list(Type::String))
        ]
    );
}

#[test]
fn test_stored_scope_can_be_reopened() {
    let mut table = SymbolTable::new();
    table.push_body();
    table.declare_variable("a", Type::Int).unwrap();
    let stored = table.pop().unwrap();
    assert!(!table.has_variable("a"));

    table.push(stored);
    assert_eq!(table.variable_type("a").unwrap(), Type::Int);
    table.push_body();
    assert!(!table.has_variable("a"));
}
