use log::debug;

use crate::{
    ast::{
        expressions::{AssignOperator, Expr, ExprKind},
        statements::{Range, Stmt, StmtKind},
        types::Type,
    },
    errors::errors::ErrorImpl,
    Position,
};

use super::{
    expr::{check_expression, check_list},
    type_checker::TypeChecker,
};

/// Checks every statement of `body`, collecting the types of the `return`
/// statements reached through branches and loops into `returns`.
pub fn check_body(type_checker: &mut TypeChecker, body: &[Stmt], returns: &mut Vec<Type>) {
    for statement in body.iter() {
        check_statement(type_checker, statement, returns);
    }
}

fn check_branch(type_checker: &mut TypeChecker, body: &[Stmt], returns: &mut Vec<Type>) {
    type_checker.symbol_table.branch_copy();
    check_body(type_checker, body, returns);
    type_checker.symbol_table.pop();
}

fn check_conditions(type_checker: &mut TypeChecker, conditions: &[Expr]) {
    for condition in conditions.iter() {
        let ty = check_expression(type_checker, condition);
        if ty != Type::Bool && ty != Type::Unresolved {
            type_checker.report(ErrorImpl::ConditionIsNotBool, &condition.position);
        }
    }
}

pub fn check_statement(type_checker: &mut TypeChecker, statement: &Stmt, returns: &mut Vec<Type>) {
    let position = &statement.position;
    match &statement.kind {
        StmtKind::Expression(expression) | StmtKind::Put(expression) => {
            check_expression(type_checker, expression);
        }
        StmtKind::Assign {
            target,
            index,
            operator,
            value,
        } => {
            let value_type = check_expression(type_checker, value);
            match index {
                Some(index) => check_indexed_assign(
                    type_checker,
                    target,
                    index,
                    *operator,
                    value_type,
                    position,
                ),
                None => check_assign(type_checker, target, *operator, value_type, position),
            }
        }
        StmtKind::If {
            conditions,
            then_body,
            else_body,
        } => {
            check_conditions(type_checker, conditions);
            check_branch(type_checker, then_body, returns);
            check_branch(type_checker, else_body, returns);
        }
        StmtKind::Return(value) => {
            let ty = match value {
                Some(value) => check_expression(type_checker, value),
                None => Type::NoValue,
            };
            returns.push(ty);
        }
        StmtKind::Push { target, value } => {
            let target_type = check_expression(type_checker, target);
            let value_type = check_expression(type_checker, value);
            check_push(type_checker, target, target_type, value_type, position);
        }
        StmtKind::LoopDo { body } => check_branch(type_checker, body, returns),
        StmtKind::For {
            iterator,
            range,
            body,
        } => {
            type_checker.symbol_table.branch_copy();
            let iterator_type = check_range(type_checker, range, position);
            bind_iterator(type_checker, iterator, iterator_type);
            check_body(type_checker, body, returns);
            type_checker.symbol_table.pop();
        }
        StmtKind::Break { conditions } | StmtKind::Next { conditions } => {
            check_conditions(type_checker, conditions)
        }
    }
}

/// Plain assignment (re)binds the variable; compound assignment needs an
/// existing numeric one.
fn check_assign(
    type_checker: &mut TypeChecker,
    target: &str,
    operator: AssignOperator,
    value_type: Type,
    position: &Position,
) {
    if !operator.is_compound() {
        debug!("{} is {}", target, value_type);
        if type_checker
            .symbol_table
            .declare_or_update(target, value_type)
            .is_err()
        {
            debug!("no scope to bind {} in", target);
        }
        return;
    }
    let target_type = type_checker
        .symbol_table
        .variable_type(target)
        .unwrap_or(Type::Unresolved);
    if target_type != Type::Unresolved && !target_type.is_numeric() {
        type_checker.report(
            ErrorImpl::UnsupportedOperandType {
                operator: operator.to_string(),
            },
            position,
        );
    }
}

fn check_indexed_assign(
    type_checker: &mut TypeChecker,
    target: &str,
    index: &Expr,
    operator: AssignOperator,
    value_type: Type,
    position: &Position,
) {
    let target_type = type_checker
        .symbol_table
        .variable_type(target)
        .unwrap_or(Type::Unresolved);
    if target_type == Type::Unresolved {
        check_expression(type_checker, index);
        return;
    }
    if !target_type.is_indexable() {
        type_checker.report(ErrorImpl::IsNotIndexable, position);
        return;
    }
    let index_type = check_expression(type_checker, index);
    if index_type != Type::Int && index_type != Type::Unresolved {
        type_checker.report(ErrorImpl::AccessIndexIsNotInt, position);
        return;
    }

    let element = match &target_type {
        Type::List(element) => (**element).clone(),
        _ => Type::String,
    };
    let compatible = value_type == Type::Unresolved
        || element == Type::Unresolved
        || value_type.same_type(&element);
    if !compatible {
        type_checker.report(ErrorImpl::ListElementsTypesMisMatch, position);
        return;
    }
    let numeric = element.is_numeric() || element == Type::Unresolved;
    if operator.is_compound() && (target_type == Type::String || !numeric) {
        type_checker.report(
            ErrorImpl::UnsupportedOperandType {
                operator: operator.to_string(),
            },
            position,
        );
    }
}

/// Push onto a string needs a string, onto a list a value of its element type.
/// Pushing onto a variable whose element type is not known yet refines it.
fn check_push(
    type_checker: &mut TypeChecker,
    target: &Expr,
    target_type: Type,
    value_type: Type,
    position: &Position,
) {
    match target_type {
        Type::Unresolved => {}
        Type::String => {
            if value_type != Type::String && value_type != Type::Unresolved {
                type_checker.report(ErrorImpl::PushArgumentsTypesMisMatch, position);
            }
        }
        Type::List(element) => {
            if value_type == Type::Unresolved {
                return;
            }
            let refined = match *element {
                Type::Unresolved => Some(value_type),
                _ => element.unify(&value_type),
            };
            let Some(refined) = refined else {
                type_checker.report(ErrorImpl::PushArgumentsTypesMisMatch, position);
                return;
            };
            if refined != *element {
                if let ExprKind::Identifier(name) = &target.kind {
                    debug!("{} refined to {}", name, Type::list(refined.clone()));
                    if type_checker
                        .symbol_table
                        .declare_or_update(name, Type::list(refined))
                        .is_err()
                    {
                        debug!("no scope to refine {} in", name);
                    }
                }
            }
        }
        _ => type_checker.report(ErrorImpl::IsNotPushedable, position),
    }
}

/// The type a `for` iterator takes over `range`.
pub fn check_range(type_checker: &mut TypeChecker, range: &Range, position: &Position) -> Type {
    match range {
        Range::List(elements) => match check_list(type_checker, elements, position) {
            Type::List(element) => *element,
            _ => Type::Unresolved,
        },
        Range::Expression(expression) => match check_expression(type_checker, expression) {
            Type::List(element) => *element,
            Type::Unresolved => Type::Unresolved,
            _ => {
                type_checker.report(ErrorImpl::IsNotIterable, position);
                Type::Unresolved
            }
        },
        Range::DoubleDot(from, to) => {
            let from = check_expression(type_checker, from);
            let to = check_expression(type_checker, to);
            let bound = |ty: &Type| *ty == Type::Int || *ty == Type::Unresolved;
            if bound(&from) && bound(&to) {
                Type::Int
            } else {
                type_checker.report(ErrorImpl::RangeValuesMisMatch, position);
                Type::Unresolved
            }
        }
    }
}

/// Declares the iterator in the innermost scope, which is the loop's own.
pub fn bind_iterator(type_checker: &mut TypeChecker, iterator: &str, ty: Type) {
    if type_checker
        .symbol_table
        .declare_variable(iterator, ty.clone())
        .is_err()
    {
        // Already bound in this scope by an earlier replay.
        if let Ok(variable) = type_checker.symbol_table.get_variable(iterator) {
            variable.borrow_mut().ty = ty;
        }
    }
}
