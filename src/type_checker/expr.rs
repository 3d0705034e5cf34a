use crate::{
    ast::{
        expressions::{BinaryOperator, Expr, ExprKind, UnaryOperator},
        types::{unify_all, Type},
    },
    errors::errors::ErrorImpl,
    Position,
};

use super::type_checker::TypeChecker;

/// Infers the type of `expression`, reporting every mismatch found on the
/// way. A failed expression has type `Unresolved`, and rules applied to an
/// `Unresolved` operand stay silent so one defect is reported once.
pub fn check_expression(type_checker: &mut TypeChecker, expression: &Expr) -> Type {
    let position = &expression.position;
    match &expression.kind {
        ExprKind::Identifier(name) => type_checker
            .symbol_table
            .variable_type(name)
            .unwrap_or(Type::Unresolved),
        ExprKind::Int(_) => Type::Int,
        ExprKind::Float(_) => Type::Float,
        ExprKind::Bool(_) => Type::Bool,
        ExprKind::String(_) => Type::String,
        ExprKind::List(elements) => check_list(type_checker, elements, position),
        ExprKind::FunctionPointer(name) => Type::function_pointer(name.clone()),
        ExprKind::Binary { operator, lhs, rhs } => {
            let lhs = check_expression(type_checker, lhs);
            let rhs = check_expression(type_checker, rhs);
            check_binary(type_checker, *operator, lhs, rhs, position)
        }
        ExprKind::Unary { operator, operand } => {
            let operand = check_expression(type_checker, operand);
            check_unary(type_checker, *operator, operand, position)
        }
        ExprKind::Call { callee, args } => check_call(type_checker, callee, args),
        ExprKind::Index { target, indices } => {
            let target = check_expression(type_checker, target);
            check_index(type_checker, target, indices, position)
        }
        // Parameter types of a lambda are only known where it is invoked.
        ExprKind::Lambda { .. } => Type::Unresolved,
        ExprKind::Append { appendee, appended } => {
            let appendee = check_expression(type_checker, appendee);
            for value in appended.iter() {
                check_expression(type_checker, value);
            }
            match appendee {
                Type::List(_) | Type::String | Type::Unresolved => appendee,
                _ => {
                    type_checker.report(ErrorImpl::IsNotAppendable, position);
                    Type::Unresolved
                }
            }
        }
        ExprKind::Len(operand) => match check_expression(type_checker, operand) {
            Type::List(_) | Type::String => Type::Int,
            Type::Unresolved => Type::Unresolved,
            _ => {
                type_checker.report(ErrorImpl::LenArgumentTypeMisMatch, position);
                Type::Unresolved
            }
        },
        ExprKind::Chomp(operand) => match check_expression(type_checker, operand) {
            Type::String => Type::String,
            Type::Unresolved => Type::Unresolved,
            _ => {
                type_checker.report(ErrorImpl::ChompArgumentTypeMisMatch, position);
                Type::Unresolved
            }
        },
        ExprKind::Chop(operand) => {
            check_expression(type_checker, operand);
            Type::String
        }
        ExprKind::Match { pattern, argument } => {
            let value_type = check_expression(type_checker, argument);
            type_checker.infer_match(pattern, value_type)
        }
    }
}

/// Types a list literal: the first element fixes the element type and every
/// other element must match it.
pub fn check_list(type_checker: &mut TypeChecker, elements: &[Expr], position: &Position) -> Type {
    let types: Vec<Type> = elements
        .iter()
        .map(|element| check_expression(type_checker, element))
        .collect();
    match unify_all(types.iter().filter(|ty| **ty != Type::Unresolved)) {
        Ok(element) => Type::list(element.unwrap_or(Type::Unresolved)),
        Err(_) => {
            type_checker.report(ErrorImpl::ListElementsTypesMisMatch, position);
            Type::Unresolved
        }
    }
}

fn check_binary(
    type_checker: &mut TypeChecker,
    operator: BinaryOperator,
    lhs: Type,
    rhs: Type,
    position: &Position,
) -> Type {
    if lhs == Type::Unresolved || rhs == Type::Unresolved {
        return Type::Unresolved;
    }
    if !lhs.same_type(&rhs) {
        type_checker.report(
            ErrorImpl::NonSameOperands {
                operator: operator.to_string(),
            },
            position,
        );
        return Type::Unresolved;
    }
    if !lhs.is_numeric() {
        type_checker.report(
            ErrorImpl::UnsupportedOperandType {
                operator: operator.to_string(),
            },
            position,
        );
        return Type::Unresolved;
    }
    if operator.is_arithmetic() {
        lhs
    } else {
        Type::Bool
    }
}

fn check_unary(
    type_checker: &mut TypeChecker,
    operator: UnaryOperator,
    operand: Type,
    position: &Position,
) -> Type {
    let supported = match operator {
        UnaryOperator::Not => operand == Type::Bool,
        UnaryOperator::Minus | UnaryOperator::Increment | UnaryOperator::Decrement => {
            operand.is_numeric()
        }
    };
    if supported || operand == Type::Unresolved {
        return operand;
    }
    type_checker.report(
        ErrorImpl::UnsupportedOperandType {
            operator: operator.to_string(),
        },
        position,
    );
    Type::Unresolved
}

/// Applies `indices` one after the other: a string indexes to a string, a list
/// to its element type.
pub fn check_index(
    type_checker: &mut TypeChecker,
    target: Type,
    indices: &[Expr],
    position: &Position,
) -> Type {
    let mut current = target;
    for index in indices.iter() {
        let index_type = check_expression(type_checker, index);
        current = match current {
            Type::Unresolved => Type::Unresolved,
            Type::String => Type::String,
            Type::List(element) => *element,
            _ => {
                type_checker.report(ErrorImpl::IsNotIndexable, position);
                Type::Unresolved
            }
        };
        if index_type != Type::Int && index_type != Type::Unresolved {
            type_checker.report(ErrorImpl::AccessIndexIsNotInt, &index.position);
            return Type::Unresolved;
        }
    }
    current
}

/// Types a call: a declared function, a variable holding a function pointer,
/// an immediately invoked lambda or any expression yielding a function pointer.
fn check_call(type_checker: &mut TypeChecker, callee: &Expr, args: &[Expr]) -> Type {
    let arg_types: Vec<Type> = args
        .iter()
        .map(|arg| check_expression(type_checker, arg))
        .collect();

    match &callee.kind {
        ExprKind::Identifier(name) if type_checker.symbol_table.has_function(name) => {
            type_checker.infer_call(name, arg_types)
        }
        ExprKind::Lambda { args, body } => {
            type_checker.infer_lambda(args, body, arg_types, &callee.position)
        }
        _ => match check_expression(type_checker, callee) {
            Type::FunctionPointer(target) => type_checker.infer_call(&target, arg_types),
            _ => Type::Unresolved,
        },
    }
}
