use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A diagnostic: what went wrong and on which line.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.line()
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::RedefinitionOfFunction { .. } | ErrorImpl::RedefinitionOfPattern { .. } => {
                ErrorCategory::Redefinition
            }
            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::FunctionNotDeclared { .. }
            | ErrorImpl::PatternNotDeclared { .. }
            | ErrorImpl::IdenticalArgFunctionName { .. } => ErrorCategory::Resolution,
            ErrorImpl::ArgMisMatch { .. } => ErrorCategory::Arity,
            ErrorImpl::CircularDependency { .. } => ErrorCategory::CyclicDependency,
            _ => ErrorCategory::TypeMismatch,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::RedefinitionOfFunction { .. } => "RedefinitionOfFunction",
            ErrorImpl::RedefinitionOfPattern { .. } => "RedefinitionOfPattern",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::PatternNotDeclared { .. } => "PatternNotDeclared",
            ErrorImpl::IdenticalArgFunctionName { .. } => "IdenticalArgFunctionName",
            ErrorImpl::ArgMisMatch { .. } => "ArgMisMatch",
            ErrorImpl::CircularDependency { .. } => "CircularDependency",
            ErrorImpl::NonSameOperands { .. } => "NonSameOperands",
            ErrorImpl::UnsupportedOperandType { .. } => "UnsupportedOperandType",
            ErrorImpl::FunctionIncompatibleReturnTypes { .. } => "FunctionIncompatibleReturnTypes",
            ErrorImpl::PatternIncompatibleReturnTypes { .. } => "PatternIncompatibleReturnTypes",
            ErrorImpl::ListElementsTypesMisMatch => "ListElementsTypesMisMatch",
            ErrorImpl::ConditionIsNotBool => "ConditionIsNotBool",
            ErrorImpl::IsNotIndexable => "IsNotIndexable",
            ErrorImpl::AccessIndexIsNotInt => "AccessIndexIsNotInt",
            ErrorImpl::PushArgumentsTypesMisMatch => "PushArgumentsTypesMisMatch",
            ErrorImpl::IsNotPushedable => "IsNotPushedable",
            ErrorImpl::IsNotAppendable => "IsNotAppendable",
            ErrorImpl::LenArgumentTypeMisMatch => "LenArgumentTypeMisMatch",
            ErrorImpl::ChompArgumentTypeMisMatch => "ChompArgumentTypeMisMatch",
            ErrorImpl::IsNotIterable => "IsNotIterable",
            ErrorImpl::RangeValuesMisMatch => "RangeValuesMisMatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::RedefinitionOfFunction { function } => ErrorTip::Suggestion(format!(
                "Function `{}` is already defined, this one is analysed under a new name",
                function
            )),
            ErrorImpl::RedefinitionOfPattern { pattern } => ErrorTip::Suggestion(format!(
                "Pattern `{}` is already defined, this one is analysed under a new name",
                pattern
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::PatternNotDeclared { pattern } => {
                ErrorTip::Suggestion(format!("Pattern `{}` not declared", pattern))
            }
            ErrorImpl::IdenticalArgFunctionName { argument } => ErrorTip::Suggestion(format!(
                "Rename argument `{}`, it shadows its own function",
                argument
            )),
            ErrorImpl::ArgMisMatch {
                function,
                min,
                max,
                received,
            } => ErrorTip::Suggestion(if min == max {
                format!("`{}` expects {} arguments, received {}", function, max, received)
            } else {
                format!(
                    "`{}` expects {} to {} arguments, received {}",
                    function, min, max, received
                )
            }),
            ErrorImpl::CircularDependency { cycle } => ErrorTip::Suggestion(format!(
                "Recursion is not allowed: {} -> {}",
                cycle.join(" -> "),
                cycle.first().map(String::as_str).unwrap_or_default()
            )),
            ErrorImpl::NonSameOperands { operator } => ErrorTip::Suggestion(format!(
                "Both operands of `{}` must have the same type",
                operator
            )),
            ErrorImpl::UnsupportedOperandType { operator } => ErrorTip::Suggestion(format!(
                "Operator `{}` does not support this operand type",
                operator
            )),
            ErrorImpl::FunctionIncompatibleReturnTypes { function } => ErrorTip::Suggestion(
                format!("Every return of `{}` must have the same type", function),
            ),
            ErrorImpl::PatternIncompatibleReturnTypes { pattern } => ErrorTip::Suggestion(
                format!("Every case of `{}` must return the same type", pattern),
            ),
            ErrorImpl::ConditionIsNotBool => {
                ErrorTip::Suggestion(String::from("Conditions must be of type bool"))
            }
            ErrorImpl::AccessIndexIsNotInt => {
                ErrorTip::Suggestion(String::from("Indices must be of type int"))
            }
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line:{}-> {}", self.position.line(), self.internal_error)
    }
}

/// The coarse families a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Redefinition,
    Resolution,
    Arity,
    CyclicDependency,
    TypeMismatch,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("redefinition of function {function:?}")]
    RedefinitionOfFunction { function: String },
    #[error("redefinition of pattern {pattern:?}")]
    RedefinitionOfPattern { pattern: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("function {function:?} not declared")]
    FunctionNotDeclared { function: String },
    #[error("pattern {pattern:?} not declared")]
    PatternNotDeclared { pattern: String },
    #[error("argument {argument:?} has the same name as its function")]
    IdenticalArgFunctionName { argument: String },
    #[error("wrong number of arguments for {function:?}: expected {min} to {max}, received {received}")]
    ArgMisMatch {
        function: String,
        min: usize,
        max: usize,
        received: usize,
    },
    #[error("circular dependency between {cycle:?}")]
    CircularDependency { cycle: Vec<String> },
    #[error("operands of {operator} do not have the same type")]
    NonSameOperands { operator: String },
    #[error("unsupported operand type for {operator}")]
    UnsupportedOperandType { operator: String },
    #[error("return types of function {function:?} are incompatible")]
    FunctionIncompatibleReturnTypes { function: String },
    #[error("return types of pattern {pattern:?} are incompatible")]
    PatternIncompatibleReturnTypes { pattern: String },
    #[error("list element types do not match")]
    ListElementsTypesMisMatch,
    #[error("condition is not of type bool")]
    ConditionIsNotBool,
    #[error("expression is not indexable")]
    IsNotIndexable,
    #[error("index is not of type int")]
    AccessIndexIsNotInt,
    #[error("pushed value does not match the pushed-to type")]
    PushArgumentsTypesMisMatch,
    #[error("expression does not support push")]
    IsNotPushedable,
    #[error("expression does not support append")]
    IsNotAppendable,
    #[error("len expects a string or a list")]
    LenArgumentTypeMisMatch,
    #[error("chomp expects a string")]
    ChompArgumentTypeMisMatch,
    #[error("expression is not iterable")]
    IsNotIterable,
    #[error("range bounds must be of type int")]
    RangeValuesMisMatch,
}
