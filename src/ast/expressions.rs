use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, str::FromStr};

use crate::Position;

use super::{ast::VarDeclaration, statements::Stmt};

lazy_static! {
    pub static ref BINARY_LOOKUP: HashMap<&'static str, BinaryOperator> = {
        let mut map = HashMap::new();
        map.insert("+", BinaryOperator::Plus);
        map.insert("-", BinaryOperator::Minus);
        map.insert("*", BinaryOperator::Mult);
        map.insert("/", BinaryOperator::Divide);
        map.insert("%", BinaryOperator::Modulo);
        map.insert("==", BinaryOperator::Equals);
        map.insert("!=", BinaryOperator::NotEquals);
        map.insert("<", BinaryOperator::Less);
        map.insert(">", BinaryOperator::Greater);
        map.insert("<=", BinaryOperator::LessEquals);
        map.insert(">=", BinaryOperator::GreaterEquals);
        map
    };
    pub static ref UNARY_LOOKUP: HashMap<&'static str, UnaryOperator> = {
        let mut map = HashMap::new();
        map.insert("!", UnaryOperator::Not);
        map.insert("-", UnaryOperator::Minus);
        map.insert("++", UnaryOperator::Increment);
        map.insert("--", UnaryOperator::Decrement);
        map
    };
    pub static ref ASSIGN_LOOKUP: HashMap<&'static str, AssignOperator> = {
        let mut map = HashMap::new();
        map.insert("=", AssignOperator::Assign);
        map.insert("+=", AssignOperator::PlusAssign);
        map.insert("-=", AssignOperator::MinusAssign);
        map.insert("*=", AssignOperator::MultAssign);
        map.insert("/=", AssignOperator::DivideAssign);
        map.insert("%=", AssignOperator::ModuloAssign);
        map
    };
}

/// Looks the operator up in `lookup`, returning its spelling for `Display`.
fn spelling<T: PartialEq>(lookup: &HashMap<&'static str, T>, operator: &T) -> &'static str {
    lookup
        .iter()
        .find(|(_, candidate)| *candidate == operator)
        .map(|(symbol, _)| *symbol)
        .unwrap_or("?")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Mult,
    Divide,
    Modulo,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
}

impl BinaryOperator {
    /// Arithmetic operators yield their operand type, the rest yield `Bool`.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Plus
                | BinaryOperator::Minus
                | BinaryOperator::Mult
                | BinaryOperator::Divide
                | BinaryOperator::Modulo
        )
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", spelling(&BINARY_LOOKUP, self))
    }
}

impl FromStr for BinaryOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BINARY_LOOKUP
            .get(s)
            .copied()
            .ok_or_else(|| format!("unknown binary operator `{}`", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Minus,
    Increment,
    Decrement,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", spelling(&UNARY_LOOKUP, self))
    }
}

impl FromStr for UnaryOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UNARY_LOOKUP
            .get(s)
            .copied()
            .ok_or_else(|| format!("unknown unary operator `{}`", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOperator {
    Assign,
    PlusAssign,
    MinusAssign,
    MultAssign,
    DivideAssign,
    ModuloAssign,
}

impl AssignOperator {
    pub fn is_compound(&self) -> bool {
        *self != AssignOperator::Assign
    }
}

impl Display for AssignOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", spelling(&ASSIGN_LOOKUP, self))
    }
}

impl FromStr for AssignOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ASSIGN_LOOKUP
            .get(s)
            .copied()
            .ok_or_else(|| format!("unknown assignment operator `{}`", s))
    }
}

/// Expression Kinds
///
/// Every expression form of the language. Passes match on this exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Identifier(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    List(Vec<Expr>),
    /// `&name` - a reference to a declared function.
    FunctionPointer(String),
    Binary {
        operator: BinaryOperator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        target: Box<Expr>,
        indices: Vec<Expr>,
    },
    Lambda {
        args: Vec<VarDeclaration>,
        body: Vec<Stmt>,
    },
    Append {
        appendee: Box<Expr>,
        appended: Vec<Expr>,
    },
    Len(Box<Expr>),
    Chop(Box<Expr>),
    Chomp(Box<Expr>),
    /// `match argument with pattern`
    Match {
        pattern: String,
        argument: Box<Expr>,
    },
}

/// Expression
/// An expression node and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub position: Position,
}

impl Expr {
    pub fn new(kind: ExprKind, position: Position) -> Self {
        Expr { kind, position }
    }

    pub fn identifier(name: impl Into<String>, position: Position) -> Self {
        Expr::new(ExprKind::Identifier(name.into()), position)
    }

    pub fn int(value: i64, position: Position) -> Self {
        Expr::new(ExprKind::Int(value), position)
    }

    pub fn float(value: f64, position: Position) -> Self {
        Expr::new(ExprKind::Float(value), position)
    }

    pub fn bool(value: bool, position: Position) -> Self {
        Expr::new(ExprKind::Bool(value), position)
    }

    pub fn string(value: impl Into<String>, position: Position) -> Self {
        Expr::new(ExprKind::String(value.into()), position)
    }

    pub fn list(elements: Vec<Expr>, position: Position) -> Self {
        Expr::new(ExprKind::List(elements), position)
    }

    pub fn function_pointer(name: impl Into<String>, position: Position) -> Self {
        Expr::new(ExprKind::FunctionPointer(name.into()), position)
    }

    pub fn binary(lhs: Expr, operator: BinaryOperator, rhs: Expr) -> Self {
        let position = lhs.position.clone();
        Expr::new(
            ExprKind::Binary {
                operator,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            position,
        )
    }

    pub fn unary(operator: UnaryOperator, operand: Expr) -> Self {
        let position = operand.position.clone();
        Expr::new(
            ExprKind::Unary {
                operator,
                operand: Box::new(operand),
            },
            position,
        )
    }

    /// A call to the function statically named `name`.
    pub fn call(name: impl Into<String>, args: Vec<Expr>, position: Position) -> Self {
        let callee = Expr::identifier(name, position.clone());
        Expr::call_expr(callee, args)
    }

    pub fn call_expr(callee: Expr, args: Vec<Expr>) -> Self {
        let position = callee.position.clone();
        Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            position,
        )
    }

    pub fn index(target: Expr, indices: Vec<Expr>) -> Self {
        let position = target.position.clone();
        Expr::new(
            ExprKind::Index {
                target: Box::new(target),
                indices,
            },
            position,
        )
    }

    pub fn lambda(args: Vec<VarDeclaration>, body: Vec<Stmt>, position: Position) -> Self {
        Expr::new(ExprKind::Lambda { args, body }, position)
    }

    pub fn append(appendee: Expr, appended: Vec<Expr>) -> Self {
        let position = appendee.position.clone();
        Expr::new(
            ExprKind::Append {
                appendee: Box::new(appendee),
                appended,
            },
            position,
        )
    }

    pub fn len(operand: Expr) -> Self {
        let position = operand.position.clone();
        Expr::new(ExprKind::Len(Box::new(operand)), position)
    }

    pub fn chop(operand: Expr) -> Self {
        let position = operand.position.clone();
        Expr::new(ExprKind::Chop(Box::new(operand)), position)
    }

    pub fn chomp(operand: Expr) -> Self {
        let position = operand.position.clone();
        Expr::new(ExprKind::Chomp(Box::new(operand)), position)
    }

    pub fn match_pattern(pattern: impl Into<String>, argument: Expr) -> Self {
        let position = argument.position.clone();
        Expr::new(
            ExprKind::Match {
                pattern: pattern.into(),
                argument: Box::new(argument),
            },
            position,
        )
    }

    pub fn line(&self) -> u32 {
        self.position.line()
    }
}
