use crate::Position;

use super::expressions::{AssignOperator, Expr};

/// What a `for` loop iterates over.
#[derive(Debug, Clone, PartialEq)]
pub enum Range {
    /// `for x in [a, b, c]`
    List(Vec<Expr>),
    /// `for x in xs` - any expression expected to be a list.
    Expression(Expr),
    /// `for x in a .. b`
    DoubleDot(Box<Expr>, Box<Expr>),
}

/// Statement Kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expression(Expr),
    /// `target = value`, `target[index] += value`, ...
    Assign {
        target: String,
        index: Option<Expr>,
        operator: AssignOperator,
        value: Expr,
    },
    If {
        conditions: Vec<Expr>,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    Put(Expr),
    Push {
        target: Expr,
        value: Expr,
    },
    LoopDo {
        body: Vec<Stmt>,
    },
    For {
        iterator: String,
        range: Range,
        body: Vec<Stmt>,
    },
    Break {
        conditions: Vec<Expr>,
    },
    Next {
        conditions: Vec<Expr>,
    },
}

/// Statement
/// A statement node and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub position: Position,
}

impl Stmt {
    pub fn new(kind: StmtKind, position: Position) -> Self {
        Stmt { kind, position }
    }

    pub fn expression(expression: Expr) -> Self {
        let position = expression.position.clone();
        Stmt::new(StmtKind::Expression(expression), position)
    }

    pub fn assign(target: impl Into<String>, value: Expr, position: Position) -> Self {
        Stmt::assign_with(target, None, AssignOperator::Assign, value, position)
    }

    pub fn assign_with(
        target: impl Into<String>,
        index: Option<Expr>,
        operator: AssignOperator,
        value: Expr,
        position: Position,
    ) -> Self {
        Stmt::new(
            StmtKind::Assign {
                target: target.into(),
                index,
                operator,
                value,
            },
            position,
        )
    }

    pub fn if_else(
        conditions: Vec<Expr>,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
        position: Position,
    ) -> Self {
        Stmt::new(
            StmtKind::If {
                conditions,
                then_body,
                else_body,
            },
            position,
        )
    }

    pub fn ret(value: Option<Expr>, position: Position) -> Self {
        Stmt::new(StmtKind::Return(value), position)
    }

    pub fn put(value: Expr) -> Self {
        let position = value.position.clone();
        Stmt::new(StmtKind::Put(value), position)
    }

    pub fn push(target: Expr, value: Expr) -> Self {
        let position = target.position.clone();
        Stmt::new(StmtKind::Push { target, value }, position)
    }

    pub fn loop_do(body: Vec<Stmt>, position: Position) -> Self {
        Stmt::new(StmtKind::LoopDo { body }, position)
    }

    pub fn for_in(
        iterator: impl Into<String>,
        range: Range,
        body: Vec<Stmt>,
        position: Position,
    ) -> Self {
        Stmt::new(
            StmtKind::For {
                iterator: iterator.into(),
                range,
                body,
            },
            position,
        )
    }

    pub fn break_if(conditions: Vec<Expr>, position: Position) -> Self {
        Stmt::new(StmtKind::Break { conditions }, position)
    }

    pub fn next_if(conditions: Vec<Expr>, position: Position) -> Self {
        Stmt::new(StmtKind::Next { conditions }, position)
    }

    pub fn line(&self) -> u32 {
        self.position.line()
    }
}
