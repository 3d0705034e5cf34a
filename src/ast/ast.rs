use crate::Position;

use super::{expressions::Expr, statements::Stmt};

/// Separator between a declared name and the counter appended when the name is
/// registered a second time.
pub const RENAME_SEPARATOR: char = '#';

/// Identifier
/// A declared name together with where it was declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub position: Position,
}

impl Identifier {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Identifier {
            name: name.into(),
            position,
        }
    }

    /// The name as written in the source, without any redefinition suffix.
    pub fn base_name(&self) -> &str {
        self.name
            .split(RENAME_SEPARATOR)
            .next()
            .unwrap_or(&self.name)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// A parameter of a function or lambda, optionally with a default value.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub name: Identifier,
    pub default: Option<Expr>,
}

impl VarDeclaration {
    pub fn new(name: Identifier) -> Self {
        VarDeclaration {
            name,
            default: None,
        }
    }

    pub fn with_default(name: Identifier, default: Expr) -> Self {
        VarDeclaration {
            name,
            default: Some(default),
        }
    }
}

/// Number of trailing parameters that carry a default value.
pub fn trailing_defaults(args: &[VarDeclaration]) -> usize {
    args.iter()
        .rev()
        .take_while(|arg| arg.default.is_some())
        .count()
}

/// Function Declaration
/// `def name(args) { body }` - parameter and return types are inferred per call.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub args: Vec<VarDeclaration>,
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl FunctionDeclaration {
    pub fn new(name: Identifier, args: Vec<VarDeclaration>, body: Vec<Stmt>) -> Self {
        let position = name.position.clone();
        FunctionDeclaration {
            name,
            args,
            body,
            position,
        }
    }

    pub fn default_args_count(&self) -> usize {
        trailing_defaults(&self.args)
    }

    /// Smallest number of arguments a call must supply.
    pub fn min_args(&self) -> usize {
        self.args.len() - self.default_args_count()
    }

    pub fn max_args(&self) -> usize {
        self.args.len()
    }
}

/// Pattern Declaration
/// A named, guarded multi-branch match. Case `i` yields `returns[i]` when
/// `conditions[i]` holds for the value bound to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDeclaration {
    pub name: Identifier,
    pub target: Identifier,
    pub conditions: Vec<Expr>,
    pub returns: Vec<Expr>,
    pub position: Position,
}

impl PatternDeclaration {
    pub fn new(name: Identifier, target: Identifier, cases: Vec<(Expr, Expr)>) -> Self {
        let position = name.position.clone();
        let (conditions, returns) = cases.into_iter().unzip();
        PatternDeclaration {
            name,
            target,
            conditions,
            returns,
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainDeclaration {
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl MainDeclaration {
    pub fn new(body: Vec<Stmt>, position: Position) -> Self {
        MainDeclaration { body, position }
    }
}

/// A whole compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub functions: Vec<FunctionDeclaration>,
    pub patterns: Vec<PatternDeclaration>,
    pub main: MainDeclaration,
}

impl Program {
    pub fn new(
        functions: Vec<FunctionDeclaration>,
        patterns: Vec<PatternDeclaration>,
        main: MainDeclaration,
    ) -> Self {
        Program {
            functions,
            patterns,
            main,
        }
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.functions.iter().find(|function| function.name.name == name)
    }

    pub fn pattern(&self, name: &str) -> Option<&PatternDeclaration> {
        self.patterns.iter().find(|pattern| pattern.name.name == name)
    }
}
