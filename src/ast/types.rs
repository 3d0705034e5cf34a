//! Type system definitions.
//!
//! Types are never written in source programs. The type checker infers one of
//! these for every expression:
//!
//! - Primitive types (int, float, bool, string)
//! - Lists, typed by their element
//! - Function pointers, typed by the function they name
//! - `Unresolved`, a placeholder for an element type not known yet and for the
//!   result of an expression that failed to type check
//! - `NoValue`, the type of statements and of functions that return nothing
//!
//! Identity is structural: two types are the same when they have the same shape.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Float,
    Bool,
    String,
    List(Box<Type>),
    FunctionPointer(String),
    Unresolved,
    NoValue,
}

impl Type {
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn function_pointer(name: impl Into<String>) -> Self {
        Type::FunctionPointer(name.into())
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    pub fn is_indexable(&self) -> bool {
        matches!(self, Type::String | Type::List(_))
    }

    /// Element type of a list, `None` for every other type.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::List(element) => Some(element),
            _ => None,
        }
    }

    /// Whether the type still contains an unresolved placeholder.
    pub fn is_resolved(&self) -> bool {
        match self {
            Type::Unresolved => false,
            Type::List(element) => element.is_resolved(),
            _ => true,
        }
    }

    /// Structural equality. Inside a list an `Unresolved` element matches any
    /// element type, so `[]` can flow where a `[int]` is expected.
    pub fn same_type(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::List(left), Type::List(right)) => {
                matches!(**left, Type::Unresolved)
                    || matches!(**right, Type::Unresolved)
                    || left.same_type(right)
            }
            _ => self == other,
        }
    }

    /// The more specific of two types that are the same, or `None` when they
    /// are not.
    pub fn unify(&self, other: &Type) -> Option<Type> {
        if !self.same_type(other) {
            return None;
        }
        match (self, other) {
            (Type::List(left), Type::List(right)) => match (&**left, &**right) {
                (Type::Unresolved, _) => Some(other.clone()),
                (_, Type::Unresolved) => Some(self.clone()),
                _ => left.unify(right).map(Type::list),
            },
            _ => Some(self.clone()),
        }
    }
}

/// Unifies a sequence of types into one.
///
/// Returns `Ok(None)` for an empty sequence and `Err(index)` with the index of
/// the first type that does not match the ones before it.
pub fn unify_all<'a, I>(types: I) -> Result<Option<Type>, usize>
where
    I: IntoIterator<Item = &'a Type>,
{
    let mut unified: Option<Type> = None;
    for (index, ty) in types.into_iter().enumerate() {
        unified = match unified {
            None => Some(ty.clone()),
            Some(current) => Some(current.unify(ty).ok_or(index)?),
        };
    }
    Ok(unified)
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "bool"),
            Type::String => write!(f, "string"),
            Type::List(element) => write!(f, "list({})", element),
            Type::FunctionPointer(name) => write!(f, "fptr({})", name),
            Type::Unresolved => write!(f, "unresolved"),
            Type::NoValue => write!(f, "void"),
        }
    }
}
