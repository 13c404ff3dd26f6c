use std::fmt;

use crate::TypeName;

/// A type reference such as `Int`, `[Int]` or `[Int!]!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type<'a> {
    Named(TypeName<'a>),
    List(Box<Type<'a>>),
    NonNull(NonNullType<'a>),
}

/// The types a `!` can wrap. There is no non-null of a non-null.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NonNullType<'a> {
    Named(TypeName<'a>),
    List(Box<Type<'a>>),
}

impl<'a> Type<'a> {
    pub fn named(name: &'a str) -> Type<'a> {
        Type::Named(TypeName(name))
    }

    pub fn list(of: Type<'a>) -> Type<'a> {
        Type::List(Box::new(of))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Type::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Type::List(_) | Type::NonNull(NonNullType::List(_))
        )
    }

    /// The named type at the bottom of all list and non-null wrappers.
    pub fn base_name(&self) -> TypeName<'a> {
        match self {
            Type::Named(name) | Type::NonNull(NonNullType::Named(name)) => *name,
            Type::List(of) | Type::NonNull(NonNullType::List(of)) => of.base_name(),
        }
    }
}

impl fmt::Display for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(name) => write!(f, "{name}"),
            Type::List(of) => write!(f, "[{of}]"),
            Type::NonNull(NonNullType::Named(name)) => write!(f, "{name}!"),
            Type::NonNull(NonNullType::List(of)) => write!(f, "[{of}]!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_graphql_notation() {
        let ty = Type::NonNull(NonNullType::List(Box::new(Type::NonNull(
            NonNullType::Named(TypeName("Int")),
        ))));
        assert_eq!(ty.to_string(), "[Int!]!");
        assert_eq!(Type::list(Type::list(Type::named("ID"))).to_string(), "[[ID]]");
    }

    #[test]
    fn base_name_sees_through_wrappers() {
        let ty = Type::NonNull(NonNullType::List(Box::new(Type::named("uuid"))));
        assert_eq!(ty.base_name(), TypeName("uuid"));
        assert!(ty.is_list());
        assert!(ty.is_non_null());
        assert!(!Type::named("uuid").is_list());
    }
}
