use std::fmt;

macro_rules! impl_name {
    ($t:ident) => {
        impl<'a> $t<'a> {
            pub fn as_str(&self) -> &'a str {
                self.0
            }
        }

        impl<'a> From<&'a str> for $t<'a> {
            fn from(name: &'a str) -> Self {
                $t(name)
            }
        }

        impl fmt::Display for $t<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.0)
            }
        }
    };
}

impl_name!(TypeName);
impl_name!(OpName);
impl_name!(VariableName);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeName<'a>(pub &'a str);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpName<'a>(pub &'a str);

/// A variable name as declared, without its leading `$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableName<'a>(pub &'a str);
