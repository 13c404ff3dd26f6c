use crate::{OpName, Pos, Type, Value, VariableName};

#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    pub operations: Vec<Operation<'a>>,
    // fragment definitions are not parsed yet; always empty.
    pub fragments: Vec<Fragment>,
}

impl<'a> Document<'a> {
    pub fn new() -> Document<'a> {
        Document {
            operations: Vec::new(),
            fragments: Vec::new(),
        }
    }
}

impl Default for Document<'_> {
    fn default() -> Self {
        Document::new()
    }
}

/// Fragment definitions have no grammar, so no value of this type exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {}

/// Stands in for directives and selection sets, which are never parsed.
/// Uninhabited, so the fields typed with it are always `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unparsed {}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation<'a> {
    pub pos: Pos,
    pub op_type: OpType,
    pub name: Option<OpName<'a>>,
    pub variables: Vec<Variable<'a>>,
    pub directives: Option<Unparsed>,
    pub selection_set: Option<Unparsed>,
}

impl<'a> Operation<'a> {
    pub fn new(
        pos: Pos,
        op_type: OpType,
        name: Option<OpName<'a>>,
        variables: Vec<Variable<'a>>,
    ) -> Operation<'a> {
        Operation {
            pos,
            op_type,
            name,
            variables,
            directives: None,
            selection_set: None,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&Variable<'a>> {
        self.variables.iter().find(|v| v.name.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    Query,
    Mutation,
    // declared, but nothing produces it yet
    Subscription,
}

/// `$name: Type = default`
#[derive(Debug, Clone, PartialEq)]
pub struct Variable<'a> {
    pub pos: Pos,
    pub name: VariableName<'a>,
    pub var_type: Type<'a>,
    pub default_value: Option<Value>,
}
