mod names;
pub use names::{OpName, TypeName, VariableName};

mod types;
pub use types::{NonNullType, Type};

mod values;
pub use values::{Map, Value};

mod query;
pub use query::{Document, Fragment, OpType, Operation, Unparsed, Variable};
