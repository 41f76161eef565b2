//! PHP-style rendering of types: `int`, `string|null`, `\App\User`.

use std::fmt;

use crate::types::{ClassRef, Type};

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Null => f.write_str("null"),
            Type::Bool => f.write_str("bool"),
            Type::Int => f.write_str("int"),
            Type::Float => f.write_str("float"),
            Type::String => f.write_str("string"),
            Type::Array => f.write_str("array"),
            Type::Object(class) => write!(f, "{class}"),
            Type::Mixed => f.write_str("mixed"),
            Type::Union(members) => {
                // Canonical order puts null first; PHP code conventionally
                // writes it last.
                let mut first = true;
                for member in members
                    .iter()
                    .filter(|m| **m != Type::Null)
                    .chain(members.iter().filter(|m| **m == Type::Null))
                {
                    if !first {
                        f.write_str("|")?;
                    }
                    first = false;
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}
