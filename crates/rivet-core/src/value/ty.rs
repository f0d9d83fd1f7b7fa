use crate::decl::ClassName;

/// The value type of a basic attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    I32,
    I64,
    F64,
    String,
    Bytes,
}

impl Type {
    /// Recognizes the classes that are persisted as plain values.
    pub fn from_class(class: &ClassName) -> Option<Type> {
        Some(match class.as_str() {
            "bool" => Type::Bool,
            "i32" => Type::I32,
            "i64" => Type::I64,
            "f64" => Type::F64,
            "String" | "str" => Type::String,
            "Vec<u8>" => Type::Bytes,
            _ => return None,
        })
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Type::Bool => "bool",
            Type::I32 => "i32",
            Type::I64 => "i64",
            Type::F64 => "f64",
            Type::String => "String",
            Type::Bytes => "Vec<u8>",
        }
    }
}
