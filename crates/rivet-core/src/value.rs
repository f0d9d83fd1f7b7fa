//! Runtime values of managed instances.

mod collection;
pub use collection::{Elements, ManagedCollection};

mod instance;
pub use instance::Instance;

mod reference;
pub use reference::{InstanceRef, Reference};

mod ty;
pub use ty::Type;

use crate::decl::ClassName;

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point number
    F64(f64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),

    /// Binary value
    Bytes(Vec<u8>),

    /// An instance of an embeddable type, owned by its parent
    Embedded(Instance),

    /// A reference to an entity instance
    Reference(Reference),

    /// A managed collection installed by a plural attribute
    Collection(ManagedCollection),

    /// A list of values, used for composite keys
    List(Vec<Value>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I64(v) => Some(v),
            Self::I32(v) => Some(v.into()),
            _ => None,
        }
    }

    pub fn as_embedded(&self) -> Option<&Instance> {
        match self {
            Self::Embedded(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_embedded_mut(&mut self) -> Option<&mut Instance> {
        match self {
            Self::Embedded(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&ManagedCollection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut ManagedCollection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if the value can be stored in an attribute of type
    /// `ty`. Null is accepted by every type.
    pub fn is_a(&self, ty: &Type) -> bool {
        matches!(
            (self, ty),
            (Self::Null, _)
                | (Self::Bool(_), Type::Bool)
                | (Self::I32(_), Type::I32)
                | (Self::I64(_), Type::I64)
                | (Self::F64(_), Type::F64)
                | (Self::String(_), Type::String)
                | (Self::Bytes(_), Type::Bytes)
        )
    }

    /// Short description of the value's variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::F64(_) => "F64",
            Self::Null => "Null",
            Self::String(_) => "String",
            Self::Bytes(_) => "Bytes",
            Self::Embedded(_) => "Embedded",
            Self::Reference(_) => "Reference",
            Self::Collection(_) => "Collection",
            Self::List(_) => "List",
        }
    }

    /// Creates a loaded reference to `instance`.
    pub fn reference(instance: &InstanceRef) -> Self {
        Self::Reference(Reference::Loaded(instance.clone()))
    }

    /// Creates a hollow reference: the target is known only by its key.
    pub fn hollow(class: impl Into<ClassName>, key: impl Into<Value>) -> Self {
        Self::Reference(Reference::Hollow {
            class: class.into(),
            key: Box::new(key.into()),
        })
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<Instance> for Value {
    fn from(src: Instance) -> Self {
        Self::Embedded(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
