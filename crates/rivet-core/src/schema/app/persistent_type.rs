use super::{Attribute, AttributeId};
use crate::{
    decl::{ClassName, Locator, Overrides, TableDecl},
    value::Type,
};
use std::fmt;

/// One class participating in persistence.
#[derive(Debug, Clone)]
pub struct PersistentType {
    /// Uniquely identifies the type within the registry
    pub id: TypeId,

    pub class: ClassName,

    /// Entity name; the simple class name unless declared otherwise
    pub name: String,

    pub kind: TypeKind,

    pub supertype: Option<TypeId>,

    /// Attributes, inherited ones first
    pub attributes: Vec<Attribute>,

    /// Declared primary table of an entity
    pub table: Option<TableDecl>,

    /// Overrides applied to this type's attributes when it is mapped as an
    /// entity
    pub overrides: Overrides,

    pub locator: Option<Locator>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A value stored in a single column
    Basic(Type),

    /// Has an identity and a table of its own
    Entity,

    /// Has no identity; stored inside its owner
    Embeddable,

    /// Contributes attributes to its subtypes only
    MappedSuperclass,
}

impl PersistentType {
    pub(crate) fn basic(id: TypeId, class: ClassName, ty: Type) -> Self {
        Self {
            id,
            name: class.simple_name().to_string(),
            class,
            kind: TypeKind::Basic(ty),
            supertype: None,
            attributes: vec![],
            table: None,
            overrides: Overrides::new(),
            locator: None,
        }
    }

    pub fn is_entity(&self) -> bool {
        matches!(self.kind, TypeKind::Entity)
    }

    pub fn is_embeddable(&self) -> bool {
        matches!(self.kind, TypeKind::Embeddable)
    }

    pub fn is_basic(&self) -> bool {
        matches!(self.kind, TypeKind::Basic(_))
    }

    pub fn basic_type(&self) -> Option<Type> {
        match self.kind {
            TypeKind::Basic(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    pub fn attribute_by_id(&self, id: AttributeId) -> &Attribute {
        assert_eq!(self.id, id.ty);
        &self.attributes[id.index]
    }

    /// Identifier attributes, in declaration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.attributes.iter().filter(|attribute| attribute.identifier)
    }
}

impl TypeKind {
    /// Describes the kind for error messages, e.g. "an embeddable".
    pub fn describe(&self) -> &'static str {
        match self {
            TypeKind::Basic(_) => "a basic type",
            TypeKind::Entity => "an entity",
            TypeKind::Embeddable => "an embeddable",
            TypeKind::MappedSuperclass => "a mapped superclass",
        }
    }
}

impl TypeId {
    pub(crate) fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl From<&PersistentType> for TypeId {
    fn from(value: &PersistentType) -> Self {
        value.id
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TypeId({})", self.0)
    }
}
