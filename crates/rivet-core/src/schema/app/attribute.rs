use super::{Plural, PluralAttribute, TypeId};
use crate::{
    decl::{
        CascadeSet, ColumnDecl, DeclaredType, FetchType, JoinColumnDecl, JoinTableDecl, Locator,
        Overrides,
    },
    schema::{mapping::Mapping, Metamodel},
    value::{Instance, Type, Value},
    Error, Result,
};
use std::fmt;

/// A persistent attribute bound to its declaring type.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Uniquely identifies the attribute within the registry
    pub id: AttributeId,

    pub name: String,

    /// The declared type of the member
    pub ty: DeclaredType,

    pub kind: AttributeKind,

    /// True if the attribute is (part of) the identifier
    pub identifier: bool,

    /// The value type, the element type of a collection, or the target
    /// entity of an association
    pub target: TypeId,

    /// The type that declared the attribute. Differs from `id.ty` for
    /// inherited attributes.
    pub declared_by: TypeId,

    /// Set for collection-valued attributes
    pub plural: Option<Plural>,

    pub fetch: FetchType,

    pub cascade: CascadeSet,

    /// Attribute on the target owning the association. `None` when this
    /// side owns it.
    pub mapped_by: Option<String>,

    pub orphan_removal: bool,

    pub columns: Vec<ColumnDecl>,

    pub join_columns: Vec<JoinColumnDecl>,

    pub join_table: Option<JoinTableDecl>,

    /// Overrides applied to the attributes of an embedded or element value
    pub overrides: Overrides,

    pub locator: Option<Locator>,

    pub(crate) state: LinkState,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeId {
    pub ty: TypeId,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Basic,
    Embedded,
    Association(Cardinality),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Declarations have been validated and resolved
    Parsed,

    /// The attribute has a mapping node and columns
    Linked,
}

impl Attribute {
    /// Copies an inherited attribute into a subtype.
    pub fn inherit(&self, id: AttributeId) -> Attribute {
        Attribute {
            id,
            state: LinkState::Parsed,
            ..self.clone()
        }
    }

    pub fn is_plural(&self) -> bool {
        self.plural.is_some()
    }

    pub fn is_association(&self) -> bool {
        matches!(self.kind, AttributeKind::Association(_))
    }

    pub fn cardinality(&self) -> Option<Cardinality> {
        match self.kind {
            AttributeKind::Association(cardinality) => Some(cardinality),
            _ => None,
        }
    }

    /// Returns `true` for the owning side of an association.
    pub fn is_owner(&self) -> bool {
        self.is_association() && self.mapped_by.is_none()
    }

    pub fn is_linked(&self) -> bool {
        self.state == LinkState::Linked
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn as_plural(&self) -> Option<PluralAttribute<'_>> {
        self.plural
            .as_ref()
            .map(|plural| PluralAttribute::new(self, plural))
    }

    /// Returns the attribute's mapping node. See
    /// [`Metamodel::attribute_mapping`].
    pub fn mapping<'m>(&self, metamodel: &'m Metamodel) -> Result<&'m Mapping> {
        metamodel.attribute_mapping(self.id)
    }

    /// Reads the attribute's value from `instance`.
    pub fn get<'a>(&self, instance: &'a Instance) -> Option<&'a Value> {
        instance.get(&self.name)
    }

    /// Writes the attribute's value into `instance`, checking that the value
    /// has the right shape.
    pub fn set(&self, instance: &mut Instance, value: Value) -> Result<()> {
        let fits = match (&self.kind, &self.plural, &value) {
            (_, _, Value::Null) => true,
            (_, Some(_), value) => matches!(value, Value::Collection(_)),
            (AttributeKind::Basic, None, value) => {
                Type::from_class(&self.ty.class).is_some_and(|ty| value.is_a(&ty))
            }
            (AttributeKind::Embedded, None, value) => matches!(value, Value::Embedded(_)),
            (AttributeKind::Association(_), None, value) => matches!(value, Value::Reference(_)),
        };

        if !fits {
            return Err(Error::invalid_value(format!(
                "attribute `{}` of type `{}` cannot hold {} values",
                self.name,
                self.ty.class,
                value.kind_name()
            )));
        }

        instance.set(self.name.clone(), value);
        Ok(())
    }
}

impl Cardinality {
    /// The name of the matching association marker, e.g. `one-to-many`.
    pub fn name(self) -> &'static str {
        match self {
            Cardinality::OneToOne => "one-to-one",
            Cardinality::ManyToOne => "many-to-one",
            Cardinality::OneToMany => "one-to-many",
            Cardinality::ManyToMany => "many-to-many",
        }
    }

    pub fn is_plural(self) -> bool {
        matches!(self, Cardinality::OneToMany | Cardinality::ManyToMany)
    }
}

impl AttributeId {
    pub(crate) fn placeholder() -> Self {
        Self {
            ty: TypeId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl From<&Attribute> for AttributeId {
    fn from(value: &Attribute) -> Self {
        value.id
    }
}

impl fmt::Debug for AttributeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "AttributeId({}/{})", self.ty.0, self.index)
    }
}
