mod kind;
pub use kind::MappingKind;

mod parent;
pub use parent::ParentMapping;

mod plural;
pub use plural::{ElementMapping, MapKeyMapping, OwnedPluralMapping, OwnerPluralMapping};

mod root;
pub use root::{RootKind, RootMapping};

mod singular;
pub use singular::{BasicMapping, OwnedSingularMapping, OwnerSingularMapping};

use super::app::{AttributeId, TypeId};
use indexmap::IndexMap;

/// Defines the correspondence between entity attributes and the tables and
/// columns holding them.
///
/// Built once while linking and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct Mappings {
    /// Mapping tree of each entity, indexed by type
    pub roots: IndexMap<TypeId, RootMapping>,
}

/// A node of a mapping tree. Every persistent attribute reachable from an
/// entity maps to exactly one node per usage path.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapping {
    /// An embedded attribute; its children map the embeddable's attributes
    Parent(ParentMapping),

    /// A basic attribute stored in one column
    Basic(BasicMapping),

    /// The owning side of a to-one association, holding the join columns
    OwnerSingular(OwnerSingularMapping),

    /// The inverse side of a one-to-one association
    OwnedSingular(OwnedSingularMapping),

    /// An element collection, or an owning one-to-many association
    OwnerOneToMany(OwnerPluralMapping),

    /// The inverse side of a one-to-many association
    OwnedOneToMany(OwnedPluralMapping),

    /// The owning side of a many-to-many association
    OwnerManyToMany(OwnerPluralMapping),

    /// The inverse side of a many-to-many association
    OwnedManyToMany(OwnedPluralMapping),
}

impl Mappings {
    pub fn root(&self, id: impl Into<TypeId>) -> Option<&RootMapping> {
        self.roots.get(&id.into())
    }
}

impl Mapping {
    pub fn kind(&self) -> MappingKind {
        match self {
            Mapping::Parent(_) => MappingKind::Parent,
            Mapping::Basic(_) => MappingKind::Basic,
            Mapping::OwnerSingular(_) => MappingKind::OwnerSingular,
            Mapping::OwnedSingular(_) => MappingKind::OwnedSingular,
            Mapping::OwnerOneToMany(_) => MappingKind::OwnerOneToMany,
            Mapping::OwnedOneToMany(_) => MappingKind::OwnedOneToMany,
            Mapping::OwnerManyToMany(_) => MappingKind::OwnerManyToMany,
            Mapping::OwnedManyToMany(_) => MappingKind::OwnedManyToMany,
        }
    }

    pub fn attribute(&self) -> AttributeId {
        match self {
            Mapping::Parent(m) => m.attribute,
            Mapping::Basic(m) => m.attribute,
            Mapping::OwnerSingular(m) => m.attribute,
            Mapping::OwnedSingular(m) => m.attribute,
            Mapping::OwnerOneToMany(m) | Mapping::OwnerManyToMany(m) => m.attribute,
            Mapping::OwnedOneToMany(m) | Mapping::OwnedManyToMany(m) => m.attribute,
        }
    }

    /// Dotted attribute path from the root to this node.
    pub fn path(&self) -> &str {
        match self {
            Mapping::Parent(m) => &m.path,
            Mapping::Basic(m) => &m.path,
            Mapping::OwnerSingular(m) => &m.path,
            Mapping::OwnedSingular(m) => &m.path,
            Mapping::OwnerOneToMany(m) | Mapping::OwnerManyToMany(m) => &m.path,
            Mapping::OwnedOneToMany(m) | Mapping::OwnedManyToMany(m) => &m.path,
        }
    }

    /// The attribute name this node is keyed by in its parent.
    pub fn name(&self) -> &str {
        let path = self.path();
        path.rsplit('.').next().unwrap_or(path)
    }

    /// Children of a node that can have named children.
    pub fn children(&self) -> Option<&IndexMap<String, Mapping>> {
        match self {
            Mapping::Parent(parent) => Some(&parent.children),
            _ => None,
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(
            self,
            Mapping::OwnerSingular(_) | Mapping::OwnerOneToMany(_) | Mapping::OwnerManyToMany(_)
        )
    }

    pub fn as_parent(&self) -> Option<&ParentMapping> {
        match self {
            Mapping::Parent(parent) => Some(parent),
            _ => None,
        }
    }

    pub fn as_basic(&self) -> Option<&BasicMapping> {
        match self {
            Mapping::Basic(basic) => Some(basic),
            _ => None,
        }
    }

    pub fn as_owner_singular(&self) -> Option<&OwnerSingularMapping> {
        match self {
            Mapping::OwnerSingular(owner) => Some(owner),
            _ => None,
        }
    }

    pub fn as_owned_singular(&self) -> Option<&OwnedSingularMapping> {
        match self {
            Mapping::OwnedSingular(owned) => Some(owned),
            _ => None,
        }
    }

    /// Returns the node of an owning plural attribute.
    pub fn as_owner_plural(&self) -> Option<&OwnerPluralMapping> {
        match self {
            Mapping::OwnerOneToMany(owner) | Mapping::OwnerManyToMany(owner) => Some(owner),
            _ => None,
        }
    }

    /// Returns the node of an inverse plural attribute.
    pub fn as_owned_plural(&self) -> Option<&OwnedPluralMapping> {
        match self {
            Mapping::OwnedOneToMany(owned) | Mapping::OwnedManyToMany(owned) => Some(owned),
            _ => None,
        }
    }
}
