use crate::schema::app::{Attribute, AttributeKind, Cardinality};

/// The kind of mapping node an attribute links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    Parent,
    Basic,
    OwnerSingular,
    OwnedSingular,
    OwnerOneToMany,
    OwnedOneToMany,
    OwnerManyToMany,
    OwnedManyToMany,
}

impl MappingKind {
    /// Selects the node kind for a parsed attribute.
    ///
    /// Ownership is decided by `mapped_by` alone: an association with a
    /// `mapped_by` is the inverse side regardless of fetch, cascade or
    /// orphan removal.
    pub fn select(attribute: &Attribute) -> MappingKind {
        let plural = attribute.is_plural();
        let owned = attribute.mapped_by.is_some();

        match (attribute.kind, plural, owned) {
            (AttributeKind::Basic, false, _) => MappingKind::Basic,
            (AttributeKind::Embedded, false, _) => MappingKind::Parent,
            (AttributeKind::Basic | AttributeKind::Embedded, true, _) => {
                MappingKind::OwnerOneToMany
            }
            (AttributeKind::Association(_), false, false) => MappingKind::OwnerSingular,
            (AttributeKind::Association(_), false, true) => MappingKind::OwnedSingular,
            (AttributeKind::Association(Cardinality::ManyToMany), true, false) => {
                MappingKind::OwnerManyToMany
            }
            (AttributeKind::Association(Cardinality::ManyToMany), true, true) => {
                MappingKind::OwnedManyToMany
            }
            (AttributeKind::Association(_), true, false) => MappingKind::OwnerOneToMany,
            (AttributeKind::Association(_), true, true) => MappingKind::OwnedOneToMany,
        }
    }

    pub fn is_owner(self) -> bool {
        matches!(
            self,
            MappingKind::OwnerSingular | MappingKind::OwnerOneToMany | MappingKind::OwnerManyToMany
        )
    }
}
