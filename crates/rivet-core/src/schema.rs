pub mod app;

mod builder;
pub use builder::{Builder, NamingStrategy};

pub mod db;

pub mod mapping;
use mapping::{Mapping, Mappings, RootMapping};

mod name;
pub use name::Name;

mod verify;

use crate::{decl::ClassName, Error, Result};
use app::{Attribute, AttributeId, PersistentType, TypeId};
use db::Table;

/// The complete, immutable result of bootstrapping a persistence unit.
#[derive(Debug)]
pub struct Metamodel {
    /// Persistent types and their attributes
    pub app: app::Registry,

    /// Tables and columns
    pub db: db::Schema,

    /// Maps attributes of each entity to the tables and columns holding them
    pub mapping: Mappings,
}

impl Metamodel {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Looks up a persistent type by class.
    pub fn get_type(&self, class: impl Into<ClassName>) -> Result<&PersistentType> {
        self.app.get_type(&class.into())
    }

    pub fn attribute(&self, id: AttributeId) -> &Attribute {
        self.app.attribute(id)
    }

    /// Returns the mapping tree of an entity.
    pub fn mapping_for(&self, id: impl Into<TypeId>) -> Option<&RootMapping> {
        self.mapping.root(id)
    }

    pub fn table_for(&self, id: impl Into<TypeId>) -> Option<&Table> {
        self.mapping_for(id).map(|root| self.db.table(root.table))
    }

    /// Returns the mapping node of an entity attribute.
    ///
    /// Attributes of embeddables and mapped superclasses have no node of
    /// their own: they are mapped once per usage path, reachable through
    /// [`RootMapping::get_mapping`].
    pub fn attribute_mapping(&self, id: AttributeId) -> Result<&Mapping> {
        let ty = self.app.ty(id.ty);
        let attribute = ty.attribute_by_id(id);

        if !ty.is_entity() {
            return Err(Error::illegal_state(format!(
                "attribute `{}::{}` belongs to {} and is mapped per usage path",
                ty.class,
                attribute.name,
                ty.kind.describe()
            )));
        }

        if !attribute.is_linked() {
            return Err(Error::illegal_state(format!(
                "attribute `{}::{}` has not been linked",
                ty.class, attribute.name
            )));
        }

        self.mapping
            .root(id.ty)
            .and_then(|root| root.get_mapping(&attribute.name))
            .ok_or_else(|| {
                Error::illegal_state(format!(
                    "attribute `{}::{}` has no mapping",
                    ty.class, attribute.name
                ))
            })
    }
}
