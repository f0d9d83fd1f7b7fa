use super::Attribute;
use crate::{
    decl::{CollectionKind, CollectionTableDecl, ColumnDecl, MapKeyDecl, UniqueConstraint},
    value::{Elements, Instance, ManagedCollection, Value},
    Error, Result,
};

/// Collection metadata of a plural attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Plural {
    pub collection: CollectionKind,

    /// Collection table of an element collection
    pub collection_table: Option<CollectionTableDecl>,

    /// Key metadata of a map. `class` is always resolved.
    pub map_key: Option<MapKeyDecl>,

    pub order_by: Option<String>,

    pub order_column: Option<ColumnDecl>,
}

/// A view of an attribute that is known to be plural.
#[derive(Debug, Clone, Copy)]
pub struct PluralAttribute<'a> {
    attribute: &'a Attribute,
    plural: &'a Plural,
}

impl<'a> PluralAttribute<'a> {
    pub(super) fn new(attribute: &'a Attribute, plural: &'a Plural) -> Self {
        Self { attribute, plural }
    }

    pub fn attribute(&self) -> &'a Attribute {
        self.attribute
    }

    pub fn collection(&self) -> CollectionKind {
        self.plural.collection
    }

    pub fn plural(&self) -> &'a Plural {
        self.plural
    }

    /// Installs a fresh managed collection into `instance`, replacing
    /// whatever the attribute held.
    pub fn new_instance(&self, instance: &mut Instance, lazy: bool) {
        let collection = ManagedCollection::new(self.attribute.id, self.plural.collection, lazy);
        instance.set(self.attribute.name.clone(), Value::Collection(collection));
    }

    /// Installs a managed collection loaded with `elements`.
    pub fn set_collection(&self, instance: &mut Instance, elements: Elements) -> Result<()> {
        let mut collection =
            ManagedCollection::new(self.attribute.id, self.plural.collection, true);
        collection.load(elements)?;
        instance.set(self.attribute.name.clone(), Value::Collection(collection));
        Ok(())
    }

    /// Returns the managed collection held by `instance`, if any.
    pub fn get_collection<'i>(&self, instance: &'i Instance) -> Option<&'i ManagedCollection> {
        instance
            .get(&self.attribute.name)
            .and_then(Value::as_collection)
    }

    /// Returns the collection to its lazy state so the next access reloads
    /// it. Does nothing if the attribute holds no collection.
    pub fn reset(&self, instance: &mut Instance) -> Result<()> {
        match instance.get_mut(&self.attribute.name) {
            None | Some(Value::Null) => Ok(()),
            Some(Value::Collection(collection)) => {
                collection.reset();
                Ok(())
            }
            Some(other) => Err(Error::invalid_value(format!(
                "plural attribute `{}` holds {}, not a collection",
                self.attribute.name,
                other.kind_name()
            ))),
        }
    }

    pub fn collection_table_unique_constraints(&self) -> &'a [UniqueConstraint] {
        self.plural
            .collection_table
            .as_ref()
            .map(|table| table.unique_constraints.as_slice())
            .unwrap_or_default()
    }
}
