use super::RootMapping;
use crate::schema::{
    app::{AttributeId, TypeId},
    db::{ColumnId, TableId},
};

/// An owning plural attribute: an element collection, or the owning side of
/// a one-to-many or many-to-many association.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerPluralMapping {
    pub attribute: AttributeId,

    pub path: String,

    /// The collection table, the join table, or for a one-to-many mapped
    /// with join columns, the target's table
    pub table: TableId,

    /// Columns referencing the owning entity's key
    pub owner_columns: Vec<ColumnId>,

    pub element: ElementMapping,

    pub map_key: Option<MapKeyMapping>,

    pub order_column: Option<ColumnId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementMapping {
    /// Basic elements stored in a single value column
    Basic { column: ColumnId },

    /// Embeddable elements, mapped by their own tree over the collection
    /// table
    Embeddable(Box<RootMapping>),

    /// Target entities, referenced by the inverse join columns. Empty when
    /// the owner columns live in the target's table.
    Entity {
        target: TypeId,
        columns: Vec<ColumnId>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapKeyMapping {
    /// The key is an attribute of the element
    Attribute(String),

    /// The key is stored in dedicated columns
    Columns(Vec<ColumnId>),
}

/// The inverse side of a plural association. Holds no columns.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedPluralMapping {
    pub attribute: AttributeId,

    pub path: String,

    pub target: TypeId,

    /// The owning attribute on the target
    pub owner: AttributeId,

    /// Removing the reference deletes the target
    pub orphan_removal: bool,

    pub eager: bool,
}
