use crate::schema::{
    app::{AttributeId, TypeId},
    db::ColumnId,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BasicMapping {
    pub attribute: AttributeId,

    pub path: String,

    pub column: ColumnId,

    /// True if the column is part of the primary key
    pub identifier: bool,
}

/// The owning side of a many-to-one or one-to-one association.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerSingularMapping {
    pub attribute: AttributeId,

    pub path: String,

    pub target: TypeId,

    /// Join columns, one per key column of the target, in key order
    pub columns: Vec<ColumnId>,
}

/// The inverse side of a one-to-one association. Holds no columns.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedSingularMapping {
    pub attribute: AttributeId,

    pub path: String,

    pub target: TypeId,

    /// The owning attribute on the target
    pub owner: AttributeId,

    /// Removing the reference deletes the target
    pub orphan_removal: bool,

    pub eager: bool,
}
