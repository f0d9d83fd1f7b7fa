use super::Mapping;
use crate::schema::app::{AttributeId, TypeId};
use indexmap::IndexMap;

/// Maps an embedded attribute by mapping each attribute of the embeddable
/// at the same position.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentMapping {
    pub attribute: AttributeId,

    pub path: String,

    /// The embeddable type
    pub ty: TypeId,

    pub children: IndexMap<String, Mapping>,
}
