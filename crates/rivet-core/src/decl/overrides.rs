use super::{ColumnDecl, JoinColumnDecl};
use indexmap::IndexMap;

/// A per-usage-site replacement of a column mapping.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverrideDecl {
    /// Replaces the column of a basic attribute, or the value column of a
    /// basic element collection
    Column(ColumnDecl),

    /// Replaces the join columns of an owning to-one association
    JoinColumns(Vec<JoinColumnDecl>),
}

/// Overrides keyed by dotted attribute path, relative to the declaring
/// attribute (or type, for type-level overrides).
pub type Overrides = IndexMap<String, OverrideDecl>;

impl OverrideDecl {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Column(_) => "attribute override",
            Self::JoinColumns(_) => "association override",
        }
    }
}
