use super::{ClassName, ColumnDecl, OverrideDecl, Overrides};

/// Key metadata of a map-valued plural attribute.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapKeyDecl {
    /// Attribute of the element type used as the key. When set, no separate
    /// key column is created.
    pub attribute: Option<String>,

    /// Explicit key class. Defaults to the declared map key type.
    pub class: Option<ClassName>,

    pub column: Option<ColumnDecl>,

    pub enum_type: Option<EnumType>,

    pub temporal_type: Option<TemporalType>,

    /// Overrides applied to an embeddable key
    pub overrides: Overrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnumType {
    Ordinal,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemporalType {
    Date,
    Time,
    Timestamp,
}

impl MapKeyDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn class(mut self, class: impl Into<ClassName>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn column(mut self, column: ColumnDecl) -> Self {
        self.column = Some(column);
        self
    }

    /// Replaces the column of the embeddable key attribute at `path`.
    pub fn override_column(mut self, path: impl Into<String>, column: ColumnDecl) -> Self {
        self.overrides
            .insert(path.into(), OverrideDecl::Column(column));
        self
    }
}
