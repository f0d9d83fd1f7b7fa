use super::JoinColumnDecl;

/// A named set of column names whose combined values must be unique.
///
/// Columns are not checked against the table at this stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UniqueConstraint {
    /// Constraint name. Empty when the declaration did not name it.
    pub name: String,

    pub column_names: Vec<String>,
}

/// Accumulates the column-name children of a unique constraint declaration.
#[derive(Debug, Default)]
pub struct UniqueConstraintBuilder {
    name: String,
    column_names: Vec<String>,
}

/// Collection table of an element collection.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollectionTableDecl {
    pub name: Option<String>,
    pub schema: Option<String>,
    pub unique_constraints: Vec<UniqueConstraint>,

    /// Columns referencing the owning entity's key
    pub join_columns: Vec<JoinColumnDecl>,
}

/// Accumulates the children of a collection table declaration.
#[derive(Debug, Default)]
pub struct CollectionTableDeclBuilder {
    decl: CollectionTableDecl,
}

/// Join table of an owning plural association.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JoinTableDecl {
    pub name: Option<String>,
    pub schema: Option<String>,

    /// Columns referencing the owning side's key
    pub join_columns: Vec<JoinColumnDecl>,

    /// Columns referencing the target's key
    pub inverse_join_columns: Vec<JoinColumnDecl>,

    pub unique_constraints: Vec<UniqueConstraint>,
}

impl UniqueConstraint {
    pub fn builder() -> UniqueConstraintBuilder {
        UniqueConstraintBuilder::default()
    }
}

impl UniqueConstraintBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a `column-name` child.
    pub fn column_name(mut self, column_name: impl Into<String>) -> Self {
        self.column_names.push(column_name.into());
        self
    }

    pub fn build(self) -> UniqueConstraint {
        UniqueConstraint {
            name: self.name,
            column_names: self.column_names,
        }
    }
}

impl CollectionTableDecl {
    pub fn builder() -> CollectionTableDeclBuilder {
        CollectionTableDeclBuilder::default()
    }
}

impl CollectionTableDeclBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.decl.name = Some(name.into());
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.decl.schema = Some(schema.into());
        self
    }

    /// Adds a `unique-constraint` child.
    pub fn unique_constraint(mut self, constraint: UniqueConstraint) -> Self {
        self.decl.unique_constraints.push(constraint);
        self
    }

    /// Adds a `join-column` child.
    pub fn join_column(mut self, join_column: JoinColumnDecl) -> Self {
        self.decl.join_columns.push(join_column);
        self
    }

    pub fn build(self) -> CollectionTableDecl {
        self.decl
    }
}

impl JoinTableDecl {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn join_column(mut self, join_column: JoinColumnDecl) -> Self {
        self.join_columns.push(join_column);
        self
    }

    pub fn inverse_join_column(mut self, join_column: JoinColumnDecl) -> Self {
        self.inverse_join_columns.push(join_column);
        self
    }
}
