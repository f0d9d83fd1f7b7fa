use super::Locator;
use crate::schema::db::SqlType;

/// A declared column specification.
///
/// Every property has the default a front-end would apply when the user left
/// it out; `name` stays `None` so that the builder can derive it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColumnDecl {
    pub name: Option<String>,

    /// Secondary table holding the column. The primary table when absent.
    pub table: Option<String>,

    pub nullable: bool,
    pub unique: bool,
    pub insertable: bool,
    pub updatable: bool,

    pub length: u32,
    pub precision: u32,
    pub scale: u32,

    /// Overrides the SQL type derived from the attribute's value type
    pub sql_type: Option<SqlType>,

    /// Verbatim column definition, passed through to schema tooling
    pub column_definition: Option<String>,

    pub locator: Option<Locator>,
}

/// A declared join column: a column specification plus the name of the
/// column it references on the other side.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JoinColumnDecl {
    pub column: ColumnDecl,

    /// Referenced key column. Defaults to the single key column of the
    /// referenced table.
    pub referenced_column_name: Option<String>,
}

impl ColumnDecl {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn insertable(mut self, insertable: bool) -> Self {
        self.insertable = insertable;
        self
    }

    pub fn updatable(mut self, updatable: bool) -> Self {
        self.updatable = updatable;
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    pub fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }

    pub fn sql_type(mut self, sql_type: SqlType) -> Self {
        self.sql_type = Some(sql_type);
        self
    }

    pub fn located(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }
}

impl Default for ColumnDecl {
    fn default() -> Self {
        Self {
            name: None,
            table: None,
            nullable: true,
            unique: false,
            insertable: true,
            updatable: true,
            length: 255,
            precision: 0,
            scale: 0,
            sql_type: None,
            column_definition: None,
            locator: None,
        }
    }
}

impl JoinColumnDecl {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            column: ColumnDecl::named(name),
            referenced_column_name: None,
        }
    }

    pub fn references(mut self, column: impl Into<String>) -> Self {
        self.referenced_column_name = Some(column.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.column.nullable = nullable;
        self
    }
}

impl From<ColumnDecl> for JoinColumnDecl {
    fn from(column: ColumnDecl) -> Self {
        Self {
            column,
            referenced_column_name: None,
        }
    }
}
