use super::{Column, ColumnId};
use crate::{
    decl::UniqueConstraint,
    schema::app::{AttributeId, TypeId},
    Error, Result,
};
use std::fmt::{self, Write};

/// A database table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Name of the table
    pub name: String,

    pub schema: Option<String>,

    pub kind: TableKind,

    /// The table's columns
    pub columns: Vec<Column>,

    pub primary_key: Vec<ColumnId>,

    pub unique_constraints: Vec<UniqueConstraint>,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableId(pub usize);

/// What a table stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// The primary table of an entity
    Entity(TypeId),

    /// The collection table of an element collection
    Collection(AttributeId),

    /// The join table of an owning plural association
    Join(AttributeId),
}

impl Table {
    pub(crate) fn new(id: TableId, name: String, kind: TableKind) -> Self {
        Self {
            id,
            name,
            schema: None,
            kind,
            columns: vec![],
            primary_key: vec![],
            unique_constraints: vec![],
        }
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        assert_eq!(self.id, id.table);
        &self.columns[id.index]
    }

    /// Finds a column by name, ignoring ASCII case.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn primary_key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.primary_key
            .iter()
            .map(|column_id| &self.columns[column_id.index])
    }

    pub fn is_entity_table(&self) -> bool {
        matches!(self.kind, TableKind::Entity(_))
    }

    /// Attaches `column` to the table.
    ///
    /// Column names are unique per table, ignoring ASCII case.
    pub(crate) fn add_column(&mut self, mut column: Column) -> Result<ColumnId> {
        column.set_table(self.id)?;

        if let Some(existing) = self.column_by_name(&column.name) {
            let mut message = format!(
                "duplicate column `{}` in table `{}`",
                column.name, self.name
            );

            if let Some(locator) = &existing.locator {
                let _ = write!(message, ", first declared at {locator}");
            }

            let err = Error::mapping(message);
            return Err(match column.locator {
                Some(locator) => err.with_locator(locator),
                None => err,
            });
        }

        let id = ColumnId {
            table: self.id,
            index: self.columns.len(),
        };

        column.id = id;
        self.columns.push(column);

        Ok(id)
    }

    /// Attaches `column` and adds it to the primary key.
    pub(crate) fn add_primary_key_column(&mut self, mut column: Column) -> Result<ColumnId> {
        column.primary_key = true;
        column.nullable = false;
        let id = self.add_column(column)?;
        self.primary_key.push(id);
        Ok(id)
    }
}

impl TableId {
    pub(crate) fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decl::Locator,
        schema::db::{Accessor, ColumnKind},
        value::Type,
    };

    fn column(name: &str, line: u32) -> Column {
        let mut column = Column::new(
            name,
            name,
            TypeId(0),
            Type::String,
            ColumnKind::Basic {
                path: Accessor::root().child(name, "String"),
            },
        );
        column.locator = Some(Locator::new("orm.xml", line));
        column
    }

    #[test]
    fn add_column_assigns_ids() {
        let mut table = Table::new(TableId(3), "Person".into(), TableKind::Entity(TypeId(0)));
        let id = table.add_column(column("name", 1)).unwrap();

        assert_eq!(id, ColumnId { table: TableId(3), index: 0 });
        assert_eq!(table.column(id).table(), Some(TableId(3)));
    }

    #[test]
    fn duplicate_column_names_both_locators() {
        let mut table = Table::new(TableId(0), "Person".into(), TableKind::Entity(TypeId(0)));
        table.add_column(column("city", 4)).unwrap();

        let err = table.add_column(column("CITY", 9)).unwrap_err();
        assert!(err.is_mapping());
        assert_eq!(
            err.to_string(),
            "invalid mapping: duplicate column `CITY` in table `Person`, \
             first declared at orm.xml:4 (at orm.xml:9)"
        );
    }
}
