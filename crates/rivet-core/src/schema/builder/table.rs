use super::{link::Link, parse::located};
use crate::{
    decl::{ColumnDecl, JoinColumnDecl, Locator, UniqueConstraint},
    schema::{
        app::{AttributeId, TypeId},
        db::{Accessor, Column, ColumnId, ColumnKind, Table, TableId, TableKind},
    },
    value::Type,
    Error, Result,
};
use tracing::debug;

/// A key column of an entity's primary table, as seen by columns that
/// reference it.
#[derive(Debug, Clone)]
pub(super) struct KeyColumn {
    pub(super) attribute: AttributeId,
    pub(super) column: ColumnId,
    pub(super) name: String,
    pub(super) ty: Type,
    pub(super) accessor: Accessor,
}

/// Everything needed to create one column.
pub(super) struct ColumnSpec<'d> {
    /// Name used when the declaration gives none; rendered with the naming
    /// strategy
    pub(super) default_name: String,
    pub(super) mapping_name: String,
    pub(super) owner: TypeId,
    pub(super) ty: Type,
    pub(super) decl: Option<&'d ColumnDecl>,
    pub(super) kind: ColumnKind,
}

/// Physical settings of a table being created.
pub(super) struct TableSpec<'d> {
    pub(super) name: String,
    pub(super) schema: Option<&'d String>,
    pub(super) kind: TableKind,
    pub(super) unique_constraints: &'d [UniqueConstraint],
    pub(super) locator: Option<&'d Locator>,
}

impl Link<'_> {
    pub(super) fn create_table(&mut self, spec: TableSpec<'_>) -> Result<TableId> {
        let key = match spec.schema {
            Some(schema) => format!("{schema}.{}", spec.name),
            None => spec.name.clone(),
        }
        .to_ascii_lowercase();

        if self.table_lookup.contains_key(&key) {
            return Err(located(
                Error::mapping(format!("table `{}` is mapped twice", spec.name)),
                spec.locator,
            ));
        }

        let id = TableId(self.tables.len());
        self.table_lookup.insert(key, id);

        debug!(table = %spec.name, kind = ?spec.kind, "created table");

        let mut table = Table::new(id, spec.name, spec.kind);
        table.schema = spec.schema.cloned();
        table.unique_constraints = spec.unique_constraints.to_vec();
        self.tables.push(table);

        Ok(id)
    }

    /// Creates a column and attaches it to `table`.
    pub(super) fn add_column(&mut self, table: TableId, spec: ColumnSpec<'_>) -> Result<ColumnId> {
        let table = &mut self.tables[table.0];

        let name = match spec.decl.and_then(|decl| decl.name.as_ref()) {
            Some(name) => name.clone(),
            None => self.builder.generated_column_name(&spec.default_name),
        };

        if let Some(declared) = spec.decl.and_then(|decl| decl.table.as_ref()) {
            if !declared.eq_ignore_ascii_case(&table.name) {
                return Err(located(
                    Error::mapping(format!(
                        "column `{name}` of `{}` is declared in table `{declared}`, \
                         but the attribute is stored in `{}`",
                        spec.mapping_name, table.name
                    )),
                    spec.decl.and_then(|decl| decl.locator.as_ref()),
                ));
            }
        }

        let mut column = Column::new(name, spec.mapping_name, spec.owner, spec.ty, spec.kind);
        if let Some(decl) = spec.decl {
            column = column.with_decl(decl);
        }

        table.add_column(column)
    }

    /// Creates one column per key column of a referenced entity, each holding
    /// the key of the instance it is read from.
    pub(super) fn key_columns(
        &mut self,
        table: TableId,
        keys: &[KeyColumn],
        decls: &[JoinColumnDecl],
        owner: TypeId,
        mapping_name: &str,
        default_name: impl Fn(&KeyColumn) -> String,
    ) -> Result<Vec<ColumnId>> {
        let resolved = resolve_join_columns(decls, keys, mapping_name)?;

        keys.iter()
            .zip(resolved)
            .map(|(key, decl)| {
                self.add_column(
                    table,
                    ColumnSpec {
                        default_name: default_name(key),
                        mapping_name: mapping_name.to_string(),
                        owner,
                        ty: key.ty,
                        decl: decl.map(|decl| &decl.column),
                        kind: ColumnKind::Key {
                            key: key.accessor.clone(),
                        },
                    },
                )
            })
            .collect()
    }

    /// The value type of a basic type.
    pub(super) fn value_type(&self, id: TypeId) -> Result<Type> {
        let ty = self.app.ty(id);
        ty.basic_type().ok_or_else(|| {
            Error::illegal_state(format!("`{}` is not a basic type", ty.class))
        })
    }
}

/// Matches join column declarations to the key columns they reference.
///
/// Returns one entry per key column, in key order. A declaration references
/// its key column by name; without a name it references the only key column,
/// or the key column at the same position.
pub(super) fn resolve_join_columns<'d>(
    decls: &'d [JoinColumnDecl],
    keys: &[KeyColumn],
    mapping_name: &str,
) -> Result<Vec<Option<&'d JoinColumnDecl>>> {
    if decls.is_empty() {
        return Ok(vec![None; keys.len()]);
    }

    let locator = decls.first().and_then(|decl| decl.column.locator.as_ref());

    if decls.len() != keys.len() {
        return Err(located(
            Error::mapping(format!(
                "`{mapping_name}` declares {} join columns but the referenced key has {} columns",
                decls.len(),
                keys.len()
            )),
            locator,
        ));
    }

    let mut resolved = vec![None; keys.len()];

    for (index, decl) in decls.iter().enumerate() {
        let position = match &decl.referenced_column_name {
            Some(name) => keys
                .iter()
                .position(|key| key.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    located(
                        Error::mapping(format!(
                            "join column of `{mapping_name}` references `{name}`, \
                             which is not a key column"
                        )),
                        decl.column.locator.as_ref(),
                    )
                })?,
            None if keys.len() == 1 => 0,
            None => index,
        };

        if resolved[position].is_some() {
            return Err(located(
                Error::mapping(format!(
                    "two join columns of `{mapping_name}` reference `{}`",
                    keys[position].name
                )),
                decl.column.locator.as_ref(),
            ));
        }

        resolved[position] = Some(decl);
    }

    Ok(resolved)
}
