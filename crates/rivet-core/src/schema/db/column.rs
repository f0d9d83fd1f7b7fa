use super::{Accessor, SqlType, TableId};
use crate::{
    decl::{ClassName, ColumnDecl, Locator},
    schema::app::TypeId,
    value::{Instance, InstanceRef, Reference, Type, Value},
    Error, Result, Session,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Uniquely identifies the column in the schema.
    pub id: ColumnId,

    /// The name of the column in the database.
    pub name: String,

    /// The table the column was attached to. Set exactly once.
    table: Option<TableId>,

    /// Dotted attribute path the column was created for
    pub mapping_name: String,

    /// Type whose instances supply the column's value
    pub owner: TypeId,

    /// Type of the values stored in the column
    pub ty: Type,

    pub sql_type: SqlType,

    pub length: u32,
    pub precision: u32,
    pub scale: u32,

    pub nullable: bool,
    pub unique: bool,
    pub insertable: bool,
    pub updatable: bool,

    /// True if the column is part of the table's primary key
    pub primary_key: bool,

    pub column_definition: Option<String>,

    pub locator: Option<Locator>,

    /// How the column's value is read from and written to instances
    pub kind: ColumnKind,
}

#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnId {
    pub table: TableId,
    pub index: usize,
}

/// The value bridge of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    /// Holds a basic attribute value
    Basic { path: Accessor },

    /// Holds one component of the key of the instance referenced by a
    /// to-one association
    Join {
        /// Path of the reference attribute
        reference: Accessor,

        /// Class of the referenced entity
        target: ClassName,

        /// Paths of every key attribute of the referenced entity
        keys: Vec<Accessor>,

        /// Which of `keys` this column holds
        position: usize,
    },

    /// Holds one key attribute of the instance it is read from. Used for the
    /// owner and inverse key columns of collection and join tables.
    Key { key: Accessor },

    /// Holds the value of a basic element collection element
    ElementValue,

    /// Holds the position of an element in an ordered list
    Order,

    /// Holds the key of a map entry
    MapKey,
}

impl Column {
    pub(crate) fn new(
        name: impl Into<String>,
        mapping_name: impl Into<String>,
        owner: TypeId,
        ty: Type,
        kind: ColumnKind,
    ) -> Column {
        Column {
            id: ColumnId::placeholder(),
            name: name.into(),
            table: None,
            mapping_name: mapping_name.into(),
            owner,
            ty,
            sql_type: SqlType::from_value_type(ty),
            length: 255,
            precision: 0,
            scale: 0,
            nullable: true,
            unique: false,
            insertable: true,
            updatable: true,
            primary_key: false,
            column_definition: None,
            locator: None,
            kind,
        }
    }

    /// Copies the physical properties of a column declaration.
    pub(crate) fn with_decl(mut self, decl: &ColumnDecl) -> Column {
        if let Some(sql_type) = decl.sql_type {
            self.sql_type = sql_type;
        }
        self.length = decl.length;
        self.precision = decl.precision;
        self.scale = decl.scale;
        self.nullable = decl.nullable;
        self.unique = decl.unique;
        self.insertable = decl.insertable;
        self.updatable = decl.updatable;
        self.column_definition = decl.column_definition.clone();
        self.locator = decl.locator.clone();
        self
    }

    pub fn table(&self) -> Option<TableId> {
        self.table
    }

    /// Attaches the column to its table. A column belongs to exactly one
    /// table; attaching it again is an error.
    pub fn set_table(&mut self, table: TableId) -> Result<()> {
        if let Some(existing) = self.table {
            return Err(Error::illegal_state(format!(
                "column `{}` is already attached to {existing:?}",
                self.name
            )));
        }
        self.table = Some(table);
        Ok(())
    }

    /// Reads the column's value from `instance`.
    pub fn get_value(&self, session: &Session<'_>, instance: &Instance) -> Result<Value> {
        session.check_instance(self.owner, instance)?;

        match &self.kind {
            ColumnKind::Basic { path } | ColumnKind::Key { key: path } => {
                Ok(path.get(instance)?.cloned().unwrap_or_default())
            }
            ColumnKind::Join {
                reference,
                keys,
                position,
                ..
            } => match reference.get(instance)? {
                None | Some(Value::Null) => Ok(Value::Null),
                Some(Value::Reference(Reference::Loaded(target))) => {
                    self.with_target(instance, target, |target| {
                        Ok(keys[*position].get(target)?.cloned().unwrap_or_default())
                    })
                }
                Some(Value::Reference(Reference::Hollow { key, .. })) => {
                    self.key_component(key, keys.len(), *position)
                }
                Some(other) => Err(Error::invalid_value(format!(
                    "expected a reference at `{}`, found {}",
                    reference.path(),
                    other.kind_name()
                ))),
            },
            _ => Err(self.not_instance_backed()),
        }
    }

    /// Writes a value read from the database into `instance`.
    ///
    /// Writing back the value returned by [`Column::get_value`] leaves the
    /// instance unchanged.
    pub fn set_value(&self, instance: &mut Instance, value: Value) -> Result<()> {
        if !value.is_a(&self.ty) {
            return Err(Error::invalid_value(format!(
                "column `{}` holds {} values, got {}",
                self.name,
                self.ty.class_name(),
                value.kind_name()
            )));
        }

        match &self.kind {
            ColumnKind::Basic { path } | ColumnKind::Key { key: path } => {
                let current = path.get(instance)?;
                if current.map_or(value.is_null(), |current| *current == value) {
                    return Ok(());
                }
                *path.slot_mut(instance)? = value;
                Ok(())
            }
            ColumnKind::Join {
                reference,
                target,
                keys,
                position,
            } => {
                let mut key = match reference.get(instance)? {
                    None | Some(Value::Null) if value.is_null() => return Ok(()),
                    None | Some(Value::Null) => vec![Value::Null; keys.len()],
                    Some(Value::Reference(Reference::Loaded(loaded))) => {
                        self.with_target(instance, loaded, |loaded| {
                            keys.iter()
                                .map(|key| Ok(key.get(loaded)?.cloned().unwrap_or_default()))
                                .collect::<Result<Vec<_>>>()
                        })?
                    }
                    Some(Value::Reference(Reference::Hollow { key, .. })) => {
                        if keys.len() == 1 {
                            vec![(**key).clone()]
                        } else {
                            match key.as_list() {
                                Some(items) if items.len() == keys.len() => items.to_vec(),
                                _ => return Err(self.malformed_key(key)),
                            }
                        }
                    }
                    Some(other) => {
                        return Err(Error::invalid_value(format!(
                            "expected a reference for column `{}`, found {}",
                            self.name,
                            other.kind_name()
                        )))
                    }
                };

                if key[*position] == value {
                    return Ok(());
                }

                key[*position] = value;

                *reference.slot_mut(instance)? = if key.iter().all(Value::is_null) {
                    Value::Null
                } else if key.len() == 1 {
                    Value::hollow(target, key.swap_remove(0))
                } else {
                    Value::hollow(target, Value::List(key))
                };

                Ok(())
            }
            _ => Err(self.not_instance_backed()),
        }
    }

    /// Runs `f` on the instance `target` points at. A reference back to
    /// `instance` itself is read through `instance`, which the caller may hold
    /// mutably borrowed.
    fn with_target<R>(
        &self,
        instance: &Instance,
        target: &InstanceRef,
        f: impl FnOnce(&Instance) -> Result<R>,
    ) -> Result<R> {
        if target.points_at(instance) {
            return f(instance);
        }

        let target = target.try_borrow().map_err(|_| {
            Error::invalid_value(format!(
                "instance referenced through column `{}` is being modified",
                self.name
            ))
        })?;
        f(&target)
    }

    fn key_component(&self, key: &Value, arity: usize, position: usize) -> Result<Value> {
        if arity == 1 {
            return Ok(key.clone());
        }

        match key.as_list() {
            Some(items) if items.len() == arity => Ok(items[position].clone()),
            _ => Err(self.malformed_key(key)),
        }
    }

    fn malformed_key(&self, key: &Value) -> Error {
        Error::invalid_value(format!(
            "hollow reference key {key:?} does not fit column `{}`",
            self.name
        ))
    }

    fn not_instance_backed(&self) -> Error {
        Error::invalid_value(format!(
            "column `{}` is positional and has no value on an instance",
            self.name
        ))
    }
}

impl ColumnId {
    pub(crate) fn placeholder() -> Self {
        Self {
            table: TableId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl From<&Column> for ColumnId {
    fn from(value: &Column) -> Self {
        value.id
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({}/{})", self.table.0, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic() -> Column {
        Column::new(
            "name",
            "name",
            TypeId(0),
            Type::String,
            ColumnKind::Basic {
                path: Accessor::root().child("name", "String"),
            },
        )
    }

    #[test]
    fn set_table_once() {
        let mut column = basic();
        assert_eq!(column.table(), None);

        column.set_table(TableId(0)).unwrap();
        assert_eq!(column.table(), Some(TableId(0)));

        let err = column.set_table(TableId(1)).unwrap_err();
        assert!(err.is_illegal_state());
        assert_eq!(column.table(), Some(TableId(0)));
    }

    #[test]
    fn set_value_checks_type() {
        let mut person = Instance::new("Person");
        let err = basic().set_value(&mut person, Value::I64(1)).unwrap_err();
        assert!(err.is_invalid_value());
    }

    #[test]
    fn null_into_unset_attribute_is_noop() {
        let mut person = Instance::new("Person");
        basic().set_value(&mut person, Value::Null).unwrap();
        assert_eq!(person, Instance::new("Person"));
    }

    #[test]
    fn positional_columns_reject_instances() {
        let column = Column::new("tags_ORDER", "tags", TypeId(0), Type::I32, ColumnKind::Order);
        let mut person = Instance::new("Person");
        let err = column.set_value(&mut person, Value::I32(0)).unwrap_err();
        assert!(err.is_invalid_value());
    }
}
