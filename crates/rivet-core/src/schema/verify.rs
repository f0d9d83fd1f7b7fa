use super::{
    app::{AttributeId, TypeId},
    db::{ColumnId, TableId},
    mapping::{ElementMapping, Mapping, RootMapping},
    Metamodel,
};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    metamodel: &'a Metamodel,
}

impl Metamodel {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { metamodel: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        debug_assert!(self.verify_ids_populated());

        self.verify_columns_are_attached()?;
        self.verify_entity_tables_have_primary_keys()?;
        self.verify_table_names_are_unique()?;
        self.verify_every_entity_is_mapped()?;

        for root in self.metamodel.mapping.roots.values() {
            self.verify_root(root)?;
        }

        Ok(())
    }

    fn verify_ids_populated(&self) -> bool {
        for ty in self.metamodel.app.types() {
            assert_ne!(ty.id, TypeId::placeholder());

            for attribute in &ty.attributes {
                assert_ne!(attribute.id, AttributeId::placeholder());
                assert_ne!(attribute.target, TypeId::placeholder());
            }
        }

        for (index, table) in self.metamodel.db.tables.iter().enumerate() {
            assert_eq!(table.id, TableId(index));

            for column in &table.columns {
                assert_ne!(column.id, ColumnId::placeholder());
            }
        }

        true
    }

    fn verify_columns_are_attached(&self) -> Result<()> {
        for table in &self.metamodel.db.tables {
            for (index, column) in table.columns.iter().enumerate() {
                if column.table() != Some(table.id) || column.id.index != index {
                    return Err(Error::illegal_state(format!(
                        "column `{}` is not attached to table `{}`",
                        column.name, table.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_entity_tables_have_primary_keys(&self) -> Result<()> {
        for table in &self.metamodel.db.tables {
            if table.is_entity_table() && table.primary_key.is_empty() {
                return Err(Error::mapping(format!(
                    "table `{}` has no primary key",
                    table.name
                )));
            }
        }

        Ok(())
    }

    fn verify_table_names_are_unique(&self) -> Result<()> {
        let mut names = HashSet::new();

        for table in &self.metamodel.db.tables {
            let name = match &table.schema {
                Some(schema) => format!("{schema}.{}", table.name),
                None => table.name.clone(),
            };

            if !names.insert(name.to_ascii_lowercase()) {
                return Err(Error::mapping(format!("table `{name}` is mapped twice")));
            }
        }

        Ok(())
    }

    fn verify_every_entity_is_mapped(&self) -> Result<()> {
        for ty in self.metamodel.app.entities() {
            let Some(root) = self.metamodel.mapping.root(ty.id) else {
                return Err(Error::illegal_state(format!(
                    "entity `{}` has no mapping",
                    ty.class
                )));
            };

            if root.children.len() != ty.attributes.len() {
                return Err(Error::illegal_state(format!(
                    "entity `{}` has {} attributes but {} mapped",
                    ty.class,
                    ty.attributes.len(),
                    root.children.len()
                )));
            }
        }

        Ok(())
    }

    fn verify_root(&self, root: &RootMapping) -> Result<()> {
        for node in root.walk() {
            match node {
                Mapping::OwnedSingular(owned) => self.verify_owner(owned.owner)?,
                Mapping::OwnedOneToMany(owned) | Mapping::OwnedManyToMany(owned) => {
                    self.verify_owner(owned.owner)?
                }
                Mapping::OwnerOneToMany(plural) | Mapping::OwnerManyToMany(plural) => {
                    if let ElementMapping::Embeddable(element) = &plural.element {
                        self.verify_root(element)?;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn verify_owner(&self, owner: AttributeId) -> Result<()> {
        let attribute = self.metamodel.app.attribute(owner);

        if !attribute.is_owner() {
            return Err(Error::illegal_state(format!(
                "`{}` is referenced as an owning side but is not one",
                attribute.name
            )));
        }

        Ok(())
    }
}
