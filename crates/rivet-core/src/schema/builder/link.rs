use super::{
    overrides::{column_override, scoped, wrong_kind},
    parse::located,
    table::{resolve_join_columns, ColumnSpec, KeyColumn, TableSpec},
    Builder,
};
use crate::{
    decl::{FetchType, OverrideDecl, Overrides},
    schema::{
        app::{
            Attribute, AttributeId, AttributeKind, Cardinality, PersistentType, Registry, TypeId,
            TypeKind,
        },
        db::{self, Accessor, ColumnId, ColumnKind, Table, TableId, TableKind},
        mapping::{
            BasicMapping, ElementMapping, MapKeyMapping, Mapping, MappingKind, Mappings,
            OwnedPluralMapping, OwnedSingularMapping, OwnerPluralMapping, OwnerSingularMapping,
            ParentMapping, RootKind, RootMapping,
        },
    },
    value::Type,
    Error, Result,
};
use indexmap::IndexMap;
use tracing::trace;

/// Links every entity attribute to a mapping node and its columns.
pub(super) struct Link<'a> {
    pub(super) builder: &'a Builder,

    pub(super) app: &'a Registry,

    /// Tables as they are built
    pub(super) tables: Vec<Table>,

    /// Maps lowercased, schema-qualified table names to identifiers
    pub(super) table_lookup: IndexMap<String, TableId>,

    /// Key columns of each entity, in key order
    keys: IndexMap<TypeId, Vec<KeyColumn>>,

    mapping: Mappings,
}

/// Where an attribute is being linked.
#[derive(Debug, Clone)]
struct Site {
    /// The entity at the root of the tree
    entity: TypeId,

    /// The type of the instances the site's accessors start from: the
    /// entity, or the element type inside an element collection
    owner: TypeId,

    /// Table receiving basic and join columns
    table: TableId,

    /// Dotted path of the enclosing embedded attributes
    prefix: String,

    accessor: Accessor,

    /// True inside the elements of an element collection
    in_element: bool,

    /// Embeddables entered on the way here
    embedding: Vec<TypeId>,
}

impl<'a> Link<'a> {
    pub(super) fn new(builder: &'a Builder, app: &'a Registry) -> Self {
        Self {
            builder,
            app,
            tables: vec![],
            table_lookup: IndexMap::new(),
            keys: IndexMap::new(),
            mapping: Mappings::default(),
        }
    }

    pub(super) fn link(mut self) -> Result<(db::Schema, Mappings)> {
        let entities: Vec<TypeId> = self.app.entities().map(|ty| ty.id).collect();

        // Tables and keys first, so associations can reference any entity.
        for &id in &entities {
            self.link_keys(id)?;
        }

        for &id in &entities {
            self.link_entity(id)?;
        }

        Ok((db::Schema { tables: self.tables }, self.mapping))
    }

    /// Creates an entity's table and primary key columns.
    fn link_keys(&mut self, id: TypeId) -> Result<()> {
        let app = self.app;
        let ty = app.ty(id);
        let decl = ty.table.as_ref();

        let table = self.create_table(TableSpec {
            name: match decl.and_then(|decl| decl.name.as_ref()) {
                Some(name) => self.builder.prefix_table_name(name),
                None => self.builder.generated_table_name(&ty.name),
            },
            schema: decl.and_then(|decl| decl.schema.as_ref()),
            kind: TableKind::Entity(id),
            unique_constraints: decl.map(|decl| &decl.unique_constraints[..]).unwrap_or_default(),
            locator: ty.locator.as_ref(),
        })?;

        let mut keys = vec![];

        for attribute in ty.identifiers() {
            let decl = column_override(ty.overrides.get(&attribute.name), &attribute.name)?
                .or(attribute.columns.first());
            let value_ty = self.value_type(attribute.target)?;
            let accessor = Accessor::root().child(&attribute.name, &attribute.ty.class);

            let mut column = db::Column::new(
                match decl.and_then(|decl| decl.name.as_ref()) {
                    Some(name) => name.clone(),
                    None => self.builder.generated_column_name(&attribute.name),
                },
                attribute.name.clone(),
                id,
                value_ty,
                ColumnKind::Basic {
                    path: accessor.clone(),
                },
            );
            if let Some(decl) = decl {
                column = column.with_decl(decl);
            }

            let name = column.name.clone();
            let column = self.tables[table.0]
                .add_primary_key_column(column)
                .map_err(|err| located(err, attribute.locator.as_ref()))?;

            keys.push(KeyColumn {
                attribute: attribute.id,
                column,
                name,
                ty: value_ty,
                accessor,
            });
        }

        self.keys.insert(id, keys);
        self.mapping
            .roots
            .insert(id, RootMapping::new(id, table, RootKind::Entity));

        Ok(())
    }

    fn link_entity(&mut self, id: TypeId) -> Result<()> {
        let app = self.app;
        let ty = app.ty(id);
        let table = self.root(id)?.table;

        self.check_overrides(ty, &ty.overrides, ty.class.as_str())?;

        let site = Site {
            entity: id,
            owner: id,
            table,
            prefix: String::new(),
            accessor: Accessor::root(),
            in_element: false,
            embedding: vec![],
        };

        let children = self.link_attributes(&site, ty, &ty.overrides)?;

        if let Some(root) = self.mapping.roots.get_mut(&id) {
            root.children = children;
        }

        Ok(())
    }

    fn link_attributes(
        &mut self,
        site: &Site,
        ty: &'a PersistentType,
        overrides: &Overrides,
    ) -> Result<IndexMap<String, Mapping>> {
        let mut children = IndexMap::with_capacity(ty.attributes.len());

        for attribute in &ty.attributes {
            let node = self
                .link_attribute(site, attribute, overrides)
                .map_err(|err| located(err, attribute.locator.as_ref()))?;
            children.insert(attribute.name.clone(), node);
        }

        Ok(children)
    }

    /// Links one attribute at `site`, producing its mapping node.
    fn link_attribute(
        &mut self,
        site: &Site,
        attribute: &'a Attribute,
        overrides: &Overrides,
    ) -> Result<Mapping> {
        let path = site.path(&attribute.name);
        let kind = MappingKind::select(attribute);

        if site.in_element
            && (attribute.is_plural() || (attribute.is_association() && !kind.is_owner()))
        {
            return Err(Error::mapping(format!(
                "`{}` cannot be used inside the elements of an element collection",
                self.qualified(attribute)
            )));
        }

        let decl = overrides.get(&attribute.name);

        let node = match kind {
            MappingKind::Basic => self.link_basic(site, attribute, path, decl)?,
            MappingKind::Parent => self.link_embedded(site, attribute, path, overrides)?,
            MappingKind::OwnerSingular => self.link_owner_singular(site, attribute, path, decl)?,
            MappingKind::OwnedSingular => {
                reject_override(decl, &path, "the inverse side of an association")?;
                Mapping::OwnedSingular(OwnedSingularMapping {
                    attribute: attribute.id,
                    target: attribute.target,
                    owner: self.resolve_owner(site, attribute)?,
                    orphan_removal: attribute.orphan_removal,
                    eager: attribute.fetch == FetchType::Eager,
                    path,
                })
            }
            MappingKind::OwnerOneToMany => {
                Mapping::OwnerOneToMany(self.link_owner_plural(site, attribute, path, overrides)?)
            }
            MappingKind::OwnerManyToMany => {
                Mapping::OwnerManyToMany(self.link_owner_plural(site, attribute, path, overrides)?)
            }
            MappingKind::OwnedOneToMany | MappingKind::OwnedManyToMany => {
                reject_override(decl, &path, "the inverse side of an association")?;
                let owned = OwnedPluralMapping {
                    attribute: attribute.id,
                    target: attribute.target,
                    owner: self.resolve_owner(site, attribute)?,
                    orphan_removal: attribute.orphan_removal,
                    eager: attribute.fetch == FetchType::Eager,
                    path,
                };
                if kind == MappingKind::OwnedOneToMany {
                    Mapping::OwnedOneToMany(owned)
                } else {
                    Mapping::OwnedManyToMany(owned)
                }
            }
        };

        trace!(
            attribute = %self.qualified(attribute),
            path = %node.path(),
            kind = ?kind,
            "linked attribute"
        );

        Ok(node)
    }

    fn link_basic(
        &mut self,
        site: &Site,
        attribute: &'a Attribute,
        path: String,
        decl: Option<&OverrideDecl>,
    ) -> Result<Mapping> {
        if attribute.identifier && site.is_entity_root() {
            // Created with the table
            let column = self.key_column(site.entity, attribute.id)?;
            return Ok(Mapping::Basic(BasicMapping {
                attribute: attribute.id,
                path,
                column,
                identifier: true,
            }));
        }

        let column_decl = column_override(decl, &path)?.or(attribute.columns.first());

        let column = self.add_column(
            site.table,
            ColumnSpec {
                default_name: attribute.name.clone(),
                mapping_name: path.clone(),
                owner: site.owner,
                ty: self.value_type(attribute.target)?,
                decl: column_decl,
                kind: ColumnKind::Basic {
                    path: site.accessor.child(&attribute.name, &attribute.ty.class),
                },
            },
        )?;

        Ok(Mapping::Basic(BasicMapping {
            attribute: attribute.id,
            path,
            column,
            identifier: false,
        }))
    }

    fn link_embedded(
        &mut self,
        site: &Site,
        attribute: &'a Attribute,
        path: String,
        overrides: &Overrides,
    ) -> Result<Mapping> {
        reject_override(overrides.get(&attribute.name), &path, "an embedded attribute")?;

        let app = self.app;
        let embeddable = app.ty(attribute.target);

        if site.embedding.contains(&embeddable.id) {
            return Err(Error::mapping(format!(
                "embeddable `{}` embeds itself through `{path}`",
                embeddable.class
            )));
        }

        let overrides = scoped(overrides, &attribute.name, &attribute.overrides);
        self.check_overrides(embeddable, &overrides, &path)?;

        let site = site.embed(&attribute.name, embeddable);
        let children = self.link_attributes(&site, embeddable, &overrides)?;

        Ok(Mapping::Parent(ParentMapping {
            attribute: attribute.id,
            path,
            ty: embeddable.id,
            children,
        }))
    }

    fn link_owner_singular(
        &mut self,
        site: &Site,
        attribute: &'a Attribute,
        path: String,
        decl: Option<&OverrideDecl>,
    ) -> Result<Mapping> {
        let decls = match decl {
            None => &attribute.join_columns[..],
            Some(OverrideDecl::JoinColumns(columns)) => &columns[..],
            Some(decl) => return Err(wrong_kind(decl, &path, "an association")),
        };

        let app = self.app;
        let target = app.ty(attribute.target);
        let keys = self.keys_of(target.id)?;
        let resolved = resolve_join_columns(decls, &keys, &path)?;

        let reference = site.accessor.child(&attribute.name, &target.class);
        let key_paths: Vec<Accessor> = keys.iter().map(|key| key.accessor.clone()).collect();

        let mut columns = Vec::with_capacity(keys.len());

        for (position, (key, decl)) in keys.iter().zip(resolved).enumerate() {
            columns.push(self.add_column(
                site.table,
                ColumnSpec {
                    default_name: format!("{}_{}", attribute.name, key.name),
                    mapping_name: path.clone(),
                    owner: site.owner,
                    ty: key.ty,
                    decl: decl.map(|decl| &decl.column),
                    kind: ColumnKind::Join {
                        reference: reference.clone(),
                        target: target.class.clone(),
                        keys: key_paths.clone(),
                        position,
                    },
                },
            )?);
        }

        Ok(Mapping::OwnerSingular(OwnerSingularMapping {
            attribute: attribute.id,
            path,
            target: target.id,
            columns,
        }))
    }

    fn link_owner_plural(
        &mut self,
        site: &Site,
        attribute: &'a Attribute,
        path: String,
        overrides: &Overrides,
    ) -> Result<OwnerPluralMapping> {
        let Some(plural) = attribute.plural.as_ref() else {
            return Err(Error::illegal_state(format!(
                "`{}` is not plural",
                self.qualified(attribute)
            )));
        };

        let app = self.app;
        let entity = app.ty(site.entity);
        let owner_keys = self.keys_of(site.entity)?;
        let decl = overrides.get(&attribute.name);

        let (table, owner_columns, element) = match attribute.kind {
            AttributeKind::Basic | AttributeKind::Embedded => {
                let collection_table = plural.collection_table.as_ref();

                let table = self.create_table(TableSpec {
                    name: match collection_table.and_then(|decl| decl.name.as_ref()) {
                        Some(name) => self.builder.prefix_table_name(name),
                        None => self
                            .builder
                            .generated_table_name(&format!("{}_{}", entity.name, attribute.name)),
                    },
                    schema: collection_table.and_then(|decl| decl.schema.as_ref()),
                    kind: TableKind::Collection(attribute.id),
                    unique_constraints: collection_table
                        .map(|decl| &decl.unique_constraints[..])
                        .unwrap_or_default(),
                    locator: attribute.locator.as_ref(),
                })?;

                let owner_columns = self.key_columns(
                    table,
                    &owner_keys,
                    collection_table
                        .map(|decl| &decl.join_columns[..])
                        .unwrap_or_default(),
                    site.entity,
                    &path,
                    |key| format!("{}_{}", entity.name, key.name),
                )?;

                let element = if attribute.kind == AttributeKind::Basic {
                    let column_decl = column_override(decl, &path)?.or(attribute.columns.first());
                    ElementMapping::Basic {
                        column: self.add_column(
                            table,
                            ColumnSpec {
                                default_name: attribute.name.clone(),
                                mapping_name: path.clone(),
                                owner: attribute.target,
                                ty: self.value_type(attribute.target)?,
                                decl: column_decl,
                                kind: ColumnKind::ElementValue,
                            },
                        )?,
                    }
                } else {
                    reject_override(decl, &path, "an element collection of embeddables")?;
                    ElementMapping::Embeddable(Box::new(
                        self.link_element_root(site, attribute, table, overrides)?,
                    ))
                };

                (table, owner_columns, element)
            }
            AttributeKind::Association(cardinality) => {
                reject_override(decl, &path, "a plural association")?;

                let target = app.ty(attribute.target);
                let target_keys = self.keys_of(target.id)?;

                if cardinality == Cardinality::OneToMany
                    && attribute.join_table.is_none()
                    && !attribute.join_columns.is_empty()
                {
                    // The target's table holds the owner's key.
                    let table = self.root(target.id)?.table;
                    let owner_columns = self.key_columns(
                        table,
                        &owner_keys,
                        &attribute.join_columns,
                        site.entity,
                        &path,
                        |key| format!("{}_{}", attribute.name, key.name),
                    )?;

                    let element = ElementMapping::Entity {
                        target: target.id,
                        columns: vec![],
                    };

                    (table, owner_columns, element)
                } else {
                    let join_table = attribute.join_table.as_ref();

                    let table = self.create_table(TableSpec {
                        name: match join_table.and_then(|decl| decl.name.as_ref()) {
                            Some(name) => self.builder.prefix_table_name(name),
                            None => self
                                .builder
                                .generated_table_name(&format!("{}_{}", entity.name, target.name)),
                        },
                        schema: join_table.and_then(|decl| decl.schema.as_ref()),
                        kind: TableKind::Join(attribute.id),
                        unique_constraints: join_table
                            .map(|decl| &decl.unique_constraints[..])
                            .unwrap_or_default(),
                        locator: attribute.locator.as_ref(),
                    })?;

                    let owner_columns = self.key_columns(
                        table,
                        &owner_keys,
                        join_table
                            .map(|decl| &decl.join_columns[..])
                            .unwrap_or_default(),
                        site.entity,
                        &path,
                        |key| format!("{}_{}", entity.name, key.name),
                    )?;

                    let columns = self.key_columns(
                        table,
                        &target_keys,
                        join_table
                            .map(|decl| &decl.inverse_join_columns[..])
                            .unwrap_or_default(),
                        target.id,
                        &path,
                        |key| format!("{}_{}", attribute.name, key.name),
                    )?;

                    let element = ElementMapping::Entity {
                        target: target.id,
                        columns,
                    };

                    (table, owner_columns, element)
                }
            }
        };

        let map_key = self.link_map_key(attribute, table, &path)?;

        let order_column = match &plural.order_column {
            Some(decl) => Some(self.add_column(
                table,
                ColumnSpec {
                    default_name: format!("{}_ORDER", attribute.name),
                    mapping_name: path.clone(),
                    owner: site.entity,
                    ty: Type::I32,
                    decl: Some(decl),
                    kind: ColumnKind::Order,
                },
            )?),
            None => None,
        };

        Ok(OwnerPluralMapping {
            attribute: attribute.id,
            path,
            table,
            owner_columns,
            element,
            map_key,
            order_column,
        })
    }

    /// Maps the attributes of an embeddable element type over the
    /// collection table.
    fn link_element_root(
        &mut self,
        site: &Site,
        attribute: &'a Attribute,
        table: TableId,
        overrides: &Overrides,
    ) -> Result<RootMapping> {
        let app = self.app;
        let element = app.ty(attribute.target);

        let overrides = scoped(overrides, &attribute.name, &attribute.overrides);
        self.check_overrides(element, &overrides, &site.path(&attribute.name))?;

        let element_site = Site {
            entity: site.entity,
            owner: element.id,
            table,
            prefix: String::new(),
            accessor: Accessor::root(),
            in_element: true,
            embedding: vec![element.id],
        };

        let mut root = RootMapping::new(
            element.id,
            table,
            RootKind::Element {
                collection: attribute.id,
            },
        );
        root.children = self.link_attributes(&element_site, element, &overrides)?;

        Ok(root)
    }

    fn link_map_key(
        &mut self,
        attribute: &'a Attribute,
        table: TableId,
        path: &str,
    ) -> Result<Option<MapKeyMapping>> {
        let Some(map_key) = attribute.plural.as_ref().and_then(|p| p.map_key.as_ref()) else {
            return Ok(None);
        };

        let app = self.app;

        if let Some(name) = &map_key.attribute {
            let element = app.ty(attribute.target);
            if element.attribute(name).is_none() {
                return Err(Error::mapping(format!(
                    "map key of `{}` names `{name}`, which is not an attribute of `{}`",
                    self.qualified(attribute),
                    element.class
                )));
            }
            return Ok(Some(MapKeyMapping::Attribute(name.clone())));
        }

        let Some(class) = &map_key.class else {
            return Err(Error::illegal_state(format!(
                "map key class of `{}` is unresolved",
                self.qualified(attribute)
            )));
        };

        let key_ty = app.get_type(class)?;
        let default_name = format!("{}_KEY", attribute.name);

        let columns = match key_ty.kind {
            TypeKind::Basic(ty) => vec![self.add_column(
                table,
                ColumnSpec {
                    default_name,
                    mapping_name: path.to_string(),
                    owner: key_ty.id,
                    ty,
                    decl: map_key.column.as_ref(),
                    kind: ColumnKind::MapKey,
                },
            )?],
            TypeKind::Entity => {
                let keys = self.keys_of(key_ty.id)?;
                let single = keys.len() == 1;
                let mut columns = Vec::with_capacity(keys.len());

                for key in &keys {
                    columns.push(self.add_column(
                        table,
                        ColumnSpec {
                            default_name: if single {
                                default_name.clone()
                            } else {
                                format!("{default_name}_{}", key.name)
                            },
                            mapping_name: path.to_string(),
                            owner: key_ty.id,
                            ty: key.ty,
                            decl: map_key.column.as_ref().filter(|_| single),
                            kind: ColumnKind::MapKey,
                        },
                    )?);
                }

                columns
            }
            TypeKind::Embeddable => {
                self.check_overrides(key_ty, &map_key.overrides, path)?;

                let mut leaves = vec![];
                self.basic_leaves(key_ty, "", &mut vec![], &mut leaves)?;

                let mut columns = Vec::with_capacity(leaves.len());
                for (leaf_path, leaf) in leaves {
                    let decl = column_override(map_key.overrides.get(&leaf_path), &leaf_path)?;
                    columns.push(self.add_column(
                        table,
                        ColumnSpec {
                            default_name: leaf.name.clone(),
                            mapping_name: format!("{path}.{leaf_path}"),
                            owner: key_ty.id,
                            ty: self.value_type(leaf.target)?,
                            decl,
                            kind: ColumnKind::MapKey,
                        },
                    )?);
                }

                columns
            }
            TypeKind::MappedSuperclass => {
                return Err(Error::mapping(format!(
                    "map key of `{}` cannot be a mapped superclass",
                    self.qualified(attribute)
                )))
            }
        };

        Ok(Some(MapKeyMapping::Columns(columns)))
    }

    /// Collects the basic attributes of an embeddable, descending into
    /// nested embeddables.
    fn basic_leaves(
        &self,
        ty: &'a PersistentType,
        prefix: &str,
        stack: &mut Vec<TypeId>,
        leaves: &mut Vec<(String, &'a Attribute)>,
    ) -> Result<()> {
        if stack.contains(&ty.id) {
            return Err(Error::mapping(format!("embeddable `{}` embeds itself", ty.class)));
        }
        stack.push(ty.id);

        for attribute in &ty.attributes {
            let path = if prefix.is_empty() {
                attribute.name.clone()
            } else {
                format!("{prefix}.{}", attribute.name)
            };

            match (attribute.kind, attribute.is_plural()) {
                (AttributeKind::Basic, false) => leaves.push((path, attribute)),
                (AttributeKind::Embedded, false) => {
                    self.basic_leaves(self.app.ty(attribute.target), &path, stack, leaves)?
                }
                _ => {
                    return Err(Error::mapping(format!(
                        "`{}` cannot be part of a map key",
                        self.qualified(attribute)
                    )))
                }
            }
        }

        stack.pop();
        Ok(())
    }

    /// Finds and validates the owning side of an inverse association.
    fn resolve_owner(&self, site: &Site, attribute: &'a Attribute) -> Result<AttributeId> {
        let app = self.app;
        let target = app.ty(attribute.target);
        let mapped_by = attribute.mapped_by.as_deref().unwrap_or_default();
        let qualified = self.qualified(attribute);

        let Some(owner) = target.attribute(mapped_by) else {
            return Err(Error::mapping(format!(
                "`{qualified}` is mapped by `{}::{mapped_by}`, which does not exist",
                target.class
            )));
        };

        if !owner.is_owner() {
            return Err(Error::mapping(format!(
                "`{qualified}` is mapped by `{}::{mapped_by}`, which is not the owning side \
                 of an association",
                target.class
            )));
        }

        if !app.is_assignable(site.entity, owner.target) {
            return Err(Error::mapping(format!(
                "`{qualified}` is mapped by `{}::{mapped_by}`, which does not reference `{}`",
                target.class,
                app.ty(site.entity).class
            )));
        }

        let expected = match attribute.cardinality() {
            Some(Cardinality::OneToOne) => Cardinality::OneToOne,
            Some(Cardinality::OneToMany) => Cardinality::ManyToOne,
            Some(Cardinality::ManyToMany) => Cardinality::ManyToMany,
            Some(Cardinality::ManyToOne) | None => Cardinality::OneToMany,
        };

        if owner.cardinality() != Some(expected) {
            return Err(Error::mapping(format!(
                "`{qualified}` is mapped by `{}::{mapped_by}`, which is {} but {} is required",
                target.class,
                owner.cardinality().map_or("not an association", Cardinality::name),
                expected.name()
            )));
        }

        Ok(owner.id)
    }

    fn root(&self, id: TypeId) -> Result<&RootMapping> {
        self.mapping.roots.get(&id).ok_or_else(|| {
            Error::illegal_state(format!("`{}` has no table", self.app.ty(id).class))
        })
    }

    fn keys_of(&self, id: TypeId) -> Result<Vec<KeyColumn>> {
        self.keys.get(&id).cloned().ok_or_else(|| {
            Error::illegal_state(format!("`{}` has no key columns", self.app.ty(id).class))
        })
    }

    fn key_column(&self, entity: TypeId, attribute: AttributeId) -> Result<ColumnId> {
        self.keys_of(entity)?
            .into_iter()
            .find(|key| key.attribute == attribute)
            .map(|key| key.column)
            .ok_or_else(|| Error::illegal_state("identifier column missing"))
    }

    /// `Class::attribute`, naming the type the attribute was linked for.
    fn qualified(&self, attribute: &Attribute) -> String {
        format!("{}::{}", self.app.ty(attribute.id.ty).class, attribute.name)
    }
}

impl Site {
    fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.prefix)
        }
    }

    fn is_entity_root(&self) -> bool {
        self.prefix.is_empty() && !self.in_element
    }

    /// The site of the attributes of an embedded value.
    fn embed(&self, name: &str, embeddable: &PersistentType) -> Site {
        let mut embedding = self.embedding.clone();
        embedding.push(embeddable.id);

        Site {
            prefix: self.path(name),
            accessor: self.accessor.child(name, &embeddable.class),
            embedding,
            ..self.clone()
        }
    }
}

fn reject_override(decl: Option<&OverrideDecl>, path: &str, target: &str) -> Result<()> {
    match decl {
        Some(decl) => Err(wrong_kind(decl, path, target)),
        None => Ok(()),
    }
}
