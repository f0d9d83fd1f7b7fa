use super::registry::BuildRegistry;
use crate::{
    decl::{
        AssociationMarker, AttributeDecl, CascadeSet, ClassName, CollectionKind, FetchType, Marker,
    },
    schema::app::{
        Attribute, AttributeId, AttributeKind, Cardinality, LinkState, Plural, TypeId, TypeKind,
    },
    Error, Result,
};
use tracing::{debug, trace};

/// State of one attribute being parsed.
struct ParseAttribute<'d> {
    decl: &'d AttributeDecl,

    /// `Class::attribute`, for error messages
    qualified: String,
}

impl BuildRegistry<'_> {
    pub(super) fn parse_type(&mut self, id: TypeId) -> Result<()> {
        let Some(decl) = self.decl(id) else {
            // Basic types have nothing to parse
            return Ok(());
        };

        if let Some(supertype) = &decl.supertype {
            let supertype = self.get_type(supertype).map_err(|err| {
                located(
                    err.context(Error::mapping(format!(
                        "supertype `{supertype}` of `{}` cannot be resolved",
                        decl.class
                    ))),
                    decl.locator.as_ref(),
                )
            })?;
            self.registry.ty_mut(id).supertype = Some(supertype);
        }

        let mut attributes: Vec<Attribute> = Vec::with_capacity(decl.attributes.len());

        for (index, attribute) in decl.attributes.iter().enumerate() {
            if attributes.iter().any(|a| a.name == attribute.name) {
                return Err(located(
                    Error::mapping(format!(
                        "attribute `{}::{}` is declared twice",
                        decl.class, attribute.name
                    )),
                    attribute.locator.as_ref(),
                ));
            }

            let cx = ParseAttribute {
                decl: attribute,
                qualified: format!("{}::{}", decl.class, attribute.name),
            };

            let attribute = self
                .parse_attribute(&cx, AttributeId { ty: id, index })
                .map_err(|err| located(err, attribute.locator.as_ref()))?;

            trace!(
                attribute = %cx.qualified,
                kind = ?attribute.kind,
                plural = attribute.is_plural(),
                "parsed attribute"
            );

            attributes.push(attribute);
        }

        debug!(class = %decl.class, attributes = attributes.len(), "parsed persistent type");

        self.registry.ty_mut(id).attributes = attributes;
        Ok(())
    }

    fn parse_attribute(&mut self, cx: &ParseAttribute<'_>, id: AttributeId) -> Result<Attribute> {
        let decl = cx.decl;

        let mut attribute = Attribute {
            id,
            name: decl.name.clone(),
            ty: decl.ty.clone(),
            kind: AttributeKind::Basic,
            identifier: decl.id,
            target: TypeId::placeholder(),
            declared_by: id.ty,
            plural: None,
            fetch: FetchType::Eager,
            cascade: CascadeSet::empty(),
            mapped_by: None,
            orphan_removal: false,
            columns: decl.columns.clone(),
            join_columns: decl.join_columns.clone(),
            join_table: decl.join_table.clone(),
            overrides: decl.overrides.clone(),
            locator: decl.locator.clone(),
            state: LinkState::Parsed,
        };

        match cx.marker()? {
            None => self.infer_kind(cx, &mut attribute)?,
            Some(Marker::Basic { fetch }) => {
                cx.require_singular("basic")?;
                let (target, kind) = self.resolve(cx, &decl.ty.class)?;
                if !matches!(kind, TypeKind::Basic(_)) {
                    return Err(cx.wrong_target("basic", &decl.ty.class, kind));
                }
                attribute.target = target;
                attribute.fetch = fetch.unwrap_or(FetchType::Eager);
            }
            Some(Marker::Embedded) => {
                cx.require_singular("embedded")?;
                let (target, kind) = self.resolve(cx, &decl.ty.class)?;
                if kind != TypeKind::Embeddable {
                    return Err(cx.wrong_target("embedded", &decl.ty.class, kind));
                }
                attribute.kind = AttributeKind::Embedded;
                attribute.target = target;
            }
            Some(Marker::ElementCollection { target, fetch }) => {
                cx.require_plural("element-collection")?;
                let class = target.as_ref().unwrap_or(&decl.ty.class);
                let (target, kind) = self.resolve(cx, class)?;
                attribute.kind = match kind {
                    TypeKind::Basic(_) => AttributeKind::Basic,
                    TypeKind::Embeddable => AttributeKind::Embedded,
                    _ => return Err(cx.wrong_target("element-collection", class, kind)),
                };
                attribute.target = target;
                attribute.fetch = fetch.unwrap_or(FetchType::Lazy);
                // Elements are owned by the collection
                attribute.orphan_removal = true;
                attribute.cascade = CascadeSet::all();
            }
            Some(Marker::OneToMany(marker)) => {
                self.parse_association(cx, &mut attribute, Cardinality::OneToMany, marker)?
            }
            Some(Marker::ManyToMany(marker)) => {
                self.parse_association(cx, &mut attribute, Cardinality::ManyToMany, marker)?
            }
            Some(Marker::ManyToOne(marker)) => {
                self.parse_association(cx, &mut attribute, Cardinality::ManyToOne, marker)?
            }
            Some(Marker::OneToOne(marker)) => {
                self.parse_association(cx, &mut attribute, Cardinality::OneToOne, marker)?
            }
        }

        attribute.plural = self.parse_plural(cx, &attribute)?;
        cx.check_consistency(&attribute)?;

        Ok(attribute)
    }

    /// Infers the kind of an attribute without a marker from its type.
    fn infer_kind(&mut self, cx: &ParseAttribute<'_>, attribute: &mut Attribute) -> Result<()> {
        let class = &cx.decl.ty.class;

        if cx.decl.ty.is_plural() {
            return Err(Error::mapping(format!(
                "collection-valued attribute `{}` must be declared as an element collection \
                 or a plural association",
                cx.qualified
            )));
        }

        let (target, kind) = self.resolve(cx, class)?;

        attribute.kind = match kind {
            TypeKind::Basic(_) => AttributeKind::Basic,
            TypeKind::Embeddable => AttributeKind::Embedded,
            TypeKind::Entity => {
                return Err(Error::mapping(format!(
                    "attribute `{}` references entity `{class}` and must declare its cardinality",
                    cx.qualified
                )))
            }
            TypeKind::MappedSuperclass => {
                return Err(cx.wrong_target("basic", class, kind));
            }
        };
        attribute.target = target;

        Ok(())
    }

    fn parse_association(
        &mut self,
        cx: &ParseAttribute<'_>,
        attribute: &mut Attribute,
        cardinality: Cardinality,
        marker: &AssociationMarker,
    ) -> Result<()> {
        let name = cardinality.name();

        if cardinality.is_plural() {
            cx.require_plural(name)?;
        } else {
            cx.require_singular(name)?;
        }

        let class = marker.target.as_ref().unwrap_or(&cx.decl.ty.class);
        let (target, kind) = self.resolve(cx, class)?;
        if kind != TypeKind::Entity {
            return Err(cx.wrong_target(name, class, kind));
        }

        let mapped_by = marker.mapped_by.trim();
        if !mapped_by.is_empty() {
            if cardinality == Cardinality::ManyToOne {
                return Err(Error::mapping(format!(
                    "many-to-one attribute `{}` cannot declare mapped-by; \
                     the many side always owns the association",
                    cx.qualified
                )));
            }
            attribute.mapped_by = Some(mapped_by.to_string());
        }

        attribute.kind = AttributeKind::Association(cardinality);
        attribute.target = target;
        attribute.cascade = marker.cascade;
        attribute.orphan_removal = marker.orphan_removal;
        attribute.fetch = marker.fetch.unwrap_or(if cardinality.is_plural() {
            FetchType::Lazy
        } else {
            FetchType::Eager
        });

        Ok(())
    }

    fn parse_plural(
        &mut self,
        cx: &ParseAttribute<'_>,
        attribute: &Attribute,
    ) -> Result<Option<Plural>> {
        let decl = cx.decl;

        let Some(collection) = decl.ty.collection else {
            for (present, what) in [
                (decl.map_key.is_some(), "map-key"),
                (decl.order_by.is_some(), "order-by"),
                (decl.order_column.is_some(), "order-column"),
                (decl.collection_table.is_some(), "collection-table"),
                (decl.join_table.is_some(), "join-table"),
            ] {
                if present {
                    return Err(Error::mapping(format!(
                        "singular attribute `{}` cannot declare {what}",
                        cx.qualified
                    )));
                }
            }
            return Ok(None);
        };

        let map_key = if collection == CollectionKind::Map {
            let mut map_key = decl.map_key.clone().unwrap_or_default();
            let Some(class) = map_key.class.clone().or_else(|| decl.ty.key.clone()) else {
                return Err(Error::mapping(format!(
                    "map attribute `{}` declares no key type",
                    cx.qualified
                )));
            };
            let (_, kind) = self.resolve(cx, &class)?;
            if kind == TypeKind::MappedSuperclass {
                return Err(cx.wrong_target("map-key", &class, kind));
            }
            map_key.class = Some(class);
            Some(map_key)
        } else if decl.map_key.is_some() {
            return Err(Error::mapping(format!(
                "attribute `{}` is not a map and cannot declare map-key",
                cx.qualified
            )));
        } else {
            None
        };

        if decl.order_by.is_some() && decl.order_column.is_some() {
            return Err(Error::mapping(format!(
                "attribute `{}` declares both order-by and order-column",
                cx.qualified
            )));
        }

        if decl.order_column.is_some() && collection != CollectionKind::List {
            return Err(Error::mapping(format!(
                "attribute `{}` declares an order-column but is not a list",
                cx.qualified
            )));
        }

        if decl.collection_table.is_some() && attribute.is_association() {
            return Err(Error::mapping(format!(
                "association `{}` cannot declare a collection-table; use join-table",
                cx.qualified
            )));
        }

        Ok(Some(Plural {
            collection,
            collection_table: decl.collection_table.clone(),
            map_key,
            order_by: decl.order_by.clone(),
            order_column: decl.order_column.clone(),
        }))
    }

    /// Resolves the type of a referenced class.
    fn resolve(
        &mut self,
        cx: &ParseAttribute<'_>,
        class: &ClassName,
    ) -> Result<(TypeId, TypeKind)> {
        let id = self.get_type(class).map_err(|err| {
            err.context(Error::mapping(format!(
                "attribute `{}` references `{class}`",
                cx.qualified
            )))
        })?;
        Ok((id, self.registry.ty(id).kind))
    }
}

impl ParseAttribute<'_> {
    /// Returns the attribute's kind marker, or `None` if it has none.
    ///
    /// Markers are considered in a fixed precedence. Kind markers are
    /// mutually exclusive, so a second one makes the mapping ambiguous.
    fn marker(&self) -> Result<Option<&Marker>> {
        let mut markers: Vec<&Marker> = self.decl.markers.iter().collect();
        markers.sort_by_key(|marker| precedence(marker));

        match markers[..] {
            [] => Ok(None),
            [marker] => Ok(Some(marker)),
            [first, second, ..] => Err(Error::ambiguous_mapping(
                self.qualified.clone(),
                first.name(),
                second.name(),
                None,
            )),
        }
    }

    fn require_plural(&self, marker: &str) -> Result<()> {
        if self.decl.ty.is_plural() {
            return Ok(());
        }
        Err(Error::mapping(format!(
            "attribute `{}` is marked {marker} but its type `{}` is not a collection",
            self.qualified, self.decl.ty.class
        )))
    }

    fn require_singular(&self, marker: &str) -> Result<()> {
        if !self.decl.ty.is_plural() {
            return Ok(());
        }
        Err(Error::mapping(format!(
            "attribute `{}` is marked {marker} but its type is a collection",
            self.qualified
        )))
    }

    fn wrong_target(&self, marker: &str, class: &ClassName, kind: TypeKind) -> Error {
        Error::mapping(format!(
            "attribute `{}` is marked {marker} but `{class}` is {}",
            self.qualified,
            kind.describe()
        ))
    }

    /// Checks declarations that only make sense for some kinds of attribute.
    fn check_consistency(&self, attribute: &Attribute) -> Result<()> {
        let decl = self.decl;

        if attribute.identifier && (attribute.kind != AttributeKind::Basic || attribute.is_plural())
        {
            return Err(Error::mapping(format!(
                "identifier attribute `{}` must be a basic attribute",
                self.qualified
            )));
        }

        if attribute.is_association() {
            if !decl.columns.is_empty() {
                return Err(Error::mapping(format!(
                    "association `{}` cannot declare columns; use join columns",
                    self.qualified
                )));
            }
            if attribute.mapped_by.is_some()
                && (!decl.join_columns.is_empty() || decl.join_table.is_some())
            {
                return Err(Error::mapping(format!(
                    "inverse side `{}` cannot declare join columns or a join table",
                    self.qualified
                )));
            }
            if !decl.join_columns.is_empty() {
                if decl.join_table.is_some() {
                    return Err(Error::mapping(format!(
                        "association `{}` declares both join columns and a join table; \
                         declare the owner columns on the join table",
                        self.qualified
                    )));
                }
                if attribute.cardinality() == Some(Cardinality::ManyToMany) {
                    return Err(Error::mapping(format!(
                        "many-to-many `{}` cannot declare join columns; declare them on its \
                         join table",
                        self.qualified
                    )));
                }
            }
        } else if !decl.join_columns.is_empty() || decl.join_table.is_some() {
            return Err(Error::mapping(format!(
                "attribute `{}` is not an association and cannot declare join columns \
                 or a join table",
                self.qualified
            )));
        }

        if attribute.kind == AttributeKind::Basic && !attribute.is_plural() {
            if decl.columns.len() > 1 {
                return Err(Error::mapping(format!(
                    "basic attribute `{}` declares {} columns",
                    self.qualified,
                    decl.columns.len()
                )));
            }
            if !decl.overrides.is_empty() {
                return Err(Error::mapping(format!(
                    "basic attribute `{}` cannot declare overrides",
                    self.qualified
                )));
            }
        }

        Ok(())
    }
}

fn precedence(marker: &Marker) -> u8 {
    match marker {
        Marker::ElementCollection { .. } => 0,
        Marker::OneToMany(_) => 1,
        Marker::ManyToMany(_) => 2,
        Marker::ManyToOne(_) => 3,
        Marker::OneToOne(_) => 4,
        Marker::Embedded => 5,
        Marker::Basic { .. } => 6,
    }
}

/// Attributes a mapping error to its declaration.
pub(super) fn located(err: Error, locator: Option<&crate::decl::Locator>) -> Error {
    match locator {
        Some(locator) if err.locator().is_none() => err.with_locator(locator.clone()),
        _ => err,
    }
}
