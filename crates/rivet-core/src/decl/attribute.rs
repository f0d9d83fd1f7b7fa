use super::{
    ClassName, CollectionTableDecl, ColumnDecl, JoinColumnDecl, JoinTableDecl, Locator,
    MapKeyDecl, Marker, OverrideDecl, Overrides,
};

/// Declaration of one persistent attribute (field or accessor).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeDecl {
    pub name: String,

    /// The declared type of the member
    pub ty: DeclaredType,

    /// True if the attribute is (part of) the identifier
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: bool,

    /// Kind markers in the order they were discovered
    #[cfg_attr(feature = "serde", serde(default))]
    pub markers: Vec<Marker>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub columns: Vec<ColumnDecl>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub join_columns: Vec<JoinColumnDecl>,

    /// Attribute and association overrides for embedded and element
    /// collection attributes
    #[cfg_attr(feature = "serde", serde(default))]
    pub overrides: Overrides,

    pub map_key: Option<MapKeyDecl>,

    pub order_by: Option<String>,

    pub order_column: Option<ColumnDecl>,

    pub collection_table: Option<CollectionTableDecl>,

    pub join_table: Option<JoinTableDecl>,

    pub locator: Option<Locator>,
}

/// The declared type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclaredType {
    /// The value class, or the element class for collections
    pub class: ClassName,

    /// Set when the attribute is collection-valued
    pub collection: Option<CollectionKind>,

    /// Key class for map-valued attributes
    pub key: Option<ClassName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollectionKind {
    Collection,
    List,
    Set,
    Map,
}

impl AttributeDecl {
    pub fn new(name: impl Into<String>, ty: DeclaredType) -> Self {
        Self {
            name: name.into(),
            ty,
            id: false,
            markers: vec![],
            columns: vec![],
            join_columns: vec![],
            overrides: Overrides::new(),
            map_key: None,
            order_by: None,
            order_column: None,
            collection_table: None,
            join_table: None,
            locator: None,
        }
    }

    /// Marks the attribute as (part of) the identifier.
    pub fn id(mut self) -> Self {
        self.id = true;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn column(mut self, column: ColumnDecl) -> Self {
        self.columns.push(column);
        self
    }

    pub fn join_column(mut self, join_column: JoinColumnDecl) -> Self {
        self.join_columns.push(join_column);
        self
    }

    pub fn override_column(mut self, path: impl Into<String>, column: ColumnDecl) -> Self {
        self.overrides
            .insert(path.into(), OverrideDecl::Column(column));
        self
    }

    pub fn override_join_columns(
        mut self,
        path: impl Into<String>,
        join_columns: Vec<JoinColumnDecl>,
    ) -> Self {
        self.overrides
            .insert(path.into(), OverrideDecl::JoinColumns(join_columns));
        self
    }

    pub fn map_key(mut self, map_key: MapKeyDecl) -> Self {
        self.map_key = Some(map_key);
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn order_column(mut self, column: ColumnDecl) -> Self {
        self.order_column = Some(column);
        self
    }

    pub fn collection_table(mut self, collection_table: CollectionTableDecl) -> Self {
        self.collection_table = Some(collection_table);
        self
    }

    pub fn join_table(mut self, join_table: JoinTableDecl) -> Self {
        self.join_table = Some(join_table);
        self
    }

    pub fn located(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }
}

impl DeclaredType {
    pub fn of(class: impl Into<ClassName>) -> Self {
        Self {
            class: class.into(),
            collection: None,
            key: None,
        }
    }

    pub fn collection_of(class: impl Into<ClassName>) -> Self {
        Self::plural(CollectionKind::Collection, class)
    }

    pub fn list_of(class: impl Into<ClassName>) -> Self {
        Self::plural(CollectionKind::List, class)
    }

    pub fn set_of(class: impl Into<ClassName>) -> Self {
        Self::plural(CollectionKind::Set, class)
    }

    pub fn map_of(key: impl Into<ClassName>, value: impl Into<ClassName>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::plural(CollectionKind::Map, value)
        }
    }

    fn plural(kind: CollectionKind, class: impl Into<ClassName>) -> Self {
        Self {
            class: class.into(),
            collection: Some(kind),
            key: None,
        }
    }

    pub fn is_plural(&self) -> bool {
        self.collection.is_some()
    }
}
