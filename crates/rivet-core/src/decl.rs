//! Mapping declarations consumed by the metamodel builder.
//!
//! Declarations are produced by a front-end (annotation scanner, XML reader,
//! ...) that lives outside of this crate. They describe what the user wrote
//! and nothing more: defaults, validation and derived state are the job of
//! [`schema::Builder`](crate::schema::Builder).

mod attribute;
pub use attribute::{AttributeDecl, CollectionKind, DeclaredType};

mod class_name;
pub use class_name::ClassName;

mod collection_table;
pub use collection_table::{
    CollectionTableDecl, CollectionTableDeclBuilder, JoinTableDecl, UniqueConstraint,
    UniqueConstraintBuilder,
};

mod column;
pub use column::{ColumnDecl, JoinColumnDecl};

mod locator;
pub use locator::Locator;

mod map_key;
pub use map_key::{EnumType, MapKeyDecl, TemporalType};

mod marker;
pub use marker::{AssociationMarker, CascadeSet, CascadeType, FetchType, Marker};

mod overrides;
pub use overrides::{OverrideDecl, Overrides};

mod type_decl;
pub use type_decl::{TableDecl, TypeDecl, TypeDeclKind};

/// The full set of type declarations making up one persistence unit, in
/// declaration order.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declarations {
    types: Vec<TypeDecl>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type declaration.
    pub fn with(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    pub fn push(&mut self, decl: TypeDecl) {
        self.types.push(decl);
    }

    /// Returns the first declaration of `class`.
    pub fn get(&self, class: &ClassName) -> Option<&TypeDecl> {
        self.types.iter().find(|decl| &decl.class == class)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeDecl> + '_ {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<TypeDecl> for Declarations {
    fn from_iter<T: IntoIterator<Item = TypeDecl>>(iter: T) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}
