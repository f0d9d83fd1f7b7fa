use super::{
    AttributeDecl, ClassName, ColumnDecl, Locator, OverrideDecl, Overrides, UniqueConstraint,
};

/// Declaration of one persistent class.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDecl {
    pub class: ClassName,

    pub kind: TypeDeclKind,

    /// Entity name. Defaults to the simple class name.
    pub name: Option<String>,

    pub supertype: Option<ClassName>,

    /// Primary table of an entity
    pub table: Option<TableDecl>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<AttributeDecl>,

    /// Overrides applied to attributes inherited from supertypes
    #[cfg_attr(feature = "serde", serde(default))]
    pub overrides: Overrides,

    pub locator: Option<Locator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeDeclKind {
    Entity,
    Embeddable,
    MappedSuperclass,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableDecl {
    pub name: Option<String>,
    pub schema: Option<String>,
    pub unique_constraints: Vec<UniqueConstraint>,
}

impl TypeDecl {
    pub fn new(class: impl Into<ClassName>, kind: TypeDeclKind) -> Self {
        Self {
            class: class.into(),
            kind,
            name: None,
            supertype: None,
            table: None,
            attributes: vec![],
            overrides: Overrides::new(),
            locator: None,
        }
    }

    pub fn entity(class: impl Into<ClassName>) -> Self {
        Self::new(class, TypeDeclKind::Entity)
    }

    pub fn embeddable(class: impl Into<ClassName>) -> Self {
        Self::new(class, TypeDeclKind::Embeddable)
    }

    pub fn mapped_superclass(class: impl Into<ClassName>) -> Self {
        Self::new(class, TypeDeclKind::MappedSuperclass)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn supertype(mut self, supertype: impl Into<ClassName>) -> Self {
        self.supertype = Some(supertype.into());
        self
    }

    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table.get_or_insert_with(TableDecl::default).name = Some(name.into());
        self
    }

    pub fn attribute(mut self, attribute: AttributeDecl) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn override_column(mut self, path: impl Into<String>, column: ColumnDecl) -> Self {
        self.overrides
            .insert(path.into(), OverrideDecl::Column(column));
        self
    }

    pub fn located(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }
}
