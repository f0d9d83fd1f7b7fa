use super::ClassName;
use std::fmt;

/// A kind marker placed on an attribute declaration.
///
/// An attribute normally carries at most one marker. Which combinations are
/// legal is decided when the attribute is parsed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    /// A plain value stored in a single column
    Basic { fetch: Option<FetchType> },

    /// A value of an embeddable type, flattened into the owner's table
    Embedded,

    /// A collection of basic or embeddable values stored in a collection
    /// table
    ElementCollection {
        target: Option<ClassName>,
        fetch: Option<FetchType>,
    },

    OneToMany(AssociationMarker),
    ManyToOne(AssociationMarker),
    OneToOne(AssociationMarker),
    ManyToMany(AssociationMarker),
}

/// Settings shared by the association markers.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssociationMarker {
    /// Explicit target entity. When absent, the declared (element) type is
    /// used.
    pub target: Option<ClassName>,

    pub fetch: Option<FetchType>,

    pub cascade: CascadeSet,

    /// Name of the owning attribute on the target. Empty when this side owns
    /// the association.
    pub mapped_by: String,

    pub orphan_removal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FetchType {
    Eager,
    Lazy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CascadeType {
    All,
    Persist,
    Merge,
    Remove,
    Refresh,
    Detach,
}

/// A set of [`CascadeType`]s.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CascadeSet(u8);

impl Marker {
    /// The name of the marker as it appears in declarations and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Embedded => "embedded",
            Self::ElementCollection { .. } => "element-collection",
            Self::OneToMany(_) => "one-to-many",
            Self::ManyToOne(_) => "many-to-one",
            Self::OneToOne(_) => "one-to-one",
            Self::ManyToMany(_) => "many-to-many",
        }
    }

    pub fn basic() -> Self {
        Self::Basic { fetch: None }
    }

    pub fn element_collection() -> Self {
        Self::ElementCollection {
            target: None,
            fetch: None,
        }
    }

    pub fn as_association(&self) -> Option<&AssociationMarker> {
        match self {
            Self::OneToMany(marker)
            | Self::ManyToOne(marker)
            | Self::OneToOne(marker)
            | Self::ManyToMany(marker) => Some(marker),
            _ => None,
        }
    }
}

impl AssociationMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: impl Into<ClassName>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn fetch(mut self, fetch: FetchType) -> Self {
        self.fetch = Some(fetch);
        self
    }

    pub fn cascade(mut self, cascade: impl IntoIterator<Item = CascadeType>) -> Self {
        self.cascade = cascade.into_iter().collect();
        self
    }

    pub fn mapped_by(mut self, attribute: impl Into<String>) -> Self {
        self.mapped_by = attribute.into();
        self
    }

    pub fn orphan_removal(mut self, orphan_removal: bool) -> Self {
        self.orphan_removal = orphan_removal;
        self
    }
}

impl CascadeType {
    const fn bit(self) -> u8 {
        match self {
            Self::All => 0b11111,
            Self::Persist => 0b00001,
            Self::Merge => 0b00010,
            Self::Remove => 0b00100,
            Self::Refresh => 0b01000,
            Self::Detach => 0b10000,
        }
    }
}

impl CascadeSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(CascadeType::All.bit())
    }

    pub fn insert(&mut self, ty: CascadeType) {
        self.0 |= ty.bit();
    }

    /// Returns `true` if operations of type `ty` cascade. `All` only matches
    /// a set that cascades every operation.
    pub fn contains(&self, ty: CascadeType) -> bool {
        self.0 & ty.bit() == ty.bit()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<CascadeType> for CascadeSet {
    fn from_iter<T: IntoIterator<Item = CascadeType>>(iter: T) -> Self {
        let mut set = Self::empty();
        for ty in iter {
            set.insert(ty);
        }
        set
    }
}

impl fmt::Debug for CascadeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CascadeType::*;

        if self.contains(All) {
            return f.write_str("CascadeSet(All)");
        }

        f.debug_set()
            .entries(
                [Persist, Merge, Remove, Refresh, Detach]
                    .into_iter()
                    .filter(|ty| self.contains(*ty)),
            )
            .finish()
    }
}
