mod attribute;
pub use attribute::{Attribute, AttributeId, AttributeKind, Cardinality, LinkState};

mod persistent_type;
pub use persistent_type::{PersistentType, TypeId, TypeKind};

mod plural;
pub use plural::{Plural, PluralAttribute};

mod registry;
pub use registry::Registry;
