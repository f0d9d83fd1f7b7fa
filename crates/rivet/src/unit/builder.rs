use super::{PersistenceUnit, Shared};

use rivet_core::{
    decl::TypeDecl,
    schema::{self, NamingStrategy},
    Declarations,
};

use std::sync::{Arc, OnceLock};

pub struct Builder {
    name: String,

    /// Declarations handed over by the front-end
    declarations: Declarations,

    /// Metamodel builder
    core: schema::Builder,
}

impl Builder {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Declarations::new(),
            core: schema::Builder::default(),
        }
    }

    pub fn register(&mut self, decl: TypeDecl) -> &mut Self {
        self.declarations.push(decl);
        self
    }

    pub fn register_all(&mut self, declarations: Declarations) -> &mut Self {
        for decl in declarations.iter() {
            self.declarations.push(decl.clone());
        }
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.core.table_name_prefix(prefix);
        self
    }

    pub fn naming_strategy(&mut self, naming: NamingStrategy) -> &mut Self {
        self.core.naming_strategy(naming);
        self
    }

    pub fn strict_attribute_overrides(&mut self, strict: bool) -> &mut Self {
        self.core.strict_attribute_overrides(strict);
        self
    }

    /// Creates the unit. Nothing is built until
    /// [`PersistenceUnit::bootstrap`] is called.
    pub fn build(&self) -> PersistenceUnit {
        PersistenceUnit {
            shared: Arc::new(Shared {
                name: self.name.clone(),
                declarations: self.declarations.clone(),
                core: self.core.clone(),
                metamodel: OnceLock::new(),
            }),
        }
    }
}
