mod builder;
pub use builder::Builder;

use crate::Result;

use rivet_core::{schema, Declarations, Error, Metamodel, Session};

use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Shared state between all `PersistenceUnit` clones.
struct Shared {
    name: String,
    declarations: Declarations,
    core: schema::Builder,

    /// Set once by the first bootstrap. A failed build stays failed.
    metamodel: OnceLock<Result<Arc<Metamodel>>>,
}

/// A named set of persistent classes and the metamodel built from them.
///
/// The metamodel is built at most once. Until a bootstrap completes, readers
/// cannot observe it; afterwards it is immutable and shared by every clone
/// of the unit.
#[derive(Clone)]
pub struct PersistenceUnit {
    shared: Arc<Shared>,
}

impl PersistenceUnit {
    pub fn builder(name: impl Into<String>) -> Builder {
        Builder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Builds the metamodel, or returns the outcome of an earlier build.
    ///
    /// Concurrent callers block until the first build finishes and then all
    /// observe the same result.
    pub fn bootstrap(&self) -> Result<Arc<Metamodel>> {
        self.shared
            .metamodel
            .get_or_init(|| {
                debug!(unit = %self.shared.name, "bootstrapping persistence unit");

                let result = self
                    .shared
                    .core
                    .build(&self.shared.declarations)
                    .map(Arc::new)
                    .map_err(|err| {
                        err.context(rivet_core::err!(
                            "persistence unit `{}` failed to bootstrap",
                            self.shared.name
                        ))
                    });

                if result.is_ok() {
                    info!(unit = %self.shared.name, "persistence unit ready");
                }

                result
            })
            .clone()
    }

    /// Returns the metamodel of a bootstrapped unit.
    pub fn metamodel(&self) -> Result<Arc<Metamodel>> {
        self.bootstrapped().cloned()
    }

    /// Opens a session on the bootstrapped metamodel.
    pub fn session(&self) -> Result<Session<'_>> {
        Ok(Session::new(self.bootstrapped()?))
    }

    pub fn is_bootstrapped(&self) -> bool {
        matches!(self.shared.metamodel.get(), Some(Ok(_)))
    }

    fn bootstrapped(&self) -> Result<&Arc<Metamodel>> {
        match self.shared.metamodel.get() {
            Some(Ok(metamodel)) => Ok(metamodel),
            Some(Err(err)) => Err(err.clone()),
            None => Err(Error::illegal_state(format!(
                "persistence unit `{}` has not been bootstrapped",
                self.shared.name
            ))),
        }
    }
}

impl std::fmt::Debug for PersistenceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceUnit")
            .field("name", &self.shared.name)
            .field("types", &self.shared.declarations.len())
            .field("bootstrapped", &self.is_bootstrapped())
            .finish()
    }
}
