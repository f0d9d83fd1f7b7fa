mod inherit;
mod link;
mod overrides;
mod parse;
mod registry;
mod table;

use super::{app::LinkState, Metamodel, Name};
use crate::{decl::Declarations, Result};
use link::Link;
use registry::BuildRegistry;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,

    /// Case style of generated table and column names
    naming: NamingStrategy,

    /// Reject override entries that name no attribute instead of ignoring
    /// them
    strict_attribute_overrides: bool,
}

/// How generated table and column names are rendered. Names given
/// explicitly in declarations are used verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamingStrategy {
    /// Keep entity and attribute names as declared, e.g. `Person_address`
    #[default]
    Preserve,

    /// `person_address`
    SnakeCase,

    /// `PERSON_ADDRESS`
    UpperSnakeCase,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn naming_strategy(&mut self, naming: NamingStrategy) -> &mut Self {
        self.naming = naming;
        self
    }

    pub fn strict_attribute_overrides(&mut self, strict: bool) -> &mut Self {
        self.strict_attribute_overrides = strict;
        self
    }

    /// Builds the metamodel of a persistence unit.
    ///
    /// Types are registered and parsed first, then supertype attributes are
    /// copied into subtypes. Linking then runs in two passes: every entity
    /// gets its table and key columns, and only then are attributes linked,
    /// so associations can reference any entity regardless of order or
    /// cycles.
    pub fn build(&self, declarations: &Declarations) -> Result<Metamodel> {
        let mut app = BuildRegistry::new(declarations)?.build()?;

        let (db, mapping) = Link::new(self, &app).link()?;

        for ty in app.types_mut().filter(|ty| ty.is_entity()) {
            for attribute in &mut ty.attributes {
                attribute.state = LinkState::Linked;
            }
        }

        let metamodel = Metamodel { app, db, mapping };
        metamodel.verify()?;

        info!(
            types = metamodel.app.len(),
            tables = metamodel.db.tables.len(),
            "built metamodel"
        );

        Ok(metamodel)
    }

    /// Renders a generated table name, applying the naming strategy and the
    /// table name prefix.
    pub(crate) fn generated_table_name(&self, name: &str) -> String {
        self.prefix_table_name(&self.naming.apply(name))
    }

    pub(crate) fn prefix_table_name(&self, name: &str) -> String {
        if let Some(prefix) = &self.table_name_prefix {
            format!("{prefix}{name}")
        } else {
            name.to_string()
        }
    }

    pub(crate) fn generated_column_name(&self, name: &str) -> String {
        self.naming.apply(name)
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.strict_attribute_overrides
    }
}

impl NamingStrategy {
    pub fn apply(&self, name: &str) -> String {
        match self {
            NamingStrategy::Preserve => name.to_string(),
            NamingStrategy::SnakeCase => Name::new(name).snake_case(),
            NamingStrategy::UpperSnakeCase => Name::new(name).upper_snake_case(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_strategies() {
        assert_eq!(NamingStrategy::Preserve.apply("Person_homeAddress"), "Person_homeAddress");
        assert_eq!(
            NamingStrategy::SnakeCase.apply("Person_homeAddress"),
            "person_home_address"
        );
        assert_eq!(
            NamingStrategy::UpperSnakeCase.apply("Person_homeAddress"),
            "PERSON_HOME_ADDRESS"
        );
    }

    #[test]
    fn table_prefix_applies_after_naming() {
        let mut builder = Builder::new();
        builder
            .table_name_prefix("app_")
            .naming_strategy(NamingStrategy::SnakeCase);

        assert_eq!(builder.generated_table_name("OrderLine"), "app_order_line");
        assert_eq!(builder.prefix_table_name("ORDERS"), "app_ORDERS");
    }
}
