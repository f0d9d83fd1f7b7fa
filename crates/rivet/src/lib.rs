mod unit;
pub use unit::{Builder, PersistenceUnit};

pub use rivet_core::{
    decl, schema, value, Declarations, Error, Instance, Metamodel, Result, Session, Value,
};
