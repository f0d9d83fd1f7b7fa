pub mod decl;
pub use decl::Declarations;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::Metamodel;

mod session;
pub use session::Session;

pub mod value;
pub use value::{Instance, Value};

/// A Result type alias that uses rivet's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
