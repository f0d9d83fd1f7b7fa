use super::{Error, ErrorKind};

/// Error when a value cannot be read from or written into an instance.
///
/// This indicates a binding defect between the instance and the metamodel
/// (wrong class, a non-record where an embedded instance is expected, a
/// positional column read through an instance). It is not transient.
#[derive(Debug)]
pub(super) struct InvalidValue {
    message: Box<str>,
}

impl std::error::Error for InvalidValue {}

impl core::fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid value: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid value error.
    pub fn invalid_value(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::InvalidValue(InvalidValue {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid
    /// value error.
    pub fn is_invalid_value(&self) -> bool {
        self.any_kind(|kind| matches!(kind, ErrorKind::InvalidValue(_)))
    }
}
