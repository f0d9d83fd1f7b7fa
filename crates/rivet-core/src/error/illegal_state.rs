use super::{Error, ErrorKind};

/// Error when the metamodel is used in a way its lifecycle does not allow.
///
/// This occurs when:
/// - A column is attached to a second table
/// - An attribute's mapping is requested before linking completed, or for an
///   attribute that is only mapped per usage path
/// - A persistence unit's metamodel is read before bootstrap
///
/// These are programmer errors; callers should not retry.
#[derive(Debug)]
pub(super) struct IllegalState {
    message: Box<str>,
}

impl std::error::Error for IllegalState {}

impl core::fmt::Display for IllegalState {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "illegal state: {}", self.message)
    }
}

impl Error {
    /// Creates an illegal state error.
    pub fn illegal_state(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::IllegalState(IllegalState {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an illegal
    /// state error.
    pub fn is_illegal_state(&self) -> bool {
        self.any_kind(|kind| matches!(kind, ErrorKind::IllegalState(_)))
    }
}
