use super::{Error, ErrorKind};

/// Error when a class carries no recognized persistence declaration.
#[derive(Debug)]
pub(super) struct NotPersistent {
    class: Box<str>,
}

impl std::error::Error for NotPersistent {}

impl core::fmt::Display for NotPersistent {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "class `{}` is not a persistent type", self.class)
    }
}

impl Error {
    /// Creates a not-persistent error for the given class.
    pub fn not_persistent(class: impl Into<String>) -> Error {
        Error::from(ErrorKind::NotPersistent(NotPersistent {
            class: class.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a
    /// not-persistent error.
    pub fn is_not_persistent(&self) -> bool {
        self.any_kind(|kind| matches!(kind, ErrorKind::NotPersistent(_)))
    }
}
