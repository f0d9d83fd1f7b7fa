use super::{Error, ErrorKind};
use crate::decl::Locator;
use std::sync::Arc;

/// Error when declared mapping metadata cannot be turned into a metamodel.
///
/// This occurs when:
/// - An attribute's declarations contradict each other
/// - A referenced target type is not a known persistent type of the right kind
/// - A physical column or table is declared twice
/// - An override names something of the wrong kind
///
/// Mapping errors are fatal to the persistence unit being bootstrapped.
#[derive(Debug)]
pub(super) struct MappingError {
    message: Box<str>,
    pub(super) locator: Option<Locator>,
}

impl std::error::Error for MappingError {}

impl core::fmt::Display for MappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping: {}", self.message)?;
        if let Some(locator) = &self.locator {
            write!(f, " (at {locator})")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a mapping error.
    pub fn mapping(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::Mapping(MappingError {
            message: message.into().into(),
            locator: None,
        }))
    }

    /// Attributes a mapping error to its originating declaration.
    ///
    /// Has no effect on other error kinds, or on errors that have already
    /// been shared.
    pub fn with_locator(mut self, locator: Locator) -> Error {
        if let Some(inner) = self.inner.as_mut().and_then(Arc::get_mut) {
            match &mut inner.kind {
                ErrorKind::Mapping(err) => err.locator = Some(locator),
                ErrorKind::AmbiguousMapping(err) => err.locator = Some(locator),
                _ => {}
            }
        }
        self
    }

    /// Returns the locator of the first located error in the context chain.
    pub fn locator(&self) -> Option<&Locator> {
        self.chain().find_map(|err| match err.kind() {
            ErrorKind::Mapping(err) => err.locator.as_ref(),
            ErrorKind::AmbiguousMapping(err) => err.locator.as_ref(),
            _ => None,
        })
    }

    /// Returns `true` if this error, or any error it wraps, is a mapping
    /// error. Ambiguous mappings count as mapping errors.
    pub fn is_mapping(&self) -> bool {
        self.any_kind(|kind| {
            matches!(
                kind,
                ErrorKind::Mapping(_) | ErrorKind::AmbiguousMapping(_)
            )
        })
    }
}
