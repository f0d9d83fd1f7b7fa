use super::{Error, ErrorKind};
use crate::decl::Locator;

/// Error when one attribute carries two mutually exclusive kind markers.
#[derive(Debug)]
pub(super) struct AmbiguousMapping {
    attribute: Box<str>,
    first: &'static str,
    second: &'static str,
    pub(super) locator: Option<Locator>,
}

impl std::error::Error for AmbiguousMapping {}

impl core::fmt::Display for AmbiguousMapping {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous mapping: attribute `{}` declares both `{}` and `{}`",
            self.attribute, self.first, self.second
        )?;
        if let Some(locator) = &self.locator {
            write!(f, " (at {locator})")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an ambiguous mapping error.
    pub fn ambiguous_mapping(
        attribute: impl Into<String>,
        first: &'static str,
        second: &'static str,
        locator: Option<Locator>,
    ) -> Error {
        Error::from(ErrorKind::AmbiguousMapping(AmbiguousMapping {
            attribute: attribute.into().into(),
            first,
            second,
            locator,
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an ambiguous
    /// mapping error.
    pub fn is_ambiguous_mapping(&self) -> bool {
        self.any_kind(|kind| matches!(kind, ErrorKind::AmbiguousMapping(_)))
    }
}
