use std::fmt;

/// Identity of a class participating in persistence.
///
/// Class names are compared verbatim; `com.acme.Person` and `Person` are two
/// different classes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ClassName(String);

impl ClassName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The class name without any package or module qualifier.
    pub fn simple_name(&self) -> &str {
        let name = self.0.rsplit("::").next().unwrap_or(&self.0);
        name.rsplit('.').next().unwrap_or(name)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassName({})", self.0)
    }
}

impl From<&str> for ClassName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ClassName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&ClassName> for ClassName {
    fn from(value: &ClassName) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_strips_qualifiers() {
        assert_eq!(ClassName::from("com.acme.Person").simple_name(), "Person");
        assert_eq!(ClassName::from("acme::model::Person").simple_name(), "Person");
        assert_eq!(ClassName::from("Person").simple_name(), "Person");
    }
}
