use std::fmt;

/// Points back at the declaration a piece of metadata came from, so errors
/// can be attributed to their source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locator {
    /// File, resource or annotated member the declaration was read from
    pub source: String,

    /// 1-based line within `source`, when known
    pub line: Option<u32>,
}

impl Locator {
    pub fn new(source: impl Into<String>, line: u32) -> Self {
        Self {
            source: source.into(),
            line: Some(line),
        }
    }

    /// A locator without line information, e.g. an annotated member.
    pub fn source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            line: None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.source, line),
            None => f.write_str(&self.source),
        }
    }
}
