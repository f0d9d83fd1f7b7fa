use super::Value;
use crate::decl::ClassName;
use indexmap::IndexMap;

/// A managed instance: the in-memory state of one entity or embeddable
/// object, keyed by attribute name.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: ClassName,
    fields: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(class: impl Into<ClassName>) -> Self {
        Self {
            class: class.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn class(&self) -> &ClassName {
        &self.class
    }

    /// Returns the value of `name`, or `None` if it was never set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Sets `name`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Sets `name` and returns the instance.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the slot for `name`, inserting `Null` if it is missing.
    pub fn entry(&mut self, name: &str) -> &mut Value {
        self.fields.entry(name.to_string()).or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}
