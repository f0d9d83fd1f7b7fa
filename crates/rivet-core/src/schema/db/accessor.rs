use crate::{
    decl::ClassName,
    value::{Instance, Value},
    Error, Result,
};
use std::fmt;

/// Locates a value inside a managed instance by walking attribute names,
/// descending into embedded instances.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Accessor {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,

    /// Class of the value held by the attribute. Used to create missing
    /// embedded instances on write.
    pub class: ClassName,
}

impl Accessor {
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns an accessor one attribute deeper.
    pub fn child(&self, name: impl Into<String>, class: impl Into<ClassName>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment {
            name: name.into(),
            class: class.into(),
        });
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The dotted attribute path.
    pub fn path(&self) -> String {
        let names: Vec<_> = self.segments.iter().map(|s| s.name.as_str()).collect();
        names.join(".")
    }

    /// Reads the value. Returns `None` when the value, or one of its
    /// embedded parents, was never set or is null.
    pub(crate) fn get<'i>(&self, instance: &'i Instance) -> Result<Option<&'i Value>> {
        let Some((last, parents)) = self.segments.split_last() else {
            return Ok(None);
        };

        let mut current = instance;

        for segment in parents {
            match current.get(&segment.name) {
                None | Some(Value::Null) => return Ok(None),
                Some(Value::Embedded(embedded)) => current = embedded,
                Some(other) => return Err(not_embedded(&segment.name, other)),
            }
        }

        Ok(current.get(&last.name))
    }

    /// Returns the slot holding the value, creating embedded parents that
    /// are missing.
    pub(crate) fn slot_mut<'i>(&self, instance: &'i mut Instance) -> Result<&'i mut Value> {
        let Some((last, parents)) = self.segments.split_last() else {
            return Err(Error::invalid_value("cannot write through an empty path"));
        };

        let mut current = instance;

        for segment in parents {
            let slot = current.entry(&segment.name);

            if slot.is_null() {
                *slot = Value::Embedded(Instance::new(&segment.class));
            }

            current = match slot {
                Value::Embedded(embedded) => embedded,
                other => return Err(not_embedded(&segment.name, other)),
            };
        }

        Ok(current.entry(&last.name))
    }
}

fn not_embedded(name: &str, found: &Value) -> Error {
    Error::invalid_value(format!(
        "expected an embedded instance at `{name}`, found {}",
        found.kind_name()
    ))
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accessor({})", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> Accessor {
        Accessor::root()
            .child("address", "Address")
            .child("city", "String")
    }

    #[test]
    fn get_through_missing_parent_is_none() {
        let person = Instance::new("Person");
        assert_eq!(city().get(&person).unwrap(), None);
    }

    #[test]
    fn slot_mut_creates_embedded_parents() {
        let mut person = Instance::new("Person");
        *city().slot_mut(&mut person).unwrap() = Value::from("Oslo");

        let address = person.get("address").and_then(Value::as_embedded).unwrap();
        assert_eq!(address.class().as_str(), "Address");
        assert_eq!(city().get(&person).unwrap(), Some(&Value::from("Oslo")));
        assert_eq!(city().path(), "address.city");
    }

    #[test]
    fn non_embedded_parent_is_invalid() {
        let person = Instance::new("Person").with("address", "Main street 1");
        let err = city().get(&person).unwrap_err();
        assert!(err.is_invalid_value());
    }
}
