use super::Value;
use crate::{decl::CollectionKind, schema::app::AttributeId, Error, Result};

/// The collection installed in a plural attribute of a managed instance.
///
/// A lazy collection knows which attribute it belongs to but has not loaded
/// its elements yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedCollection {
    attribute: AttributeId,
    kind: CollectionKind,
    elements: Option<Elements>,
}

/// Loaded elements of a managed collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Elements {
    /// Elements of a collection, list or set
    Values(Vec<Value>),

    /// Entries of a map
    Entries(Vec<(Value, Value)>),
}

impl ManagedCollection {
    pub fn new(attribute: AttributeId, kind: CollectionKind, lazy: bool) -> Self {
        Self {
            attribute,
            kind,
            elements: if lazy {
                None
            } else {
                Some(Elements::empty(kind))
            },
        }
    }

    pub fn attribute(&self) -> AttributeId {
        self.attribute
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn is_loaded(&self) -> bool {
        self.elements.is_some()
    }

    pub fn elements(&self) -> Option<&Elements> {
        self.elements.as_ref()
    }

    /// Number of loaded elements, or `None` for a lazy collection.
    pub fn len(&self) -> Option<usize> {
        self.elements.as_ref().map(Elements::len)
    }

    /// Installs loaded elements. Set elements are de-duplicated.
    pub fn load(&mut self, elements: Elements) -> Result<()> {
        let elements = match (self.kind, elements) {
            (CollectionKind::Map, elements @ Elements::Entries(_)) => elements,
            (CollectionKind::Map, Elements::Values(_)) => {
                return Err(Error::invalid_value("map collections are loaded with entries"))
            }
            (_, Elements::Entries(_)) => {
                return Err(Error::invalid_value(
                    "only map collections are loaded with entries",
                ))
            }
            (CollectionKind::Set, Elements::Values(values)) => {
                let mut unique = Vec::with_capacity(values.len());
                for value in values {
                    if !unique.contains(&value) {
                        unique.push(value);
                    }
                }
                Elements::Values(unique)
            }
            (_, elements) => elements,
        };

        self.elements = Some(elements);
        Ok(())
    }

    /// Adds an element to a loaded, non-map collection. Adding an element a
    /// set already contains has no effect.
    pub fn push(&mut self, value: Value) -> Result<()> {
        let kind = self.kind;
        match self.elements.as_mut() {
            None => Err(Error::illegal_state("collection has not been loaded")),
            Some(Elements::Values(values)) => {
                if kind != CollectionKind::Set || !values.contains(&value) {
                    values.push(value);
                }
                Ok(())
            }
            Some(Elements::Entries(_)) => Err(Error::invalid_value(
                "map collections take entries, not values",
            )),
        }
    }

    /// Inserts an entry into a loaded map, replacing the value of an equal
    /// key.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<()> {
        match self.elements.as_mut() {
            None => Err(Error::illegal_state("collection has not been loaded")),
            Some(Elements::Entries(entries)) => {
                match entries.iter_mut().find(|(existing, _)| *existing == key) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((key, value)),
                }
                Ok(())
            }
            Some(Elements::Values(_)) => Err(Error::invalid_value(
                "only map collections take entries",
            )),
        }
    }

    /// Discards loaded elements; the collection becomes lazy again.
    pub fn reset(&mut self) {
        self.elements = None;
    }
}

impl Elements {
    fn empty(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Map => Elements::Entries(vec![]),
            _ => Elements::Values(vec![]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Elements::Values(values) => values.len(),
            Elements::Entries(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> Option<&[Value]> {
        match self {
            Elements::Values(values) => Some(values),
            Elements::Entries(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::app::TypeId;

    fn attribute() -> AttributeId {
        AttributeId {
            ty: TypeId(0),
            index: 0,
        }
    }

    #[test]
    fn lazy_until_loaded() {
        let mut tags = ManagedCollection::new(attribute(), CollectionKind::List, true);
        assert!(!tags.is_loaded());
        assert_eq!(tags.len(), None);
        assert!(tags.push("a".into()).unwrap_err().is_illegal_state());

        tags.load(Elements::Values(vec!["a".into(), "b".into()]))
            .unwrap();
        assert_eq!(tags.len(), Some(2));

        tags.reset();
        assert!(!tags.is_loaded());
    }

    #[test]
    fn set_ignores_duplicates() {
        let mut tags = ManagedCollection::new(attribute(), CollectionKind::Set, false);
        tags.push("a".into()).unwrap();
        tags.push("a".into()).unwrap();
        assert_eq!(tags.len(), Some(1));
    }

    #[test]
    fn map_takes_entries() {
        let mut phones = ManagedCollection::new(attribute(), CollectionKind::Map, false);
        phones.insert("home".into(), "555".into()).unwrap();
        phones.insert("home".into(), "556".into()).unwrap();
        assert_eq!(
            phones.elements(),
            Some(&Elements::Entries(vec![("home".into(), "556".into())]))
        );
        assert!(phones.push("x".into()).unwrap_err().is_invalid_value());
    }
}
