use super::{Attribute, AttributeId, PersistentType, TypeId};
use crate::{decl::ClassName, Error, Result};
use indexmap::IndexMap;

/// Every persistent type of a metamodel, keyed by class.
///
/// A class has exactly one `PersistentType` for the life of the registry.
/// Types are addressed by [`TypeId`], so types may reference each other
/// (and themselves) freely.
#[derive(Debug, Default)]
pub struct Registry {
    types: Vec<PersistentType>,
    lookup: IndexMap<ClassName, TypeId>,
}

impl Registry {
    /// Looks up the persistent type of `class`.
    pub fn get_type(&self, class: &ClassName) -> Result<&PersistentType> {
        self.lookup
            .get(class)
            .map(|id| &self.types[id.0])
            .ok_or_else(|| Error::not_persistent(class.as_str()))
    }

    pub fn lookup(&self, class: &ClassName) -> Option<TypeId> {
        self.lookup.get(class).copied()
    }

    pub fn ty(&self, id: impl Into<TypeId>) -> &PersistentType {
        self.types.get(id.into().0).expect("invalid type ID")
    }

    pub fn attribute(&self, id: AttributeId) -> &Attribute {
        self.ty(id.ty).attribute_by_id(id)
    }

    pub fn types(&self) -> impl ExactSizeIterator<Item = &PersistentType> + '_ {
        self.types.iter()
    }

    pub fn entities(&self) -> impl Iterator<Item = &PersistentType> + '_ {
        self.types.iter().filter(|ty| ty.is_entity())
    }

    /// Finds an entity by its entity name.
    pub fn entity(&self, name: &str) -> Option<&PersistentType> {
        self.entities().find(|ty| ty.name == name)
    }

    /// Returns `true` if instances of `sub` may be used where `sup` is
    /// expected: `sub` is `sup` or one of its subtypes.
    pub fn is_assignable(&self, sub: TypeId, sup: TypeId) -> bool {
        let mut current = Some(sub);

        while let Some(id) = current {
            if id == sup {
                return true;
            }
            current = self.ty(id).supertype;
        }

        false
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registers a new type. Its id must be the next free one.
    pub(crate) fn insert(&mut self, ty: PersistentType) -> TypeId {
        assert_eq!(ty.id.0, self.types.len(), "type IDs are allocated in order");
        assert!(!self.lookup.contains_key(&ty.class));

        let id = ty.id;
        self.lookup.insert(ty.class.clone(), id);
        self.types.push(ty);
        id
    }

    pub(crate) fn next_id(&self) -> TypeId {
        TypeId(self.types.len())
    }

    pub(crate) fn ty_mut(&mut self, id: TypeId) -> &mut PersistentType {
        self.types.get_mut(id.0).expect("invalid type ID")
    }

    pub(crate) fn types_mut(&mut self) -> impl Iterator<Item = &mut PersistentType> + '_ {
        self.types.iter_mut()
    }
}
