use crate::{
    decl::{ClassName, Declarations, TypeDecl, TypeDeclKind},
    schema::app::{PersistentType, Registry, TypeId, TypeKind},
    value::Type,
    Error, Result,
};
use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::debug;

/// Builds the type registry: registration, parsing and inheritance.
pub(super) struct BuildRegistry<'a> {
    /// Declarations by class
    decls: IndexMap<ClassName, &'a TypeDecl>,

    pub(super) registry: Registry,

    /// Types created but not parsed yet
    queue: VecDeque<TypeId>,
}

impl<'a> BuildRegistry<'a> {
    pub(super) fn new(declarations: &'a Declarations) -> Result<Self> {
        let mut decls = IndexMap::new();

        for decl in declarations.iter() {
            if decls.contains_key(&decl.class) {
                let err = Error::mapping(format!("class `{}` is declared twice", decl.class));
                return Err(match &decl.locator {
                    Some(locator) => err.with_locator(locator.clone()),
                    None => err,
                });
            }
            decls.insert(decl.class.clone(), decl);
        }

        Ok(Self {
            decls,
            registry: Registry::default(),
            queue: VecDeque::new(),
        })
    }

    pub(super) fn build(mut self) -> Result<Registry> {
        let classes: Vec<_> = self.decls.keys().cloned().collect();

        for class in &classes {
            self.get_type(class)?;
        }

        while let Some(id) = self.queue.pop_front() {
            self.parse_type(id)?;
        }

        self.apply_inheritance()?;
        self.verify_entities()?;

        Ok(self.registry)
    }

    /// Returns the type of `class`, creating it on first access.
    ///
    /// A declared class is created as a stub and queued for parsing, so a
    /// type can be referenced before (or while) its own attributes are
    /// parsed. Recognized value classes become basic types. Any other class
    /// is not persistent.
    pub(super) fn get_type(&mut self, class: &ClassName) -> Result<TypeId> {
        if let Some(id) = self.registry.lookup(class) {
            return Ok(id);
        }

        let id = self.registry.next_id();

        let ty = if let Some(decl) = self.decls.get(class) {
            self.queue.push_back(id);
            stub(id, decl)
        } else if let Some(basic) = Type::from_class(class) {
            PersistentType::basic(id, class.clone(), basic)
        } else {
            return Err(Error::not_persistent(class.as_str()));
        };

        debug!(%class, kind = ?ty.kind, id = id.0, "registered persistent type");

        Ok(self.registry.insert(ty))
    }

    /// Returns the declaration a type was created from.
    pub(super) fn decl(&self, id: TypeId) -> Option<&'a TypeDecl> {
        self.decls.get(&self.registry.ty(id).class).copied()
    }
}

fn stub(id: TypeId, decl: &TypeDecl) -> PersistentType {
    let kind = match decl.kind {
        TypeDeclKind::Entity => TypeKind::Entity,
        TypeDeclKind::Embeddable => TypeKind::Embeddable,
        TypeDeclKind::MappedSuperclass => TypeKind::MappedSuperclass,
    };

    PersistentType {
        id,
        class: decl.class.clone(),
        name: decl
            .name
            .clone()
            .unwrap_or_else(|| decl.class.simple_name().to_string()),
        kind,
        supertype: None,
        attributes: vec![],
        table: decl.table.clone(),
        overrides: decl.overrides.clone(),
        locator: decl.locator.clone(),
    }
}
