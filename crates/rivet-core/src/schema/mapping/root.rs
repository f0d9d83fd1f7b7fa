use super::Mapping;
use crate::schema::{
    app::{AttributeId, TypeId},
    db::TableId,
};
use indexmap::IndexMap;

/// The root of a mapping tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RootMapping {
    /// The entity, or the embeddable element type
    pub ty: TypeId,

    /// Table receiving the root's columns
    pub table: TableId,

    pub kind: RootKind,

    /// Nodes of the type's attributes, in attribute order
    pub children: IndexMap<String, Mapping>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// The tree of an entity, backed by its primary table
    Entity,

    /// The tree of the elements of an embeddable element collection, backed
    /// by the collection table
    Element { collection: AttributeId },
}

impl RootMapping {
    pub fn new(ty: TypeId, table: TableId, kind: RootKind) -> Self {
        Self {
            ty,
            table,
            kind,
            children: IndexMap::new(),
        }
    }

    /// Resolves a dotted attribute path, e.g. `address.city`.
    ///
    /// Every step but the last must name an embedded attribute. Returns
    /// `None` if the path does not resolve.
    pub fn get_mapping(&self, path: &str) -> Option<&Mapping> {
        let mut segments = path.split('.');
        let mut current = self.children.get(segments.next()?)?;

        for segment in segments {
            current = current.children()?.get(segment)?;
        }

        Some(current)
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = &Mapping> + '_ {
        self.children.values()
    }

    /// Visits every node of the tree, parents before their children.
    pub fn walk(&self) -> impl Iterator<Item = &Mapping> + '_ {
        let mut stack: Vec<&Mapping> = self.children.values().rev().collect();

        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Some(children) = node.children() {
                stack.extend(children.values().rev());
            }
            Some(node)
        })
    }
}
