use super::{parse::located, registry::BuildRegistry};
use crate::{
    schema::app::{Attribute, AttributeId, TypeId, TypeKind},
    Error, Result,
};
use std::collections::HashSet;
use tracing::trace;

impl BuildRegistry<'_> {
    /// Copies supertype attributes into every subtype, supertypes first.
    pub(super) fn apply_inheritance(&mut self) -> Result<()> {
        let mut done = vec![false; self.registry.len()];

        for index in 0..self.registry.len() {
            self.inherit(TypeId(index), &mut done, &mut vec![])?;
        }

        Ok(())
    }

    fn inherit(&mut self, id: TypeId, done: &mut [bool], stack: &mut Vec<TypeId>) -> Result<()> {
        if done[id.0] {
            return Ok(());
        }

        let ty = self.registry.ty(id);

        let Some(supertype) = ty.supertype else {
            done[id.0] = true;
            return Ok(());
        };

        if stack.contains(&id) {
            return Err(located(
                Error::mapping(format!("inheritance cycle through `{}`", ty.class)),
                ty.locator.as_ref(),
            ));
        }

        let sup = self.registry.ty(supertype);
        let allowed = matches!(
            (ty.kind, sup.kind),
            (
                TypeKind::Entity | TypeKind::MappedSuperclass,
                TypeKind::Entity | TypeKind::MappedSuperclass
            ) | (
                TypeKind::Embeddable,
                TypeKind::Embeddable | TypeKind::MappedSuperclass
            )
        );

        if !allowed {
            return Err(located(
                Error::mapping(format!(
                    "`{}` is {} and cannot extend `{}`, which is {}",
                    ty.class,
                    ty.kind.describe(),
                    sup.class,
                    sup.kind.describe()
                )),
                ty.locator.as_ref(),
            ));
        }

        stack.push(id);
        self.inherit(supertype, done, stack)?;
        stack.pop();

        let inherited: Vec<Attribute> = self
            .registry
            .ty(supertype)
            .attributes
            .iter()
            .enumerate()
            .map(|(index, attribute)| attribute.inherit(AttributeId { ty: id, index }))
            .collect();

        let ty = self.registry.ty_mut(id);
        let names: HashSet<&str> = inherited.iter().map(|a| a.name.as_str()).collect();

        if let Some(clash) = ty.attributes.iter().find(|a| names.contains(a.name.as_str())) {
            return Err(located(
                Error::mapping(format!(
                    "attribute `{}::{}` redeclares an inherited attribute",
                    ty.class, clash.name
                )),
                clash.locator.as_ref(),
            ));
        }

        trace!(class = %ty.class, inherited = inherited.len(), "inherited attributes");

        let own = std::mem::take(&mut ty.attributes);
        ty.attributes = inherited;

        for mut attribute in own {
            attribute.id.index = ty.attributes.len();
            ty.attributes.push(attribute);
        }

        done[id.0] = true;
        Ok(())
    }

    /// Checks that every entity can be identified and is named uniquely.
    pub(super) fn verify_entities(&self) -> Result<()> {
        let mut names = HashSet::new();

        for ty in self.registry.entities() {
            if !names.insert(ty.name.as_str()) {
                return Err(located(
                    Error::mapping(format!("entity name `{}` is used twice", ty.name)),
                    ty.locator.as_ref(),
                ));
            }

            if ty.identifiers().next().is_none() {
                return Err(located(
                    Error::mapping(format!("entity `{}` declares no identifier", ty.class)),
                    ty.locator.as_ref(),
                ));
            }
        }

        Ok(())
    }
}
