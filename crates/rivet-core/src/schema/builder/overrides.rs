use super::{link::Link, parse::located};
use crate::{
    decl::{ColumnDecl, Locator, OverrideDecl, Overrides},
    schema::app::{AttributeKind, PersistentType},
    Error, Result,
};
use tracing::warn;

/// Returns the overrides in effect one attribute deeper.
///
/// The attribute's own overrides apply first; overrides from the enclosing
/// site replace them, so the outermost declaration wins.
pub(super) fn scoped(outer: &Overrides, name: &str, inner: &Overrides) -> Overrides {
    let mut scoped = inner.clone();
    let prefix = format!("{name}.");

    for (path, decl) in outer {
        if let Some(rest) = path.strip_prefix(&prefix) {
            scoped.insert(rest.to_string(), decl.clone());
        }
    }

    scoped
}

/// The column override of a basic value, or a mapping error if the entry is
/// an association override.
pub(super) fn column_override<'o>(
    decl: Option<&'o OverrideDecl>,
    path: &str,
) -> Result<Option<&'o ColumnDecl>> {
    match decl {
        None => Ok(None),
        Some(OverrideDecl::Column(column)) => Ok(Some(column)),
        Some(decl) => Err(wrong_kind(decl, path, "a basic value")),
    }
}

pub(super) fn wrong_kind(decl: &OverrideDecl, path: &str, target: &str) -> Error {
    located(
        Error::mapping(format!(
            "{} for `{path}` cannot be applied to {target}",
            decl.kind_name()
        )),
        locator(decl),
    )
}

fn locator(decl: &OverrideDecl) -> Option<&Locator> {
    match decl {
        OverrideDecl::Column(column) => column.locator.as_ref(),
        OverrideDecl::JoinColumns(columns) => columns
            .first()
            .and_then(|column| column.column.locator.as_ref()),
    }
}

impl Link<'_> {
    /// Checks that every override entry names an attribute of `ty`.
    ///
    /// Entries that match nothing are ignored with a warning, or rejected
    /// when strict override checking is enabled.
    pub(super) fn check_overrides(
        &self,
        ty: &PersistentType,
        overrides: &Overrides,
        site: &str,
    ) -> Result<()> {
        for (path, decl) in overrides {
            let (first, rest) = match path.split_once('.') {
                Some((first, rest)) => (first, Some(rest)),
                None => (path.as_str(), None),
            };

            let matched = match ty.attribute(first) {
                Some(attribute) => rest.is_none() || attribute.kind == AttributeKind::Embedded,
                None => false,
            };

            if matched {
                continue;
            }

            if self.builder.is_strict() {
                return Err(located(
                    Error::mapping(format!(
                        "{} `{path}` on `{site}` matches no attribute of `{}`",
                        decl.kind_name(),
                        ty.class
                    )),
                    locator(decl),
                ));
            }

            warn!(
                path = %path,
                site = %site,
                class = %ty.class,
                "ignoring override that matches no attribute"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_overrides_win() {
        let mut outer = Overrides::new();
        outer.insert(
            "address.city".into(),
            OverrideDecl::Column(ColumnDecl::named("CITY_CODE")),
        );
        outer.insert(
            "other.city".into(),
            OverrideDecl::Column(ColumnDecl::named("OTHER")),
        );

        let mut inner = Overrides::new();
        inner.insert("city".into(), OverrideDecl::Column(ColumnDecl::named("TOWN")));
        inner.insert("zip".into(), OverrideDecl::Column(ColumnDecl::named("ZIP")));

        let scoped = scoped(&outer, "address", &inner);
        assert_eq!(scoped.len(), 2);
        assert_eq!(
            scoped.get("city"),
            Some(&OverrideDecl::Column(ColumnDecl::named("CITY_CODE")))
        );
        assert_eq!(
            scoped.get("zip"),
            Some(&OverrideDecl::Column(ColumnDecl::named("ZIP")))
        );
    }

    #[test]
    fn association_override_on_basic_value() {
        let decl = OverrideDecl::JoinColumns(vec![]);
        let err = column_override(Some(&decl), "address.city").unwrap_err();
        assert!(err.is_mapping());
        assert_eq!(
            err.to_string(),
            "invalid mapping: association override for `address.city` cannot be applied to a basic value"
        );
    }
}
