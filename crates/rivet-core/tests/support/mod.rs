#![allow(dead_code)]

use rivet_core::{
    decl::{AttributeDecl, DeclaredType, TypeDecl},
    schema::{db::Column, mapping::Mapping, Builder},
    Declarations, Metamodel, Result,
};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing() {
    INIT.call_once(|| {
        use tracing_subscriber::{filter::EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

pub fn try_build(decls: impl IntoIterator<Item = TypeDecl>) -> Result<Metamodel> {
    try_build_with(&Builder::new(), decls)
}

pub fn try_build_with(
    builder: &Builder,
    decls: impl IntoIterator<Item = TypeDecl>,
) -> Result<Metamodel> {
    init_tracing();
    let decls: Declarations = decls.into_iter().collect();
    builder.build(&decls)
}

pub fn build(decls: impl IntoIterator<Item = TypeDecl>) -> Metamodel {
    match try_build(decls) {
        Ok(metamodel) => metamodel,
        Err(err) => panic!("metamodel failed to build: {err}"),
    }
}

/// `id: i64`, marked as the identifier.
pub fn id() -> AttributeDecl {
    AttributeDecl::new("id", DeclaredType::of("i64")).id()
}

pub fn string(name: &str) -> AttributeDecl {
    AttributeDecl::new(name, DeclaredType::of("String"))
}

/// Resolves `path` from the root of `entity`.
pub fn mapping<'a>(metamodel: &'a Metamodel, entity: &str, path: &str) -> &'a Mapping {
    let ty = metamodel.get_type(entity).unwrap();
    metamodel
        .mapping_for(ty)
        .unwrap()
        .get_mapping(path)
        .unwrap_or_else(|| panic!("no mapping for `{entity}.{path}`"))
}

/// The single column of a basic mapping.
pub fn basic_column<'a>(metamodel: &'a Metamodel, entity: &str, path: &str) -> &'a Column {
    let basic = mapping(metamodel, entity, path).as_basic().unwrap();
    metamodel.db.column(basic.column)
}

pub fn column_names(metamodel: &Metamodel, table: &str) -> Vec<String> {
    metamodel
        .db
        .table_by_name(table)
        .unwrap_or_else(|| panic!("no table `{table}`"))
        .columns
        .iter()
        .map(|column| column.name.clone())
        .collect()
}
