mod support;

use rivet_core::{
    decl::{AttributeDecl, ColumnDecl, DeclaredType, Locator, TypeDecl},
    schema::db::{SqlType, TableId},
};
use std_util::prelude::*;
use support::{id, string};

// ---------------------------------------------------------------------------
// Column properties
// ---------------------------------------------------------------------------

#[test]
fn declared_properties_are_copied() {
    let metamodel = support::build([TypeDecl::entity("Product")
        .attribute(id())
        .attribute(
            string("code").column(
                ColumnDecl::named("CODE")
                    .length(16)
                    .nullable(false)
                    .unique(true)
                    .updatable(false),
            ),
        )
        .attribute(
            AttributeDecl::new("price", DeclaredType::of("f64"))
                .column(ColumnDecl::default().precision(10, 2).sql_type(SqlType::Decimal)),
        )]);

    let code = support::basic_column(&metamodel, "Product", "code");
    assert_eq!(code.name, "CODE");
    assert_eq!(code.length, 16);
    assert!(!code.nullable);
    assert!(code.unique);
    assert!(code.insertable);
    assert!(!code.updatable);
    assert_eq!(code.sql_type, SqlType::VarChar);

    let price = support::basic_column(&metamodel, "Product", "price");
    assert_eq!(price.name, "price");
    assert_eq!((price.precision, price.scale), (10, 2));
    assert_eq!(price.sql_type, SqlType::Decimal);
    assert_eq!(price.sql_type.code(), 3);
}

#[test]
fn key_columns_are_not_nullable() {
    let metamodel = support::build([TypeDecl::entity("Product")
        .attribute(id())
        .attribute(string("code"))]);

    let table = metamodel.db.table_by_name("Product").unwrap();
    let keys: Vec<_> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
    assert_eq!(keys, ["id"]);

    let id = table.column_by_name("ID").unwrap();
    assert!(id.primary_key);
    assert!(!id.nullable);
    assert_eq!(id.sql_type, SqlType::BigInt);
    assert_eq!(id.sql_type.code(), -5);
}

#[test]
fn sql_type_codes() {
    for (ty, code, name) in [
        (SqlType::Boolean, 16, "BOOLEAN"),
        (SqlType::Integer, 4, "INTEGER"),
        (SqlType::BigInt, -5, "BIGINT"),
        (SqlType::Double, 8, "DOUBLE"),
        (SqlType::VarChar, 12, "VARCHAR"),
        (SqlType::Blob, 2004, "BLOB"),
        (SqlType::Decimal, 3, "DECIMAL"),
    ] {
        assert_eq!(ty.code(), code, "{ty}");
        assert_eq!(ty.to_string(), name);
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[test]
fn duplicate_column_reports_both_locations() {
    let err = assert_err!(support::try_build([TypeDecl::entity("Person")
        .attribute(id())
        .attribute(string("name").column(ColumnDecl::default().located(Locator::new("orm.xml", 4))))
        .attribute(
            string("nickname")
                .column(ColumnDecl::named("NAME").located(Locator::new("orm.xml", 9))),
        )]));

    assert!(err.is_mapping());
    assert_eq!(
        err.to_string(),
        "invalid mapping: duplicate column `NAME` in table `Person`, first declared at \
         orm.xml:4 (at orm.xml:9)"
    );
}

#[test]
fn table_mapped_twice() {
    let err = assert_err!(support::try_build([
        TypeDecl::entity("Person").attribute(id()).table("PEOPLE"),
        TypeDecl::entity("Customer").attribute(id()).table("people"),
    ]));
    assert_eq!(err.to_string(), "invalid mapping: table `people` is mapped twice");
}

#[test]
fn column_declared_in_another_table() {
    let mut decl = ColumnDecl::named("NAME");
    decl.table = Some("PERSON_DETAILS".into());

    let err = assert_err!(support::try_build([TypeDecl::entity("Person")
        .attribute(id())
        .attribute(string("name").column(decl))]));
    assert_eq!(
        err.to_string(),
        "invalid mapping: column `NAME` of `name` is declared in table `PERSON_DETAILS`, but \
         the attribute is stored in `Person`"
    );
}

#[test]
fn column_belongs_to_one_table() {
    let metamodel = support::build([TypeDecl::entity("Person")
        .attribute(id())
        .attribute(string("name"))]);

    let column = support::basic_column(&metamodel, "Person", "name");
    assert_eq!(column.table(), Some(TableId(0)));
    assert_eq!(column.id.table, TableId(0));

    let mut copy = column.clone();
    let err = assert_err!(copy.set_table(TableId(1)));
    assert!(err.is_illegal_state());
    assert_eq!(
        err.to_string(),
        "illegal state: column `name` is already attached to TableId(0)"
    );
}

#[test]
fn columns_record_their_mapping_path() {
    let metamodel = support::build([TypeDecl::entity("Person")
        .attribute(id())
        .attribute(string("name"))]);

    let person = metamodel.get_type("Person").unwrap();
    let column = support::basic_column(&metamodel, "Person", "name");
    assert_eq!(column.mapping_name, "name");
    assert_eq!(column.owner, person.id);
}
