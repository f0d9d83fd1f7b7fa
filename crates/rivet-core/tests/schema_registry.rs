mod support;

use rivet_core::{
    decl::{AssociationMarker, AttributeDecl, DeclaredType, Marker, TypeDecl},
    schema::{app::TypeKind, db::ColumnKind},
    value::Type,
};
use std_util::prelude::*;
use support::{id, string};

fn person() -> TypeDecl {
    TypeDecl::entity("com.acme.Person")
        .attribute(id())
        .attribute(string("name"))
}

// ---------------------------------------------------------------------------
// Type resolution
// ---------------------------------------------------------------------------

#[test]
fn get_type_returns_the_same_type_every_time() {
    let metamodel = support::build([person()]);

    let first = assert_ok!(metamodel.get_type("com.acme.Person"));
    let second = assert_ok!(metamodel.get_type("com.acme.Person"));

    assert!(std::ptr::eq(first, second));
    assert_eq!(first.id, second.id);
    assert_eq!(first.kind, TypeKind::Entity);
}

#[test]
fn entity_name_defaults_to_simple_class_name() {
    let metamodel = support::build([person()]);

    let ty = assert_ok!(metamodel.get_type("com.acme.Person"));
    assert_eq!(ty.name, "Person");
    assert!(metamodel.app.entity("Person").is_some());
    assert_eq!(metamodel.table_for(ty).unwrap().name, "Person");
}

#[test]
fn unknown_class_is_not_persistent() {
    let metamodel = support::build([person()]);

    let err = assert_err!(metamodel.get_type("com.acme.Unknown"));
    assert!(err.is_not_persistent());
    assert!(!err.is_mapping());
    assert_eq!(
        err.to_string(),
        "class `com.acme.Unknown` is not a persistent type"
    );
}

#[test]
fn value_classes_become_basic_types() {
    let metamodel = support::build([person()]);

    let ty = assert_ok!(metamodel.get_type("i64"));
    assert!(ty.is_basic());
    assert_eq!(ty.basic_type(), Some(Type::I64));

    let name = metamodel
        .get_type("com.acme.Person")
        .unwrap()
        .attribute("name")
        .unwrap();
    assert_eq!(metamodel.app.ty(name.target).basic_type(), Some(Type::String));
}

#[test]
fn attribute_referencing_unknown_class() {
    let err = assert_err!(support::try_build([TypeDecl::entity("Order")
        .attribute(id())
        .attribute(AttributeDecl::new("item", DeclaredType::of("Widget")))]));

    assert!(err.is_mapping());
    assert!(err.is_not_persistent());
    assert_eq!(
        err.to_string(),
        "invalid mapping: attribute `Order::item` references `Widget`: \
         class `Widget` is not a persistent type"
    );
}

#[test]
fn class_declared_twice() {
    let err = assert_err!(support::try_build([person(), person()]));
    assert_eq!(
        err.to_string(),
        "invalid mapping: class `com.acme.Person` is declared twice"
    );
}

// ---------------------------------------------------------------------------
// Cycles
// ---------------------------------------------------------------------------

#[test]
fn mutually_referencing_entities_link() {
    let metamodel = support::build([
        TypeDecl::entity("A").attribute(id()).attribute(
            AttributeDecl::new("b", DeclaredType::of("B"))
                .marker(Marker::ManyToOne(AssociationMarker::new())),
        ),
        TypeDecl::entity("B").attribute(id()).attribute(
            AttributeDecl::new("a", DeclaredType::of("A"))
                .marker(Marker::OneToOne(AssociationMarker::new())),
        ),
    ]);

    let a = metamodel.get_type("A").unwrap();
    let b = metamodel.get_type("B").unwrap();

    let a_to_b = a.attribute("b").unwrap();
    let b_to_a = b.attribute("a").unwrap();

    assert!(std::ptr::eq(metamodel.app.ty(a_to_b.target), b));
    assert!(std::ptr::eq(metamodel.app.ty(b_to_a.target), a));

    assert_eq!(support::column_names(&metamodel, "A"), ["id", "b_id"]);
    assert_eq!(support::column_names(&metamodel, "B"), ["id", "a_id"]);
}

#[test]
fn self_referencing_entity_links() {
    let metamodel = support::build([TypeDecl::entity("Employee")
        .attribute(id())
        .attribute(
            AttributeDecl::new("manager", DeclaredType::of("Employee"))
                .marker(Marker::ManyToOne(AssociationMarker::new())),
        )
        .attribute(
            AttributeDecl::new("reports", DeclaredType::list_of("Employee")).marker(
                Marker::OneToMany(AssociationMarker::new().mapped_by("manager")),
            ),
        )]);

    let employee = metamodel.get_type("Employee").unwrap();
    let manager = employee.attribute("manager").unwrap();
    assert_eq!(manager.target, employee.id);

    let column = support::mapping(&metamodel, "Employee", "manager")
        .as_owner_singular()
        .unwrap()
        .columns[0];
    let column = metamodel.db.column(column);
    assert_eq!(column.name, "manager_id");
    assert!(matches!(column.kind, ColumnKind::Join { .. }));

    let reports = support::mapping(&metamodel, "Employee", "reports")
        .as_owned_plural()
        .unwrap();
    assert_eq!(reports.owner, manager.id);
}
