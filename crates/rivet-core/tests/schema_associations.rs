mod support;

use pretty_assertions::assert_eq;
use rivet_core::{
    decl::{
        AssociationMarker, AttributeDecl, CascadeType, DeclaredType, FetchType, JoinColumnDecl,
        JoinTableDecl, Marker, TypeDecl,
    },
    schema::{
        db::{ColumnKind, TableKind},
        mapping::{ElementMapping, MappingKind},
    },
    value::{Instance, InstanceRef},
    Session, Value,
};
use std_util::prelude::*;
use support::{id, string};

fn many_to_one(name: &str, target: &str) -> AttributeDecl {
    AttributeDecl::new(name, DeclaredType::of(target))
        .marker(Marker::ManyToOne(AssociationMarker::new()))
}

fn customer_orders(orders: AssociationMarker) -> Vec<TypeDecl> {
    vec![
        TypeDecl::entity("Customer").attribute(id()).attribute(
            AttributeDecl::new("orders", DeclaredType::list_of("Order"))
                .marker(Marker::OneToMany(orders)),
        ),
        TypeDecl::entity("Order")
            .attribute(id())
            .attribute(many_to_one("customer", "Customer")),
    ]
}

// ---------------------------------------------------------------------------
// Owner / owned tie-break
// ---------------------------------------------------------------------------

#[test]
fn mapped_by_alone_decides_ownership() {
    // Fetch, cascade and orphan removal do not influence which side owns.
    let markers = [
        AssociationMarker::new().mapped_by("customer"),
        AssociationMarker::new()
            .mapped_by("customer")
            .fetch(FetchType::Eager)
            .cascade([CascadeType::All])
            .orphan_removal(true),
    ];

    for marker in markers {
        let metamodel = support::build(customer_orders(marker));

        let orders = support::mapping(&metamodel, "Customer", "orders");
        assert_eq!(orders.kind(), MappingKind::OwnedOneToMany);
        assert!(!orders.is_owner());

        let customer = support::mapping(&metamodel, "Order", "customer");
        assert_eq!(customer.kind(), MappingKind::OwnerSingular);
        assert_eq!(orders.as_owned_plural().unwrap().owner, customer.attribute());

        // The inverse side adds no columns.
        assert_eq!(support::column_names(&metamodel, "Customer"), ["id"]);
        assert_eq!(support::column_names(&metamodel, "Order"), ["id", "customer_id"]);
    }
}

#[test]
fn owned_nodes_carry_fetch_and_orphan_removal() {
    let metamodel = support::build(customer_orders(AssociationMarker::new().mapped_by("customer")));
    let orders = support::mapping(&metamodel, "Customer", "orders")
        .as_owned_plural()
        .unwrap();
    assert!(!orders.eager);
    assert!(!orders.orphan_removal);

    let metamodel = support::build(customer_orders(
        AssociationMarker::new()
            .mapped_by("customer")
            .fetch(FetchType::Eager)
            .orphan_removal(true),
    ));
    let orders = support::mapping(&metamodel, "Customer", "orders")
        .as_owned_plural()
        .unwrap();
    assert!(orders.eager);
    assert!(orders.orphan_removal);

    let metamodel = support::build([
        TypeDecl::entity("Person").attribute(id()).attribute(
            AttributeDecl::new("passport", DeclaredType::of("Passport")).marker(Marker::OneToOne(
                AssociationMarker::new()
                    .mapped_by("holder")
                    .orphan_removal(true),
            )),
        ),
        TypeDecl::entity("Passport")
            .attribute(id())
            .attribute(
                AttributeDecl::new("holder", DeclaredType::of("Person"))
                    .marker(Marker::OneToOne(AssociationMarker::new())),
            ),
    ]);
    let passport = support::mapping(&metamodel, "Person", "passport")
        .as_owned_singular()
        .unwrap();
    assert!(passport.eager);
    assert!(passport.orphan_removal);
}

#[test]
fn blank_mapped_by_is_the_owning_side() {
    let metamodel = support::build(customer_orders(AssociationMarker::new().mapped_by("   ")));

    let orders = support::mapping(&metamodel, "Customer", "orders");
    assert_eq!(orders.kind(), MappingKind::OwnerOneToMany);

    let plural = orders.as_owner_plural().unwrap();
    let table = metamodel.db.table(plural.table);
    assert_eq!(table.name, "Customer_Order");
    assert!(matches!(table.kind, TableKind::Join(_)));
    assert_eq!(
        support::column_names(&metamodel, "Customer_Order"),
        ["Customer_id", "orders_id"]
    );
}

#[test]
fn inverse_one_to_one() {
    let metamodel = support::build([
        TypeDecl::entity("Person").attribute(id()).attribute(
            AttributeDecl::new("passport", DeclaredType::of("Passport"))
                .marker(Marker::OneToOne(AssociationMarker::new().mapped_by("holder"))),
        ),
        TypeDecl::entity("Passport").attribute(id()).attribute(
            AttributeDecl::new("holder", DeclaredType::of("Person"))
                .marker(Marker::OneToOne(AssociationMarker::new()))
                .join_column(JoinColumnDecl::named("PERSON_ID")),
        ),
    ]);

    let passport = support::mapping(&metamodel, "Person", "passport");
    assert_eq!(passport.kind(), MappingKind::OwnedSingular);

    let holder = support::mapping(&metamodel, "Passport", "holder");
    assert_eq!(passport.as_owned_singular().unwrap().owner, holder.attribute());
    assert_eq!(support::column_names(&metamodel, "Passport"), ["id", "PERSON_ID"]);
}

#[test]
fn many_to_many_sides() {
    let metamodel = support::build([
        TypeDecl::entity("Student").attribute(id()).attribute(
            AttributeDecl::new("courses", DeclaredType::set_of("Course"))
                .marker(Marker::ManyToMany(AssociationMarker::new()))
                .join_table(
                    JoinTableDecl::named("ENROLLMENT")
                        .join_column(JoinColumnDecl::named("STUDENT_ID"))
                        .inverse_join_column(JoinColumnDecl::named("COURSE_ID")),
                ),
        ),
        TypeDecl::entity("Course").attribute(id()).attribute(
            AttributeDecl::new("students", DeclaredType::set_of("Student"))
                .marker(Marker::ManyToMany(AssociationMarker::new().mapped_by("courses"))),
        ),
    ]);

    let courses = support::mapping(&metamodel, "Student", "courses");
    assert_eq!(courses.kind(), MappingKind::OwnerManyToMany);

    let students = support::mapping(&metamodel, "Course", "students");
    assert_eq!(students.kind(), MappingKind::OwnedManyToMany);
    assert_eq!(students.as_owned_plural().unwrap().owner, courses.attribute());

    let plural = courses.as_owner_plural().unwrap();
    assert_eq!(metamodel.db.table(plural.table).name, "ENROLLMENT");
    assert_eq!(
        support::column_names(&metamodel, "ENROLLMENT"),
        ["STUDENT_ID", "COURSE_ID"]
    );

    let ElementMapping::Entity { target, columns } = &plural.element else {
        panic!("expected entity elements, got {:?}", plural.element);
    };
    assert_eq!(*target, metamodel.get_type("Course").unwrap().id);
    assert_eq!(columns.len(), 1);
}

#[test]
fn join_columns_on_a_many_to_many_are_rejected() {
    let err = assert_err!(support::try_build([
        TypeDecl::entity("Student").attribute(id()).attribute(
            AttributeDecl::new("courses", DeclaredType::set_of("Course"))
                .marker(Marker::ManyToMany(AssociationMarker::new()))
                .join_column(JoinColumnDecl::named("STUDENT_REF")),
        ),
        TypeDecl::entity("Course").attribute(id()),
    ]));
    assert!(err.is_mapping());
    assert_eq!(
        err.to_string(),
        "invalid mapping: many-to-many `Student::courses` cannot declare join columns; \
         declare them on its join table"
    );
}

#[test]
fn join_columns_beside_a_join_table_are_rejected() {
    let err = assert_err!(support::try_build([
        TypeDecl::entity("Post").attribute(id()).attribute(
            AttributeDecl::new("comments", DeclaredType::list_of("Comment"))
                .marker(Marker::OneToMany(AssociationMarker::new()))
                .join_column(JoinColumnDecl::named("POST_REF"))
                .join_table(JoinTableDecl::named("POST_COMMENTS")),
        ),
        TypeDecl::entity("Comment").attribute(id()),
    ]));
    assert_eq!(
        err.to_string(),
        "invalid mapping: association `Post::comments` declares both join columns and a \
         join table; declare the owner columns on the join table"
    );
}

#[test]
fn one_to_many_with_join_column_stores_key_in_target_table() {
    let metamodel = support::build([
        TypeDecl::entity("Post").attribute(id()).attribute(
            AttributeDecl::new("comments", DeclaredType::list_of("Comment"))
                .marker(Marker::OneToMany(AssociationMarker::new()))
                .join_column(JoinColumnDecl::named("POST_ID")),
        ),
        TypeDecl::entity("Comment").attribute(id()).attribute(string("body")),
    ]);

    let comments = support::mapping(&metamodel, "Post", "comments")
        .as_owner_plural()
        .unwrap();

    assert_eq!(metamodel.db.table(comments.table).name, "Comment");
    assert_eq!(
        support::column_names(&metamodel, "Comment"),
        ["id", "POST_ID", "body"]
    );

    let column = metamodel.db.column(comments.owner_columns[0]);
    assert!(matches!(column.kind, ColumnKind::Key { .. }));
    assert_eq!(column.owner, metamodel.get_type("Post").unwrap().id);
}

// ---------------------------------------------------------------------------
// Inverse side validation
// ---------------------------------------------------------------------------

#[test]
fn mapped_by_must_name_an_attribute() {
    let err = assert_err!(support::try_build(customer_orders(
        AssociationMarker::new().mapped_by("buyer")
    )));
    assert_eq!(
        err.to_string(),
        "invalid mapping: `Customer::orders` is mapped by `Order::buyer`, which does not exist"
    );
}

#[test]
fn mapped_by_must_name_an_owning_side() {
    let err = assert_err!(support::try_build([
        TypeDecl::entity("Person").attribute(id()).attribute(
            AttributeDecl::new("passport", DeclaredType::of("Passport"))
                .marker(Marker::OneToOne(AssociationMarker::new().mapped_by("holder"))),
        ),
        TypeDecl::entity("Passport").attribute(id()).attribute(
            AttributeDecl::new("holder", DeclaredType::of("Person"))
                .marker(Marker::OneToOne(AssociationMarker::new().mapped_by("passport"))),
        ),
    ]));
    assert_eq!(
        err.to_string(),
        "invalid mapping: `Person::passport` is mapped by `Passport::holder`, which is not the \
         owning side of an association"
    );
}

#[test]
fn inverse_side_cannot_declare_join_columns() {
    let err = assert_err!(support::try_build([
        TypeDecl::entity("Customer").attribute(id()).attribute(
            AttributeDecl::new("orders", DeclaredType::list_of("Order"))
                .marker(Marker::OneToMany(AssociationMarker::new().mapped_by("customer")))
                .join_column(JoinColumnDecl::named("CUSTOMER_ID")),
        ),
        TypeDecl::entity("Order")
            .attribute(id())
            .attribute(many_to_one("customer", "Customer")),
    ]));
    assert_eq!(
        err.to_string(),
        "invalid mapping: inverse side `Customer::orders` cannot declare join columns or a \
         join table"
    );
}

// ---------------------------------------------------------------------------
// Join column value bridge
// ---------------------------------------------------------------------------

fn order_customer() -> rivet_core::Metamodel {
    support::build(customer_orders(AssociationMarker::new().mapped_by("customer")))
}

#[test]
fn join_column_reads_the_referenced_key() {
    let metamodel = order_customer();
    let session = Session::new(&metamodel);

    let column = support::mapping(&metamodel, "Order", "customer")
        .as_owner_singular()
        .unwrap()
        .columns[0];
    let column = metamodel.db.column(column);

    let customer = InstanceRef::new(Instance::new("Customer").with("id", 7i64));
    let order = Instance::new("Order").with("customer", Value::reference(&customer));
    assert_eq!(assert_ok!(column.get_value(&session, &order)), Value::from(7i64));

    let order = Instance::new("Order").with("customer", Value::hollow("Customer", 9i64));
    assert_eq!(assert_ok!(column.get_value(&session, &order)), Value::from(9i64));

    let order = Instance::new("Order");
    assert_eq!(assert_ok!(column.get_value(&session, &order)), Value::Null);
}

#[test]
fn join_column_writes_a_hollow_reference() {
    let metamodel = order_customer();
    let column = support::mapping(&metamodel, "Order", "customer")
        .as_owner_singular()
        .unwrap()
        .columns[0];
    let column = metamodel.db.column(column);

    let mut order = Instance::new("Order");
    assert_ok!(column.set_value(&mut order, Value::Null));
    assert_eq!(order.get("customer"), None);

    assert_ok!(column.set_value(&mut order, Value::from(9i64)));
    assert_eq!(order.get("customer"), Some(&Value::hollow("Customer", 9i64)));

    // Writing the key the reference already has keeps the loaded instance.
    let customer = InstanceRef::new(Instance::new("Customer").with("id", 7i64));
    let mut order = Instance::new("Order").with("customer", Value::reference(&customer));
    assert_ok!(column.set_value(&mut order, Value::from(7i64)));
    assert_eq!(order.get("customer"), Some(&Value::reference(&customer)));
}

#[test]
fn join_column_round_trips_a_reference_to_itself() {
    let metamodel = support::build([TypeDecl::entity("Employee")
        .attribute(id())
        .attribute(many_to_one("manager", "Employee"))]);
    let session = Session::new(&metamodel);

    let column = support::mapping(&metamodel, "Employee", "manager")
        .as_owner_singular()
        .unwrap()
        .columns[0];
    let column = metamodel.db.column(column);
    assert_eq!(column.name, "manager_id");

    let ceo = InstanceRef::new(Instance::new("Employee").with("id", 1i64));
    ceo.borrow_mut().set("manager", Value::reference(&ceo));

    let mut employee = ceo.borrow_mut();
    let read = assert_ok!(column.get_value(&session, &employee));
    assert_eq!(read, Value::from(1i64));

    assert_ok!(column.set_value(&mut employee, read));
    assert_eq!(employee.get("manager"), Some(&Value::reference(&ceo)));

    // A different key replaces the reference with a hollow one.
    assert_ok!(column.set_value(&mut employee, Value::from(2i64)));
    assert_eq!(employee.get("manager"), Some(&Value::hollow("Employee", 2i64)));
}

#[test]
fn join_column_rejects_a_referenced_instance_being_modified() {
    let metamodel = order_customer();
    let session = Session::new(&metamodel);

    let column = support::mapping(&metamodel, "Order", "customer")
        .as_owner_singular()
        .unwrap()
        .columns[0];
    let column = metamodel.db.column(column);

    let customer = InstanceRef::new(Instance::new("Customer").with("id", 7i64));
    let mut order = Instance::new("Order").with("customer", Value::reference(&customer));

    let _guard = customer.borrow_mut();
    let err = assert_err!(column.get_value(&session, &order));
    assert!(err.is_invalid_value());

    let err = assert_err!(column.set_value(&mut order, Value::from(8i64)));
    assert!(err.is_invalid_value());
    assert_eq!(order.get("customer"), Some(&Value::reference(&customer)));
}

#[test]
fn join_table_key_columns_read_owner_keys() {
    let metamodel = support::build(customer_orders(AssociationMarker::new()));
    let session = Session::new(&metamodel);

    let orders = support::mapping(&metamodel, "Customer", "orders")
        .as_owner_plural()
        .unwrap();
    let owner = metamodel.db.column(orders.owner_columns[0]);

    let customer = Instance::new("Customer").with("id", 3i64);
    assert_eq!(assert_ok!(owner.get_value(&session, &customer)), Value::from(3i64));

    let err = assert_err!(owner.get_value(&session, &Instance::new("Order")));
    assert!(err.is_invalid_value());
}
