use rivet::{
    decl::{AttributeDecl, DeclaredType, TypeDecl},
    schema::NamingStrategy,
    Instance, PersistenceUnit, Value,
};
use std::{
    sync::{Arc, Barrier, Once},
    thread,
};
use std_util::prelude::*;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        use tracing_subscriber::{filter::EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

fn person() -> TypeDecl {
    TypeDecl::entity("Person")
        .attribute(AttributeDecl::new("id", DeclaredType::of("i64")).id())
        .attribute(AttributeDecl::new("name", DeclaredType::of("String")))
}

fn unit() -> PersistenceUnit {
    init_tracing();
    PersistenceUnit::builder("crm").register(person()).build()
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[test]
fn bootstrap_builds_once() {
    let unit = unit();
    assert!(!unit.is_bootstrapped());

    let first = assert_ok!(unit.bootstrap());
    let second = assert_ok!(unit.bootstrap());
    assert!(Arc::ptr_eq(&first, &second));

    let metamodel = assert_ok!(unit.metamodel());
    assert!(Arc::ptr_eq(&first, &metamodel));
    assert!(unit.is_bootstrapped());
    assert_eq!(unit.name(), "crm");
}

#[test]
fn clones_share_the_metamodel() {
    let unit = unit();
    let clone = unit.clone();

    let metamodel = assert_ok!(unit.bootstrap());
    assert!(clone.is_bootstrapped());
    assert!(Arc::ptr_eq(&metamodel, &assert_ok!(clone.metamodel())));
}

#[test]
fn metamodel_requires_bootstrap() {
    let unit = unit();

    let err = assert_err!(unit.metamodel());
    assert!(err.is_illegal_state());
    assert_eq!(
        err.to_string(),
        "illegal state: persistence unit `crm` has not been bootstrapped"
    );

    assert!(assert_err!(unit.session()).is_illegal_state());
}

#[test]
fn failed_bootstrap_is_cached() {
    init_tracing();
    let unit = PersistenceUnit::builder("broken")
        .register(TypeDecl::entity("Orphan").attribute(AttributeDecl::new(
            "name",
            DeclaredType::of("String"),
        )))
        .build();

    let err = assert_err!(unit.bootstrap());
    assert!(err.is_mapping());
    assert_eq!(
        err.to_string(),
        "persistence unit `broken` failed to bootstrap: invalid mapping: entity `Orphan` \
         declares no identifier"
    );

    let again = assert_err!(unit.bootstrap());
    assert_eq!(again.to_string(), err.to_string());

    assert!(!unit.is_bootstrapped());
    assert!(assert_err!(unit.metamodel()).is_mapping());
}

#[test]
fn builder_options_reach_the_metamodel() {
    init_tracing();
    let unit = PersistenceUnit::builder("crm")
        .register(person())
        .table_name_prefix("crm_")
        .naming_strategy(NamingStrategy::UpperSnakeCase)
        .build();

    let metamodel = assert_ok!(unit.bootstrap());
    let table = metamodel.db.table_by_name("crm_PERSON").unwrap();
    let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["ID", "NAME"]);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[test]
fn session_reads_through_the_metamodel() {
    let unit = unit();
    assert_ok!(unit.bootstrap());

    let session = assert_ok!(unit.session());
    let metamodel = session.metamodel();

    let person = metamodel.get_type("Person").unwrap();
    let name = metamodel
        .mapping_for(person)
        .and_then(|root| root.get_mapping("name"))
        .and_then(|node| node.as_basic())
        .unwrap();
    let column = metamodel.db.column(name.column);

    let instance = Instance::new("Person").with("id", 7i64).with("name", "Ada");
    assert_eq!(assert_ok!(column.get_value(&session, &instance)), Value::from("Ada"));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn unit_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PersistenceUnit>();
}

#[test]
fn concurrent_bootstrap_observes_one_metamodel() {
    let unit = unit();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let unit = unit.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                unit.bootstrap().unwrap()
            })
        })
        .collect();

    let metamodels: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for metamodel in &metamodels[1..] {
        assert!(Arc::ptr_eq(&metamodels[0], metamodel));
    }
}
