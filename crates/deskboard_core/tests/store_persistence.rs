use deskboard_core::db::open_db_in_memory;
use deskboard_core::{
    Document, DocumentSlot, IssueService, NewIssueRequest, SqliteDocumentSlot, Store, StoreError,
    Theme,
};
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

fn persisted_document(conn: &Connection) -> Document {
    let slot = SqliteDocumentSlot::try_new(conn).unwrap();
    let body = slot
        .load()
        .unwrap()
        .expect("slot should hold a persisted document");
    serde_json::from_str(&body).unwrap()
}

#[test]
fn initialize_on_empty_slot_persists_the_default_document() {
    let conn = open_db_in_memory().unwrap();
    let store = Store::initialize(SqliteDocumentSlot::try_new(&conn).unwrap()).unwrap();

    assert_eq!(&persisted_document(&conn), store.document());
    assert!(store.document().issues.is_empty());
}

#[test]
fn mutate_notifies_listeners_in_registration_order_with_full_document() {
    let conn = open_db_in_memory().unwrap();
    let mut store = Store::initialize(SqliteDocumentSlot::try_new(&conn).unwrap()).unwrap();

    let calls: Rc<RefCell<Vec<(&'static str, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let first = Rc::clone(&calls);
    store.subscribe(move |doc| first.borrow_mut().push(("first", doc.issues.len())));
    let second = Rc::clone(&calls);
    store.subscribe(move |doc| second.borrow_mut().push(("second", doc.issues.len())));

    IssueService::new(&mut store)
        .add_issue(NewIssueRequest::titled("Observe me"))
        .unwrap();

    assert_eq!(calls.borrow().as_slice(), [("first", 1), ("second", 1)]);
}

#[test]
fn mutation_is_persisted_whole() {
    let conn = open_db_in_memory().unwrap();
    let mut store = Store::initialize(SqliteDocumentSlot::try_new(&conn).unwrap()).unwrap();

    IssueService::new(&mut store)
        .add_issue(NewIssueRequest::titled("Persist me"))
        .unwrap();

    let persisted = persisted_document(&conn);
    assert_eq!(&persisted, store.document());
    assert_eq!(persisted.issues[0].title, "Persist me");
}

#[test]
fn reinitialize_restores_the_persisted_document() {
    let conn = open_db_in_memory().unwrap();
    let mut store = Store::initialize(SqliteDocumentSlot::try_new(&conn).unwrap()).unwrap();
    IssueService::new(&mut store)
        .add_issue(NewIssueRequest::titled("Survives restart"))
        .unwrap();
    let before = store.document().clone();
    drop(store);

    let reopened = Store::initialize(SqliteDocumentSlot::try_new(&conn).unwrap()).unwrap();
    assert_eq!(reopened.document(), &before);
}

#[test]
fn corrupt_body_falls_back_to_default_and_is_rewritten() {
    let conn = open_db_in_memory().unwrap();
    SqliteDocumentSlot::try_new(&conn)
        .unwrap()
        .save("{not valid json")
        .unwrap();

    let store = Store::initialize(SqliteDocumentSlot::try_new(&conn).unwrap()).unwrap();

    assert!(store.document().issues.is_empty());
    // The slot now holds a well-formed document again.
    assert_eq!(&persisted_document(&conn), store.document());
}

#[test]
fn partial_body_merges_field_by_field_against_default() {
    let conn = open_db_in_memory().unwrap();
    SqliteDocumentSlot::try_new(&conn)
        .unwrap()
        .save(r#"{"theme":"dark","unknownField":1}"#)
        .unwrap();

    let store = Store::initialize(SqliteDocumentSlot::try_new(&conn).unwrap()).unwrap();

    assert_eq!(store.document().theme, Theme::Dark);
    assert!(store.document().issues.is_empty());
    assert!(store.document().filters.search.is_empty());
}

#[test]
fn slot_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteDocumentSlot::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        other => panic!("expected UninitializedConnection, got {other:?}"),
    }
}

#[test]
fn file_backed_slot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("deskboard.sqlite3");

    {
        let conn = deskboard_core::db::open_db(&db_path).unwrap();
        let mut store = Store::initialize(SqliteDocumentSlot::try_new(&conn).unwrap()).unwrap();
        IssueService::new(&mut store)
            .add_issue(NewIssueRequest::titled("On disk"))
            .unwrap();
    }

    let conn = deskboard_core::db::open_db(&db_path).unwrap();
    let store = Store::initialize(SqliteDocumentSlot::try_new(&conn).unwrap()).unwrap();
    assert_eq!(store.document().issues[0].title, "On disk");
}
