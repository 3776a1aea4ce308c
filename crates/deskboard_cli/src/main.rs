//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `deskboard_core` wiring end to
//!   end against an in-memory database.
//! - Keep output deterministic for quick local sanity checks.

use deskboard_core::db::open_db_in_memory;
use deskboard_core::{
    IssueService, NewIssueRequest, Priority, SqliteDocumentSlot, Store, TodoService,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let slot = SqliteDocumentSlot::try_new(&conn)?;
    let mut store = Store::initialize(slot)?;

    store.subscribe(|doc| {
        println!(
            "document changed: issues={} todo_dates={}",
            doc.issues.len(),
            doc.todos.len()
        );
    });

    let today = store.document().current_date;
    let issue_id = IssueService::new(&mut store).add_issue(NewIssueRequest {
        priority: Priority::High,
        ..NewIssueRequest::titled("Smoke-test the board")
    })?;
    TodoService::new(&mut store).add_todo("Review the board", today)?;

    println!("deskboard_core version={}", deskboard_core::core_version());
    println!("created issue {issue_id} dated {today}");
    Ok(())
}
