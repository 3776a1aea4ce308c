use chrono::{Local, NaiveDate};
use deskboard_core::{
    Document, Filters, Issue, IssueStatus, Priority, PriorityFilter, Theme, Todo,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_issue(title: &str, priority: Priority) -> Issue {
    Issue::new(title, priority, date(2024, 3, 1))
}

#[test]
fn default_document_is_canonical_empty_state() {
    let doc = Document::default();

    assert!(doc.issues.is_empty());
    assert!(doc.todos.is_empty());
    assert_eq!(doc.theme, Theme::Light);
    assert_eq!(doc.current_date, Local::now().date_naive());
    assert_eq!(doc.filters.priority, PriorityFilter::All);
    assert!(doc.filters.search.is_empty());
}

#[test]
fn document_roundtrip_is_deep_equal() {
    let mut doc = Document::default();
    let mut issue = sample_issue("Roundtrip", Priority::Critical);
    issue.description = "with description".to_string();
    issue.due_date = Some(date(2024, 4, 1));
    issue.status = IssueStatus::InProgress;
    issue.source_url = Some("https://example.com/42".to_string());
    doc.issues.push(issue);
    doc.todos
        .insert(date(2024, 3, 1), vec![Todo::new("write tests")]);
    doc.theme = Theme::Dark;
    doc.current_date = date(2024, 3, 2);
    doc.filters.priority = PriorityFilter::High;
    doc.filters.search = "round".to_string();

    let body = serde_json::to_string(&doc).unwrap();
    let decoded: Document = serde_json::from_str(&body).unwrap();
    assert_eq!(decoded, doc);
}

#[test]
fn document_serialization_uses_expected_wire_fields() {
    let mut doc = Document::default();
    doc.current_date = date(2024, 3, 1);
    let issue_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut issue = Issue::with_id(issue_id, "Wire shape", Priority::Critical, date(2024, 2, 28));
    issue.status = IssueStatus::InProgress;
    doc.issues.push(issue);
    doc.todos
        .insert(date(2024, 3, 1), vec![Todo::new("bucket entry")]);

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["currentDate"], "2024-03-01");
    assert_eq!(json["theme"], "light");
    assert_eq!(json["filters"]["priority"], "all");
    assert_eq!(json["filters"]["search"], "");
    assert_eq!(json["issues"][0]["id"], issue_id.to_string());
    assert_eq!(json["issues"][0]["status"], "in-progress");
    assert_eq!(json["issues"][0]["priority"], "critical");
    assert_eq!(json["issues"][0]["createdAt"], "2024-02-28");
    assert_eq!(json["todos"]["2024-03-01"][0]["completed"], false);
}

#[test]
fn locally_created_issue_omits_optional_wire_fields() {
    let json = serde_json::to_value(sample_issue("Local", Priority::Low)).unwrap();
    let object = json.as_object().unwrap();
    assert!(!object.contains_key("sourceUrl"));
    assert!(!object.contains_key("dueDate"));
}

#[test]
fn missing_fields_merge_against_canonical_default() {
    let decoded: Document = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();

    assert_eq!(decoded.theme, Theme::Dark);
    assert!(decoded.issues.is_empty());
    assert!(decoded.todos.is_empty());
    assert_eq!(decoded.filters, Filters::default());
}

#[test]
fn unknown_fields_are_tolerated_on_load() {
    let decoded: Document =
        serde_json::from_str(r#"{"issues":[],"futureField":{"nested":true}}"#).unwrap();
    assert!(decoded.issues.is_empty());
}

#[test]
fn priority_filter_admits_all_or_exact_match() {
    assert!(PriorityFilter::All.admits(Priority::Low));
    assert!(PriorityFilter::All.admits(Priority::Critical));
    assert!(PriorityFilter::High.admits(Priority::High));
    assert!(!PriorityFilter::High.admits(Priority::Medium));
}

#[test]
fn filters_match_title_and_description_case_insensitively() {
    let mut issue = sample_issue("Fix LOGIN page", Priority::Medium);
    issue.description = "Session cookie expires".to_string();

    let title_hit = Filters {
        priority: PriorityFilter::All,
        search: "login".to_string(),
    };
    let description_hit = Filters {
        priority: PriorityFilter::All,
        search: "COOKIE".to_string(),
    };
    let miss = Filters {
        priority: PriorityFilter::All,
        search: "payments".to_string(),
    };
    let wrong_priority = Filters {
        priority: PriorityFilter::Critical,
        search: "login".to_string(),
    };

    assert!(title_hit.matches(&issue));
    assert!(description_hit.matches(&issue));
    assert!(!miss.matches(&issue));
    assert!(!wrong_priority.matches(&issue));
}

#[test]
fn empty_search_matches_everything() {
    let filters = Filters::default();
    assert!(filters.matches(&sample_issue("anything", Priority::Low)));
}
