//! Tests for the display-subset predicate: tab match, case-insensitive
//! search, status filter, and the stable sort_order ordering.

use tmf_catalog::models::document::Document;
use tmf_catalog::models::document::filter::{StatusFilter, filter_documents};

fn doc(id: i64, title: &str, code: &str, doc_type: &str, status: &str, sort_order: i64) -> Document {
    Document {
        id,
        title: title.to_string(),
        code: code.to_string(),
        user_code: None,
        sort_order,
        description: format!("{title} — opis"),
        version: "v.1.0".to_string(),
        date: "15.01.2025".to_string(),
        status: status.to_string(),
        doc_type: doc_type.to_string(),
        color: "#3B82F6".to_string(),
        google_docs_url: String::new(),
        created_at: "2025-01-15T10:00:00".to_string(),
        updated_at: "2025-01-15T10:00:00".to_string(),
    }
}

fn sample() -> Vec<Document> {
    vec![
        doc(1, "Procedura Kwalifikacji", "SOP-001", "SOP", "Aktualna", 0),
        doc(2, "Procedura Randomizacji", "SOP-002", "SOP", "Archiwalna", 1),
        doc(3, "Monitoring Bezpieczeństwa", "SOP-003", "SOP", "Aktualna", 2),
        doc(4, "Protokół Główny", "PROT-001", "Protokoły Badania", "Aktualna", 0),
        doc(5, "Protokół Poprawiony", "PROT-002", "Protokoły Badania", "Archiwalna", 1),
    ]
}

#[test]
fn test_tab_and_status_filters_combine() {
    // Tab narrows to same-type documents only
    let sop = filter_documents(sample(), Some("SOP"), "", StatusFilter::All);
    assert_eq!(sop.len(), 3);
    assert!(sop.iter().all(|d| d.doc_type == "SOP"));

    // Within the tab, `current` keeps exactly the Aktualna documents
    let current = filter_documents(sample(), Some("SOP"), "", StatusFilter::Current);
    let ids: Vec<i64> = current.iter().map(|d| d.id).collect();
    assert_eq!(ids, [1, 3]);

    let archived = filter_documents(sample(), Some("SOP"), "", StatusFilter::Archived);
    let ids: Vec<i64> = archived.iter().map(|d| d.id).collect();
    assert_eq!(ids, [2]);
}

#[test]
fn test_tab_match_is_exact() {
    let none = filter_documents(sample(), Some("sop"), "", StatusFilter::All);
    assert!(none.is_empty(), "tab matching is case-sensitive equality");

    let all = filter_documents(sample(), None, "", StatusFilter::All);
    assert_eq!(all.len(), 5);
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    // Title
    let hits = filter_documents(sample(), Some("SOP"), "randomizacji", StatusFilter::All);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);

    // Code
    let hits = filter_documents(sample(), Some("SOP"), "sop-003", StatusFilter::All);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 3);

    // User code, when present
    let mut docs = sample();
    docs[0].user_code = Some("QA-77".to_string());
    let hits = filter_documents(docs, Some("SOP"), "qa-77", StatusFilter::All);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);

    // Description
    let hits = filter_documents(sample(), Some("SOP"), "OPIS", StatusFilter::All);
    assert_eq!(hits.len(), 3);

    // Empty term matches everything in the tab
    let hits = filter_documents(sample(), Some("SOP"), "", StatusFilter::All);
    assert_eq!(hits.len(), 3);
}

#[test]
fn test_all_three_predicates_are_anded() {
    let hits = filter_documents(sample(), Some("SOP"), "procedura", StatusFilter::Current);
    let ids: Vec<i64> = hits.iter().map(|d| d.id).collect();
    // "Procedura Randomizacji" matches tab+search but is Archiwalna
    assert_eq!(ids, [1]);
}

#[test]
fn test_result_is_sorted_by_sort_order() {
    let mut docs = sample();
    docs[0].sort_order = 9;
    let hits = filter_documents(docs, Some("SOP"), "", StatusFilter::All);
    let ids: Vec<i64> = hits.iter().map(|d| d.id).collect();
    assert_eq!(ids, [2, 3, 1]);
}

#[test]
fn test_sort_is_stable_on_ties() {
    let docs = vec![
        doc(1, "A", "SOP-001", "SOP", "Aktualna", 0),
        doc(2, "B", "SOP-002", "SOP", "Aktualna", 0),
        doc(3, "C", "SOP-003", "SOP", "Aktualna", 0),
    ];
    let hits = filter_documents(docs, Some("SOP"), "", StatusFilter::All);
    let ids: Vec<i64> = hits.iter().map(|d| d.id).collect();
    assert_eq!(ids, [1, 2, 3], "equal sort_order keeps fetch order");
}

#[test]
fn test_status_filter_parsing() {
    assert_eq!(StatusFilter::parse("all"), Some(StatusFilter::All));
    assert_eq!(StatusFilter::parse("current"), Some(StatusFilter::Current));
    assert_eq!(StatusFilter::parse("archived"), Some(StatusFilter::Archived));
    assert_eq!(StatusFilter::parse("Aktualna"), None);
    assert_eq!(StatusFilter::parse(""), None);
}
