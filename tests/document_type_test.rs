//! Integration tests for document-type CRUD (the model functions the
//! /api/document-types handlers call), including the display-name rename
//! reconciliation and the no-cascade delete.

use tmf_catalog::errors::AppError;
use tmf_catalog::models::document::queries as documents;
use tmf_catalog::models::document_type::queries;
use tmf_catalog::models::document_type::types::{DocumentTypePatch, NewDocumentType};

mod common;
use common::{create_document, create_document_type, setup_test_db};

#[tokio::test]
async fn test_create_and_list_in_tab_order() {
    let db = setup_test_db().await;
    let pool = db.pool();

    create_document_type(pool, "regulatory", "Dokumenty Regulacyjne", 2).await;
    create_document_type(pool, "sop", "Standardowe Procedury Operacyjne", 0).await;
    create_document_type(pool, "crf", "Formularze CRF", 1).await;

    let types = queries::find_all(pool).await.expect("list");
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["sop", "crf", "regulatory"]);
}

#[tokio::test]
async fn test_equal_sort_orders_keep_insertion_order() {
    let db = setup_test_db().await;
    let pool = db.pool();

    create_document_type(pool, "first", "Pierwszy", 0).await;
    create_document_type(pool, "second", "Drugi", 0).await;

    let types = queries::find_all(pool).await.expect("list");
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["first", "second"]);
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let result = queries::find_by_id(pool, 999_999).await.expect("query");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_duplicate_name_is_recoverable_conflict() {
    let db = setup_test_db().await;
    let pool = db.pool();

    create_document_type(pool, "sop", "Standardowe Procedury Operacyjne", 0).await;

    let err = queries::create(
        pool,
        &NewDocumentType {
            name: "sop".to_string(),
            display_name: "Inna etykieta".to_string(),
            description: None,
            sort_order: 1,
        },
    )
    .await
    .expect_err("duplicate name must fail");
    assert!(
        matches!(err, AppError::DuplicateName),
        "expected DuplicateName, got {err}"
    );

    let types = queries::find_all(pool).await.expect("list");
    assert_eq!(types.len(), 1);
}

#[tokio::test]
async fn test_patch_description_only() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let created = create_document_type(pool, "sop", "Standardowe Procedury Operacyjne", 0).await;

    let patch = DocumentTypePatch {
        description: Some("Procedury badania".to_string()),
        ..Default::default()
    };
    let updated = queries::update(pool, created.id, &patch)
        .await
        .expect("update")
        .expect("not found");
    assert_eq!(updated.description.as_deref(), Some("Procedury badania"));
    assert_eq!(updated.display_name, created.display_name);
    assert_eq!(updated.name, created.name);
}

#[tokio::test]
async fn test_display_name_rename_relabels_documents() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let sop = create_document_type(pool, "sop", "SOP", 0).await;
    create_document_type(pool, "crf", "CRF", 1).await;

    create_document(pool, "Procedura A", "SOP-001", "SOP", 0).await;
    create_document(pool, "Procedura B", "SOP-002", "SOP", 1).await;
    create_document(pool, "Formularz", "CRF-001", "CRF", 0).await;

    let patch = DocumentTypePatch {
        display_name: Some("Standardowe Procedury Operacyjne".to_string()),
        ..Default::default()
    };
    queries::update(pool, sop.id, &patch)
        .await
        .expect("update")
        .expect("not found");

    // Documents under the renamed tab follow it; other tabs are untouched
    let docs = documents::find_all(pool).await.expect("list");
    let sop_docs: Vec<&str> = docs
        .iter()
        .filter(|d| d.doc_type == "Standardowe Procedury Operacyjne")
        .map(|d| d.code.as_str())
        .collect();
    assert_eq!(sop_docs, ["SOP-001", "SOP-002"]);
    assert!(docs.iter().all(|d| d.doc_type != "SOP"));
    assert_eq!(docs.iter().filter(|d| d.doc_type == "CRF").count(), 1);
}

#[tokio::test]
async fn test_patch_without_rename_leaves_documents_alone() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let sop = create_document_type(pool, "sop", "SOP", 0).await;
    create_document(pool, "Procedura A", "SOP-001", "SOP", 0).await;

    // Same display name in the patch: no relabel pass
    let patch = DocumentTypePatch {
        display_name: Some("SOP".to_string()),
        sort_order: Some(4),
        ..Default::default()
    };
    queries::update(pool, sop.id, &patch)
        .await
        .expect("update")
        .expect("not found");

    let docs = documents::find_all(pool).await.expect("list");
    assert_eq!(docs[0].doc_type, "SOP");
}

#[tokio::test]
async fn test_delete_does_not_cascade_to_documents() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let sop = create_document_type(pool, "sop", "SOP", 0).await;
    create_document(pool, "Procedura A", "SOP-001", "SOP", 0).await;

    assert!(queries::delete(pool, sop.id).await.expect("delete"));
    assert!(
        queries::find_by_id(pool, sop.id)
            .await
            .expect("query")
            .is_none()
    );

    // The document survives with its (now dangling) type label
    let docs = documents::find_all(pool).await.expect("list");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].doc_type, "SOP");
}

#[tokio::test]
async fn test_patch_not_found() {
    let db = setup_test_db().await;
    let pool = db.pool();

    let patch = DocumentTypePatch {
        sort_order: Some(1),
        ..Default::default()
    };
    let result = queries::update(pool, 999_999, &patch).await.expect("query");
    assert!(result.is_none());
}

#[test]
fn test_new_document_type_validation() {
    let input = NewDocumentType {
        name: String::new(),
        display_name: "  ".to_string(),
        description: None,
        sort_order: 0,
    };
    let errors = input.validate();
    assert!(errors.iter().any(|e| e.contains("Name")));
    assert!(errors.iter().any(|e| e.contains("Display name")));
}
