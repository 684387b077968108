//! Shared test infrastructure for model layer tests.
//!
//! Tests run against a temporary SQLite database: schema from the crate's
//! migrations, no seed data, one database per test.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

use tmf_catalog::db::{DbPool, MIGRATIONS};
use tmf_catalog::models::document::Document;
use tmf_catalog::models::document::queries as documents;
use tmf_catalog::models::document::types::NewDocument;
use tmf_catalog::models::document_type::queries as document_types;
use tmf_catalog::models::document_type::types::{DocumentType, NewDocumentType};

/// Temporary database. The TempDir must stay alive for the pool to remain
/// valid, so both travel together.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

pub async fn setup_test_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .expect("Failed to open test DB");

    sqlx::raw_sql(MIGRATIONS)
        .execute(&pool)
        .await
        .expect("Failed to run migrations");

    TestDb { _dir: dir, pool }
}

/// A valid document input with the given identity; remaining fields get
/// plausible fixed values.
pub fn new_document(title: &str, code: &str, doc_type: &str, sort_order: i64) -> NewDocument {
    NewDocument {
        title: title.to_string(),
        code: code.to_string(),
        user_code: None,
        sort_order,
        description: format!("{title} — opis testowy"),
        version: "v.1.0".to_string(),
        date: "15.01.2025".to_string(),
        status: "Aktualna".to_string(),
        doc_type: doc_type.to_string(),
        color: None,
        google_docs_url: String::new(),
    }
}

pub async fn create_document(
    pool: &DbPool,
    title: &str,
    code: &str,
    doc_type: &str,
    sort_order: i64,
) -> Document {
    documents::create(pool, &new_document(title, code, doc_type, sort_order))
        .await
        .expect("create document")
}

pub async fn create_document_type(
    pool: &DbPool,
    name: &str,
    display_name: &str,
    sort_order: i64,
) -> DocumentType {
    document_types::create(
        pool,
        &NewDocumentType {
            name: name.to_string(),
            display_name: display_name.to_string(),
            description: None,
            sort_order,
        },
    )
    .await
    .expect("create document type")
}
