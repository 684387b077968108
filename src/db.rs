use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::models::document::types::NewDocument;
use crate::models::document_type::types::NewDocumentType;
use crate::models::{document, document_type, user};

pub type DbPool = SqlitePool;

pub const MIGRATIONS: &str = include_str!("schema.sql");

const TYPES_SEED: &str = include_str!("../data/seed/document_types.json");
const DEMO_SEED: &str = include_str!("../data/seed/demo_documents.json");

pub async fn init_pool(database_path: &str) -> DbPool {
    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
        .expect("Failed to create DB pool")
}

pub async fn run_migrations(pool: &DbPool) {
    sqlx::raw_sql(MIGRATIONS)
        .execute(pool)
        .await
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

#[derive(serde::Deserialize)]
struct TypesSeed {
    #[serde(rename = "documentTypes")]
    document_types: Vec<NewDocumentType>,
}

#[derive(serde::Deserialize)]
struct DocumentsSeed {
    documents: Vec<NewDocument>,
}

/// Seed the fixed document types and the admin user if the database is empty.
pub async fn seed_catalog(pool: &DbPool, admin_password_hash: &str) {
    let type_count = document_type::queries::count(pool)
        .await
        .expect("Failed to count document types for seeding");
    if type_count == 0 {
        let seed: TypesSeed =
            serde_json::from_str(TYPES_SEED).expect("Bad document type seed JSON");
        for doc_type in &seed.document_types {
            document_type::queries::create(pool, doc_type)
                .await
                .unwrap_or_else(|e| panic!("Seed type {}: {e}", doc_type.name));
        }
        log::info!("Seeded {} document types", seed.document_types.len());
    } else {
        log::info!("Document types already seeded ({type_count}), skipping");
    }

    if user::find_by_username(pool, "admin")
        .await
        .expect("Failed to look up admin user")
        .is_none()
    {
        user::create(pool, "admin", admin_password_hash)
            .await
            .expect("Failed to create admin user");
        log::info!("Created admin user");
    }
}

/// Seed demo documents (sample SOPs, protocols, CRFs, regulatory filings).
/// Skipped when any documents already exist.
pub async fn seed_demo(pool: &DbPool) {
    let existing = document::queries::count(pool)
        .await
        .expect("Failed to count documents for demo seed");
    if existing > 0 {
        log::info!("Documents already present ({existing}), skipping demo seed");
        return;
    }

    let seed: DocumentsSeed = serde_json::from_str(DEMO_SEED).expect("Bad demo seed JSON");
    let mut created = 0usize;
    for doc in &seed.documents {
        match document::queries::create(pool, doc).await {
            Ok(_) => created += 1,
            Err(e) => log::warn!("Demo seed {}: {e}", doc.code),
        }
    }
    log::info!("Demo seed complete: created={created}");
}
