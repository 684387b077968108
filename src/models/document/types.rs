use serde::{Deserialize, Serialize};

use crate::validate::{validate_optional, validate_required, validate_status};

pub const STATUS_CURRENT: &str = "Aktualna";
pub const STATUS_ARCHIVED: &str = "Archiwalna";

/// A catalog record describing a document held in the external document
/// service. `doc_type` stores the document type's display name.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub code: String,
    pub user_code: Option<String>,
    pub sort_order: i64,
    pub description: String,
    pub version: String,
    pub date: String,
    pub status: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub doc_type: String,
    pub color: String,
    pub google_docs_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input shape for document creation. A blank `code` requests generation;
/// `color` and `googleDocsUrl` fall back to their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub title: String,
    #[serde(default)]
    pub code: String,
    pub user_code: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    pub description: String,
    pub version: String,
    pub date: String,
    pub status: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub color: Option<String>,
    #[serde(default)]
    pub google_docs_url: String,
}

impl NewDocument {
    /// Fill in a generated system code when the caller left it blank.
    pub fn resolve_code(&mut self, epoch_millis: i64) {
        if self.code.trim().is_empty() {
            self.code = generate_code(&self.doc_type, epoch_millis);
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let checks = [
            validate_required(&self.title, "Title", 500),
            validate_optional(&self.code, "Code", 100),
            validate_optional(self.user_code.as_deref().unwrap_or(""), "User code", 200),
            validate_required(&self.description, "Description", 10_000),
            validate_required(&self.version, "Version", 50),
            validate_required(&self.date, "Date", 50),
            validate_required(&self.status, "Status", 50),
            validate_required(&self.doc_type, "Type", 50),
            validate_optional(self.color.as_deref().unwrap_or(""), "Color", 7),
            validate_status(&self.status),
        ];
        errors.extend(checks.into_iter().flatten());
        errors
    }
}

/// Partial update; only present fields are written. `sortOrder`-only patches
/// are the immediate (per-drag) document reorder path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub code: Option<String>,
    pub user_code: Option<String>,
    pub sort_order: Option<i64>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub color: Option<String>,
    pub google_docs_url: Option<String>,
}

impl DocumentPatch {
    /// Validate exactly the fields present. A blank value for a required
    /// field is rejected; `code` may not be blanked either, since generation
    /// only happens at creation.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let checks = [
            self.title
                .as_deref()
                .and_then(|v| validate_required(v, "Title", 500)),
            self.code
                .as_deref()
                .and_then(|v| validate_required(v, "Code", 100)),
            self.user_code
                .as_deref()
                .and_then(|v| validate_optional(v, "User code", 200)),
            self.description
                .as_deref()
                .and_then(|v| validate_required(v, "Description", 10_000)),
            self.version
                .as_deref()
                .and_then(|v| validate_required(v, "Version", 50)),
            self.date
                .as_deref()
                .and_then(|v| validate_required(v, "Date", 50)),
            self.status
                .as_deref()
                .and_then(|v| validate_required(v, "Status", 50).or_else(|| validate_status(v))),
            self.doc_type
                .as_deref()
                .and_then(|v| validate_required(v, "Type", 50)),
            self.color
                .as_deref()
                .and_then(|v| validate_optional(v, "Color", 7)),
        ];
        errors.extend(checks.into_iter().flatten());
        errors
    }
}

/// Build a system code for a document created without one:
/// `ARI-` + first three characters of the uppercased type + the last six
/// digits of the creation time in epoch milliseconds. Collisions within a
/// millisecond are possible; the unique constraint on `documents.code`
/// backstops them as a recoverable duplicate-code error.
pub fn generate_code(doc_type: &str, epoch_millis: i64) -> String {
    let prefix: String = doc_type.to_uppercase().chars().take(3).collect();
    format!("ARI-{prefix}-{:06}", epoch_millis.rem_euclid(1_000_000))
}
