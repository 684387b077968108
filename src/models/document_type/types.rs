use serde::{Deserialize, Serialize};

use crate::validate::{validate_optional, validate_required};

/// A document category: `name` is the stable technical identifier,
/// `display_name` the tab label, which is also the value documents
/// reference in their `type` field.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DocumentType {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub sort_order: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocumentType {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
}

impl NewDocumentType {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let checks = [
            validate_required(&self.name, "Name", 100),
            validate_required(&self.display_name, "Display name", 255),
            validate_optional(self.description.as_deref().unwrap_or(""), "Description", 10_000),
        ];
        errors.extend(checks.into_iter().flatten());
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypePatch {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i64>,
}

impl DocumentTypePatch {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let checks = [
            self.name
                .as_deref()
                .and_then(|v| validate_required(v, "Name", 100)),
            self.display_name
                .as_deref()
                .and_then(|v| validate_required(v, "Display name", 255)),
            self.description
                .as_deref()
                .and_then(|v| validate_optional(v, "Description", 10_000)),
        ];
        errors.extend(checks.into_iter().flatten());
        errors
    }
}
