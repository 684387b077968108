use sqlx::{QueryBuilder, Sqlite};

use super::types::{Document, DocumentPatch, NewDocument};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::reorder::{SortKey, SortWrite};

const COLUMNS: &str = "id, title, code, user_code, sort_order, description, version, \
     date, status, type, color, google_docs_url, created_at, updated_at";

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// All documents in catalog order (sort_order, ties by id).
pub async fn find_all(pool: &DbPool) -> Result<Vec<Document>, AppError> {
    let docs = sqlx::query_as::<_, Document>(&format!(
        "SELECT {COLUMNS} FROM documents ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(docs)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(&format!(
        "SELECT {COLUMNS} FROM documents WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(doc)
}

/// Insert a document. The caller has already resolved `code` (generated or
/// user-supplied); a collision with an existing code surfaces as the
/// recoverable duplicate-code error and nothing is written.
pub async fn create(pool: &DbPool, doc: &NewDocument) -> Result<Document, AppError> {
    let created = sqlx::query_as::<_, Document>(&format!(
        "INSERT INTO documents \
             (title, code, user_code, sort_order, description, version, date, status, type, color, google_docs_url) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING {COLUMNS}"
    ))
    .bind(&doc.title)
    .bind(&doc.code)
    .bind(&doc.user_code)
    .bind(doc.sort_order)
    .bind(&doc.description)
    .bind(&doc.version)
    .bind(&doc.date)
    .bind(&doc.status)
    .bind(&doc.doc_type)
    .bind(doc.color.as_deref().unwrap_or("#3B82F6"))
    .bind(&doc.google_docs_url)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::DuplicateCode
        } else {
            AppError::Db(e)
        }
    })?;
    Ok(created)
}

/// Partial update: writes only the fields present in the patch and refreshes
/// updated_at. Returns None when the id does not exist.
pub async fn update(
    pool: &DbPool,
    id: i64,
    patch: &DocumentPatch,
) -> Result<Option<Document>, AppError> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "UPDATE documents SET updated_at = strftime('%Y-%m-%dT%H:%M:%S','now')",
    );
    if let Some(title) = &patch.title {
        qb.push(", title = ").push_bind(title);
    }
    if let Some(code) = &patch.code {
        qb.push(", code = ").push_bind(code);
    }
    if let Some(user_code) = &patch.user_code {
        qb.push(", user_code = ").push_bind(user_code);
    }
    if let Some(sort_order) = patch.sort_order {
        qb.push(", sort_order = ").push_bind(sort_order);
    }
    if let Some(description) = &patch.description {
        qb.push(", description = ").push_bind(description);
    }
    if let Some(version) = &patch.version {
        qb.push(", version = ").push_bind(version);
    }
    if let Some(date) = &patch.date {
        qb.push(", date = ").push_bind(date);
    }
    if let Some(status) = &patch.status {
        qb.push(", status = ").push_bind(status);
    }
    if let Some(doc_type) = &patch.doc_type {
        qb.push(", type = ").push_bind(doc_type);
    }
    if let Some(color) = &patch.color {
        qb.push(", color = ").push_bind(color);
    }
    if let Some(url) = &patch.google_docs_url {
        qb.push(", google_docs_url = ").push_bind(url);
    }
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING ").push(COLUMNS);

    qb.build_query_as::<Document>()
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateCode
            } else {
                AppError::Db(e)
            }
        })
}

/// Delete a document. Returns whether a row was removed.
pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &DbPool) -> Result<i64, AppError> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// Sort keys for one type-filtered list, in display order. This is the
/// reorder engine's input contract: ascending sort_order, ties by id.
pub async fn find_sort_keys(pool: &DbPool, doc_type: &str) -> Result<Vec<SortKey>, AppError> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT id, sort_order FROM documents WHERE type = ? ORDER BY sort_order, id",
    )
    .bind(doc_type)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(id, sort_order)| SortKey { id, sort_order })
        .collect())
}

/// Flush a reorder plan as one transaction: either every write lands or
/// none do, so the displayed order and the store cannot diverge.
pub async fn set_sort_orders(pool: &DbPool, writes: &[SortWrite]) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for write in writes {
        sqlx::query(
            "UPDATE documents \
             SET sort_order = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') \
             WHERE id = ?",
        )
        .bind(write.sort_order)
        .bind(write.id)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
