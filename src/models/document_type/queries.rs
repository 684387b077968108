use sqlx::{QueryBuilder, Sqlite};

use super::types::{DocumentType, DocumentTypePatch, NewDocumentType};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::reorder::{SortKey, SortWrite};

const COLUMNS: &str = "id, name, display_name, description, sort_order, created_at, updated_at";

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// All document types in tab order (sort_order, ties by id).
pub async fn find_all(pool: &DbPool) -> Result<Vec<DocumentType>, AppError> {
    let types = sqlx::query_as::<_, DocumentType>(&format!(
        "SELECT {COLUMNS} FROM document_types ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(types)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<DocumentType>, AppError> {
    let doc_type = sqlx::query_as::<_, DocumentType>(&format!(
        "SELECT {COLUMNS} FROM document_types WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(doc_type)
}

pub async fn create(pool: &DbPool, doc_type: &NewDocumentType) -> Result<DocumentType, AppError> {
    let created = sqlx::query_as::<_, DocumentType>(&format!(
        "INSERT INTO document_types (name, display_name, description, sort_order) \
         VALUES (?, ?, ?, ?) \
         RETURNING {COLUMNS}"
    ))
    .bind(&doc_type.name)
    .bind(&doc_type.display_name)
    .bind(&doc_type.description)
    .bind(doc_type.sort_order)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::DuplicateName
        } else {
            AppError::Db(e)
        }
    })?;
    Ok(created)
}

/// Partial update. A display_name change also rewrites the `type` field of
/// every document referencing the old label, in the same transaction, so a
/// rename cannot orphan documents from their tab. Returns None when the id
/// does not exist.
pub async fn update(
    pool: &DbPool,
    id: i64,
    patch: &DocumentTypePatch,
) -> Result<Option<DocumentType>, AppError> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, DocumentType>(&format!(
        "SELECT {COLUMNS} FROM document_types WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;
    let Some(existing) = existing else {
        return Ok(None);
    };

    let mut qb = QueryBuilder::<Sqlite>::new(
        "UPDATE document_types SET updated_at = strftime('%Y-%m-%dT%H:%M:%S','now')",
    );
    if let Some(name) = &patch.name {
        qb.push(", name = ").push_bind(name);
    }
    if let Some(display_name) = &patch.display_name {
        qb.push(", display_name = ").push_bind(display_name);
    }
    if let Some(description) = &patch.description {
        qb.push(", description = ").push_bind(description);
    }
    if let Some(sort_order) = patch.sort_order {
        qb.push(", sort_order = ").push_bind(sort_order);
    }
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING ").push(COLUMNS);

    let updated = qb
        .build_query_as::<DocumentType>()
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateName
            } else {
                AppError::Db(e)
            }
        })?;

    if let Some(new_label) = &patch.display_name {
        if *new_label != existing.display_name {
            sqlx::query(
                "UPDATE documents \
                 SET type = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') \
                 WHERE type = ?",
            )
            .bind(new_label)
            .bind(&existing.display_name)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(Some(updated))
}

/// Delete a document type. Documents referencing its display name are left
/// in place; the reference is soft and deletion does not cascade.
pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM document_types WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &DbPool) -> Result<i64, AppError> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM document_types")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// Sort keys for the tab list, in display order.
pub async fn find_sort_keys(pool: &DbPool) -> Result<Vec<SortKey>, AppError> {
    let rows: Vec<(i64, i64)> =
        sqlx::query_as("SELECT id, sort_order FROM document_types ORDER BY sort_order, id")
            .fetch_all(pool)
            .await?;
    Ok(rows
        .into_iter()
        .map(|(id, sort_order)| SortKey { id, sort_order })
        .collect())
}

/// Flush a staged tab arrangement as one transaction.
pub async fn set_sort_orders(pool: &DbPool, writes: &[SortWrite]) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for write in writes {
        sqlx::query(
            "UPDATE document_types \
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
