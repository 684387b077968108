use std::collections::{HashMap, HashSet};

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::parse_id;
use crate::auth::session::require_user;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::document_type::queries;
use crate::models::document_type::types::{DocumentTypePatch, NewDocumentType};
use crate::models::reorder;

/// GET /api/document-types - list all types in tab order.
pub async fn list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let types = queries::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(types))
}

/// GET /api/document-types/{id} - fetch a single type.
pub async fn read(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let doc_type = queries::find_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(doc_type))
}

/// POST /api/document-types - create a type.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<NewDocumentType>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;

    let doc_type = body.into_inner();
    let errors = doc_type.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let created = queries::create(&pool, &doc_type).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PATCH /api/document-types/{id} - partial update. A display-name change
/// also relabels the documents referencing the old name.
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<String>,
    body: web::Json<DocumentTypePatch>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;

    let id = parse_id(&path)?;
    let patch = body.into_inner();
    let errors = patch.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let updated = queries::update(&pool, id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/document-types/{id} - delete a type. Documents keep their
/// type label; nothing cascades.
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;

    let id = parse_id(&path)?;
    if !queries::delete(&pool, id).await? {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::NoContent().finish())
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    /// Type ids in their staged display order.
    pub order: Vec<i64>,
}

/// POST /api/document-types/reorder - flush a staged tab arrangement: the
/// body carries every type id in its final position. The arrangement must be
/// a permutation of the current tab list; changed rows are renumbered in one
/// transaction. Returns the reordered list.
pub async fn reorder(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<ReorderRequest>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;

    let req = body.into_inner();
    let entries = queries::find_sort_keys(&pool).await?;
    if req.order.len() != entries.len() {
        return Err(AppError::Validation(vec![format!(
            "Order must list all {} document types exactly once",
            entries.len()
        )]));
    }

    let by_id: HashMap<i64, reorder::SortKey> = entries.iter().map(|e| (e.id, *e)).collect();
    let mut seen = HashSet::new();
    let mut arrangement = Vec::with_capacity(req.order.len());
    for id in &req.order {
        if !seen.insert(*id) {
            return Err(AppError::Validation(vec![format!(
                "Document type id {id} appears more than once"
            )]));
        }
        match by_id.get(id) {
            Some(entry) => arrangement.push(*entry),
            None => {
                return Err(AppError::Validation(vec![format!(
                    "Unknown document type id {id}"
                )]));
            }
        }
    }

    let writes = reorder::renumber(&arrangement);
    if !writes.is_empty() {
        queries::set_sort_orders(&pool, &writes).await?;
    }

    let types = queries::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(types))
}
