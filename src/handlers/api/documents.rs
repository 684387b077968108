use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use super::parse_id;
use crate::auth::session::require_user;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::document::filter::{StatusFilter, filter_documents};
use crate::models::document::queries;
use crate::models::document::types::{DocumentPatch, NewDocument};
use crate::models::reorder;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    doc_type: Option<String>,
    search: Option<String>,
    status: Option<String>,
}

/// GET /api/documents - list documents, optionally narrowed by type tab,
/// search term, and status filter; always in sort_order.
pub async fn list(
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let status = match query.status.as_deref() {
        None => StatusFilter::All,
        Some(value) => StatusFilter::parse(value).ok_or_else(|| {
            AppError::Validation(vec![
                "Status filter must be one of: all, current, archived".to_string(),
            ])
        })?,
    };

    let docs = queries::find_all(&pool).await?;
    let docs = filter_documents(
        docs,
        query.doc_type.as_deref(),
        query.search.as_deref().unwrap_or(""),
        status,
    );
    Ok(HttpResponse::Ok().json(docs))
}

/// GET /api/documents/{id} - fetch a single document.
pub async fn read(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let doc = queries::find_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(doc))
}

/// POST /api/documents - create a document. A blank code is replaced with a
/// generated system code before the insert.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<NewDocument>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;

    let mut doc = body.into_inner();
    let errors = doc.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    doc.resolve_code(Utc::now().timestamp_millis());

    let created = queries::create(&pool, &doc).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PATCH /api/documents/{id} - partial update; this is also the immediate
/// per-drag sort-order path.
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<String>,
    body: web::Json<DocumentPatch>,
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

/// DELETE /api/documents/{id} - delete; final, no soft-delete.
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
    #[serde(rename = "type")]
    pub doc_type: String,
    pub source: usize,
    pub destination: usize,
}

/// POST /api/documents/reorder - move one document within its type-filtered
/// list and persist the resulting dense order in a single transaction.
/// Returns the reordered list.
pub async fn reorder(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<ReorderRequest>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;

    let req = body.into_inner();
    let entries = queries::find_sort_keys(&pool, &req.doc_type).await?;

    let mut errors = Vec::new();
    if req.source >= entries.len() {
        errors.push(format!("Source index {} is out of range", req.source));
    }
    if req.destination >= entries.len() {
        errors.push(format!("Destination index {} is out of range", req.destination));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let writes = reorder::plan_move(&entries, req.source, Some(req.destination));
    if !writes.is_empty() {
        queries::set_sort_orders(&pool, &writes).await?;
    }

    let docs = queries::find_all(&pool).await?;
    let docs = filter_documents(docs, Some(&req.doc_type), "", StatusFilter::All);
    Ok(HttpResponse::Ok().json(docs))
}
