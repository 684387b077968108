pub mod document_types;
pub mod documents;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use crate::errors::AppError;
use crate::handlers::auth_handlers;

/// CSRF protection for REST API mutation endpoints.
///
/// Rejects POST/PATCH/DELETE requests that don't have Content-Type:
/// application/json. Browsers cannot send cross-origin JSON with cookies via
/// simple form POST — the Content-Type check acts as a CSRF guard without
/// requiring tokens. GET requests are exempt (read-only, no state changes).
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PATCH
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Parse a path id segment; a non-numeric id is a 400, not a 404.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::InvalidId)
}

/// Configure the /api routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/documents")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            // /reorder BEFORE /{id} to avoid routing conflict
            .route("/reorder", web::post().to(documents::reorder))
            .route("", web::get().to(documents::list))
            .route("", web::post().to(documents::create))
            .route("/{id}", web::get().to(documents::read))
            .route("/{id}", web::patch().to(documents::update))
            .route("/{id}", web::delete().to(documents::delete)),
    );
    cfg.service(
        web::scope("/document-types")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/reorder", web::post().to(document_types::reorder))
            .route("", web::get().to(document_types::list))
            .route("", web::post().to(document_types::create))
            .route("/{id}", web::get().to(document_types::read))
            .route("/{id}", web::patch().to(document_types::update))
            .route("/{id}", web::delete().to(document_types::delete)),
    );
    cfg.service(
        web::scope("/auth")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/login", web::post().to(auth_handlers::login))
            .route("/logout", web::post().to(auth_handlers::logout))
            .route("/session", web::get().to(auth_handlers::current)),
    );
}
