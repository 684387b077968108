use std::net::{IpAddr, Ipv4Addr};

use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::auth::{password, rate_limit::RateLimiter, session as auth_session};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login - verify credentials and open a session.
pub async fn login(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    session: Session,
    limiter: web::Data<RateLimiter>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // Rate-limit check BEFORE any database access
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        return Ok(HttpResponse::TooManyRequests().json(serde_json::json!({
            "error": "Too many failed login attempts. Please try again later."
        })));
    }

    let found = user::find_by_username(&pool, body.username.trim()).await?;
    let Some(account) = found else {
        limiter.record_failure(ip);
        return Ok(invalid_credentials());
    };
    if !password::verify_password(&body.password, &account.password)? {
        limiter.record_failure(ip);
        return Ok(invalid_credentials());
    }

    limiter.clear(ip);
    session.renew();
    session
        .insert("user_id", account.id)
        .map_err(|e| AppError::Session(e.to_string()))?;
    session
        .insert("username", account.username.clone())
        .map_err(|e| AppError::Session(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": account.id,
        "username": account.username,
    })))
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "Invalid username or password"
    }))
}

/// POST /api/auth/logout - drop the session.
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/auth/session - the currently authenticated user.
pub async fn current(session: Session) -> Result<HttpResponse, AppError> {
    match (
        auth_session::get_user_id(&session),
        auth_session::get_username(&session),
    ) {
        (Some(id), Some(username)) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "id": id,
            "username": username,
        }))),
        _ => Err(AppError::Unauthorized),
    }
}
