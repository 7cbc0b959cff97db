//! Account routes. Responses never include the password hash.

use super::{ApiError, AppState};
use crate::service::Registration;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

const INTERNAL: &str = "Internal server error";

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// ── POST /api/auth/register ──

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Registration>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(form) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let user = state
        .users
        .register(form)
        .await
        .map_err(|e| ApiError::from_user(e, INTERNAL))?;
    Ok(Json(json!({ "success": true, "user": user })))
}

// ── POST /api/auth/login ──

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let user = state
        .users
        .login(&req.email, &req.password)
        .await
        .map_err(|e| ApiError::from_user(e, INTERNAL))?;
    Ok(Json(json!({ "success": true, "user": user })))
}

// ── GET /api/admin/users ──

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let users = state
        .users
        .list_users()
        .await
        .map_err(|e| ApiError::from_user(e, "Failed to fetch users"))?;
    Ok(Json(json!({ "users": users })))
}
