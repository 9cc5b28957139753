// Cookie-token sessions over the store's credential lookup.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::storage::Storage;

use super::AppState;

const SESSION_COOKIE: &str = "registrar_session";

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Bearer header first, then the session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            return Some(token.trim().to_string());
        }
    }
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .storage
        .user_by_credentials(&req.username, &req.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid username or password".to_string()))?;

    let token = Uuid::new_v4().to_string();
    state
        .sessions
        .write()
        .await
        .insert(token.clone(), user.id);
    info!("User {} logged in", user.username);

    let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse { token, user }),
    ))
}

pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Json<User>> {
    let token = session_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("missing session token".to_string()))?;
    let user_id = state
        .sessions
        .read()
        .await
        .get(&token)
        .copied()
        .ok_or_else(|| AppError::Unauthorized("invalid session token".to_string()))?;
    let user = state
        .storage
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("session user no longer exists".to_string()))?;
    Ok(Json(user))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(token) = session_token(&headers) {
        state.sessions.write().await.remove(&token);
    }
    Ok(Json(json!({"logged_out": true})))
}
