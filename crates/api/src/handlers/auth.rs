//! Admin login handler.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use safegear_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::session::{self, COOKIE_NAME};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /api/v1/auth/login
///
/// Checks the shared admin password and sets the signed session cookie.
/// An empty configured password disables login entirely.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let admin = &state.config.admin;
    if admin.password.is_empty() || req.password != admin.password {
        return Err(AppError::Core(CoreError::Unauthorized(
            "비밀번호가 틀렸습니다.".into(),
        )));
    }

    let token = session::issue_token(&admin.cookie_secret, chrono::Utc::now().timestamp_millis());
    let cookie = format!(
        "{COOKIE_NAME}={token}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        admin.session_ttl_secs
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({ "ok": true })),
    ))
}
