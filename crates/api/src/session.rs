//! Admin session gate: a single HMAC-signed flag cookie.
//!
//! Login compares the submitted password to the configured one and sets
//! `admin_session = ok.<issued-millis>.<hmac>`. The [`AdminSession`]
//! extractor verifies the signature and expiry; handlers that take it as
//! a parameter are unreachable without a valid cookie. There are no user
//! accounts — the flag is the whole session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use safegear_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the signed admin flag.
pub const COOKIE_NAME: &str = "admin_session";

type HmacSha256 = Hmac<Sha256>;

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

fn sign(payload: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Issue a session token for the given issue time (unix millis).
pub fn issue_token(secret: &str, issued_at_millis: i64) -> String {
    let payload = format!("ok.{issued_at_millis}");
    let signature = sign(&payload, secret);
    format!("{payload}.{signature}")
}

/// Verify a session token's shape, signature, and age.
pub fn verify_token(token: &str, secret: &str, ttl_secs: u64, now_millis: i64) -> bool {
    let mut parts = token.splitn(3, '.');
    let (Some(flag), Some(issued), Some(signature)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if flag != "ok" {
        return false;
    }
    let Ok(issued_at) = issued.parse::<i64>() else {
        return false;
    };

    // Constant-time signature check via the Mac verifier, not a string
    // compare of the hex forms.
    let Some(sig_bytes) = hex_decode(signature) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{flag}.{issued}").as_bytes());
    if mac.verify_slice(&sig_bytes).is_err() {
        return false;
    }

    let age_millis = now_millis.saturating_sub(issued_at);
    age_millis >= 0 && age_millis <= (ttl_secs as i64).saturating_mul(1000)
}

/// Proof that the request carried a valid admin session cookie.
///
/// Use as an extractor parameter on any admin handler:
///
/// ```ignore
/// async fn delete(_session: AdminSession, ...) -> AppResult<StatusCode> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized =
            || AppError::Core(CoreError::Unauthorized("관리자 로그인이 필요합니다.".into()));

        let cookies = parts
            .headers
            .get("cookie")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = cookies
            .split(';')
            .filter_map(|c| c.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .map(|(_, value)| value)
            .ok_or_else(unauthorized)?;

        let admin = &state.config.admin;
        let now = chrono::Utc::now().timestamp_millis();
        if verify_token(token, &admin.cookie_secret, admin.session_ttl_secs, now) {
            Ok(AdminSession)
        } else {
            Err(unauthorized())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const TTL: u64 = 60 * 60 * 24 * 7;

    #[test]
    fn issued_token_verifies() {
        let now = 1_700_000_000_000;
        let token = issue_token(SECRET, now);
        assert!(verify_token(&token, SECRET, TTL, now));
        assert!(verify_token(&token, SECRET, TTL, now + 1000));
    }

    #[test]
    fn tampered_token_fails() {
        let now = 1_700_000_000_000;
        let token = issue_token(SECRET, now);
        let tampered = token.replace("ok.", "ok2.");
        assert!(!verify_token(&tampered, SECRET, TTL, now));
        assert!(!verify_token(&token, "other-secret", TTL, now));
    }

    #[test]
    fn forged_timestamp_fails_signature() {
        let now = 1_700_000_000_000;
        let token = issue_token(SECRET, now);
        let signature = token.rsplit('.').next().unwrap();
        let forged = format!("ok.{}.{signature}", now + 999);
        assert!(!verify_token(&forged, SECRET, TTL, now));
    }

    #[test]
    fn expired_token_fails() {
        let issued = 1_700_000_000_000;
        let token = issue_token(SECRET, issued);
        let after_expiry = issued + (TTL as i64) * 1000 + 1;
        assert!(!verify_token(&token, SECRET, TTL, after_expiry));
    }

    #[test]
    fn signature_hex_is_case_insensitive() {
        // The signature is compared as bytes, so hex casing is irrelevant.
        let now = 1_700_000_000_000;
        let token = issue_token(SECRET, now);
        let upper = token.to_uppercase().replace("OK", "ok");
        assert!(verify_token(&upper, SECRET, TTL, now));
    }

    #[test]
    fn malformed_signature_hex_fails() {
        let now = 1_700_000_000_000;
        assert!(!verify_token(&format!("ok.{now}.abc"), SECRET, TTL, now));
        assert!(!verify_token(&format!("ok.{now}.zz"), SECRET, TTL, now));
        assert!(!verify_token(&format!("ok.{now}.서명"), SECRET, TTL, now));
    }

    #[test]
    fn garbage_tokens_fail() {
        assert!(!verify_token("", SECRET, TTL, 0));
        assert!(!verify_token("ok", SECRET, TTL, 0));
        assert!(!verify_token("ok.notanumber.sig", SECRET, TTL, 0));
    }
}
