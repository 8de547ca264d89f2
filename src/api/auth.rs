//! HTTP Basic authentication for the admin routes.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::warn;

use crate::config::AdminCredentials;

use super::response::ApiError;
use super::state::AppState;

const WWW_AUTHENTICATE_VALUE: &str = "Basic realm=\"admin\"";

/// Middleware that rejects requests without valid admin credentials.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = basic_credentials(request.headers())
        .is_some_and(|(username, password)| {
            credentials_match(state.credentials(), &username, &password)
        });

    if authorized {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "Admin authentication failed");
        unauthorized()
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(WWW_AUTHENTICATE_VALUE),
        )],
        Json(ApiError::unauthorized()),
    )
        .into_response()
}

/// Extracts `(username, password)` from a `Basic` authorization header.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn credentials_match(expected: &AdminCredentials, username: &str, password: &str) -> bool {
    // Both comparisons always run.
    let username_ok = constant_time_eq(username.as_bytes(), expected.username.as_bytes());
    let password_ok = constant_time_eq(password.as_bytes(), expected.password.as_bytes());
    username_ok & password_ok
}

/// Compares two byte strings without branching on their contents.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_basic_credentials_decoded() {
        let encoded = STANDARD.encode("adminTax:admin!");
        let headers = headers_with(&format!("Basic {}", encoded));
        assert_eq!(
            basic_credentials(&headers),
            Some(("adminTax".to_string(), "admin!".to_string()))
        );
    }

    #[test]
    fn test_password_may_contain_colon() {
        let encoded = STANDARD.encode("admin:pa:ss");
        let headers = headers_with(&format!("basic {}", encoded));
        assert_eq!(
            basic_credentials(&headers),
            Some(("admin".to_string(), "pa:ss".to_string()))
        );
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
        assert_eq!(basic_credentials(&headers_with("Bearer token")), None);
        assert_eq!(basic_credentials(&headers_with("Basic !!!")), None);
        let no_colon = STANDARD.encode("adminTax");
        assert_eq!(
            basic_credentials(&headers_with(&format!("Basic {}", no_colon))),
            None
        );
    }

    #[test]
    fn test_credentials_match() {
        let expected = AdminCredentials::new("admin", "correct");
        assert!(credentials_match(&expected, "admin", "correct"));
        assert!(!credentials_match(&expected, "admin", "wrong"));
        assert!(!credentials_match(&expected, "other", "correct"));
        assert!(!credentials_match(&expected, "admin", "correct!"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"", b""));
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
