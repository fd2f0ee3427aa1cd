use super::error::ApiError;
use super::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::warn;

/// Proof that the request carried the configured admin bearer token.
///
/// With no token configured every admin request is refused.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

#[async_trait]
impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            warn!("Admin request refused, no admin token configured");
            return Err(ApiError::Unauthorized);
        };
        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);
        match presented {
            Some(token) if tokens_match(token.as_bytes(), expected.as_bytes()) => Ok(AdminGuard),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

/// Compares every byte regardless of where the first mismatch is. Only the
/// length can leak through timing.
fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match_whole_value_only() {
        assert!(tokens_match(b"s3cret-token", b"s3cret-token"));
        assert!(!tokens_match(b"s3cret-tokeN", b"s3cret-token"));
        assert!(!tokens_match(b"X3cret-token", b"s3cret-token"));
        assert!(!tokens_match(b"s3cret", b"s3cret-token"));
        assert!(!tokens_match(b"s3cret-token-extra", b"s3cret-token"));
        assert!(!tokens_match(b"", b"s3cret-token"));
    }
}
