//! Authentication middleware for bearer token validation

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::ApiError, jwt::Claims, state::AppState};

/// Identity decoded from a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
///
/// Returns `None` when the header is absent or has no token part; a
/// present-but-bogus token is the caller's problem to verify.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.split(' ').nth(1).filter(|t| !t.is_empty())
}

/// Guard for protected routes
///
/// A missing token yields 401, a failing verification 403. On success the
/// decoded identity is attached to the request for handlers to read.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = bearer_token(auth_header).ok_or(ApiError::MissingToken)?;

    let claims = state
        .jwt_service
        .validate_token(token)
        .map_err(|_| ApiError::InvalidToken)?;

    req.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracts_token() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn test_bearer_token_scheme_only() {
        assert_eq!(bearer_token(Some("Bearer")), None);
        assert_eq!(bearer_token(Some("Bearer ")), None);
    }

    #[test]
    fn test_bearer_token_ignores_scheme_word() {
        // the token part is taken as-is; verification decides its fate
        assert_eq!(bearer_token(Some("Token abc")), Some("abc"));
    }
}
