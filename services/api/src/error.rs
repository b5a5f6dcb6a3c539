//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::repositories::{CartStoreError, UserStoreError};

/// Custom error type for the API service
///
/// Every variant maps to a status code and a `{"message": ...}` JSON
/// body; unexpected causes are logged server-side and never leaked.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid input or credentials
    #[error("{0}")]
    BadRequest(String),

    /// No bearer token on a protected route
    #[error("Authentication token required.")]
    MissingToken,

    /// Bearer token present but unverifiable or expired
    #[error("Invalid or expired token.")]
    InvalidToken,

    /// Cart or item absent
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure; details stay server-side
    #[error("Internal server error.")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<UserStoreError> for ApiError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::DuplicateEmail => ApiError::BadRequest(err.to_string()),
            other => {
                error!("User store error: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<CartStoreError> for ApiError {
    fn from(err: CartStoreError) -> Self {
        match err {
            CartStoreError::CartNotFound | CartStoreError::ItemNotFound => {
                ApiError::NotFound(err.to_string())
            }
            other => {
                error!("Cart store error: {}", other);
                ApiError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                ApiError::BadRequest("Invalid credentials.".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::MissingToken, StatusCode::UNAUTHORIZED),
            (ApiError::InvalidToken, StatusCode::FORBIDDEN),
            (
                ApiError::NotFound("Cart not found.".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_not_found_messages_map_from_cart_store() {
        let err: ApiError = CartStoreError::CartNotFound.into();
        assert_eq!(err.to_string(), "Cart not found.");

        let err: ApiError = CartStoreError::ItemNotFound.into();
        assert_eq!(err.to_string(), "Item not found in cart.");
    }

    #[test]
    fn test_duplicate_email_maps_to_bad_request() {
        let err: ApiError = UserStoreError::DuplicateEmail.into();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.to_string(), "Email already registered.");
    }
}
