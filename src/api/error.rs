//! # API Errors
//!
//! Every failure the façade can report, with its HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::product_actor::ProductError;
use crate::query::QueryError;
use crate::validation::{InvalidId, ValidationError};

/// Result type for façade operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request could not be parsed (bad id, invalid JSON)
    #[error("{0}")]
    MalformedRequest(String),

    /// Rejected list parameters
    #[error("{0}")]
    InvalidQuery(#[from] QueryError),

    /// A field rule was violated
    #[error("{0}")]
    ValidationFailed(#[from] ValidationError),

    /// No product with that id
    #[error("Product not found")]
    NotFound,

    /// No route for the request
    #[error("Not found")]
    UnknownRoute,

    /// Known path, unsupported method
    #[error("Method not allowed")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Unexpected fault; the detail is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UnknownRoute => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<InvalidId> for ApiError {
    fn from(err: InvalidId) -> Self {
        ApiError::MalformedRequest(err.to_string())
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => ApiError::NotFound,
            ProductError::ActorCommunicationError(detail) => ApiError::Internal(detail),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!(error = %detail, "Request failed");
        }
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(InvalidId).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(QueryError::InvertedPriceRange).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ValidationError::EmptyPatch).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_pass_through() {
        assert_eq!(ApiError::from(InvalidId).public_message(), "Invalid id");
        assert_eq!(
            ApiError::from(ValidationError::NameRequired).public_message(),
            "Name is required"
        );
        assert_eq!(ApiError::NotFound.public_message(), "Product not found");
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = ApiError::from(ProductError::ActorCommunicationError(
            "Actor closed".to_string(),
        ));
        assert_eq!(err, ApiError::Internal("Actor closed".to_string()));
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::from(ProductError::NotFound("product_3".to_string()));
        assert_eq!(err, ApiError::NotFound);
    }
}
