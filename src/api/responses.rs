// Response types for API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::core::errors::{AuthError, ServerError};

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errno: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Outcome of the delete-account settings endpoint
#[derive(Debug, Serialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// API error type that converts domain errors to HTTP responses
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errno: Option<u32>,
    pub request_id: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            errno: None,
            request_id: None,
        }
    }

    /// Create from ServerError
    pub fn from_server_error(err: ServerError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let errno = match &err {
            ServerError::Auth(auth_err) => Some(auth_err.errno()),
            _ => None,
        };
        Self {
            status,
            message: err.user_message(),
            errno,
            request_id: None,
        }
    }

    /// Create from ServerError with request ID
    pub fn from_server_error_with_id(err: ServerError, request_id: String) -> Self {
        let mut api_error = Self::from_server_error(err);
        api_error.request_id = Some(request_id);
        api_error
    }

    /// Create from AuthError with request ID
    pub fn from_auth_error_with_id(err: AuthError, request_id: String) -> Self {
        Self::from_server_error_with_id(ServerError::Auth(err), request_id)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            errno: self.errno,
            request_id: self.request_id,
        });
        (self.status, body).into_response()
    }
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        ApiError::from_server_error(err)
    }
}
