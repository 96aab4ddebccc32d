//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! The only place status codes are chosen. Every error body is structured
//! JSON: the field→message violation map for validation failures, a
//! `{"message": ...}` object for everything else. Unclassified failures are
//! logged with full detail and answered with a generic body so no internal
//! detail leaks.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;
use ward_core::{service::ServiceError, validate::Violations};

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// 400 with the field→message map as the body.
  #[error("validation failed")]
  Validation(Violations),

  #[error("Email {0} is already in use")]
  EmailConflict(String),

  #[error("Patient {0} NOT FOUND")]
  NotFound(Uuid),

  /// Unreadable request: malformed JSON body or an unusable path segment.
  #[error("{0}")]
  Malformed(String),

  #[error("An internal error occurred")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ServiceError> for ApiError {
  fn from(err: ServiceError) -> Self {
    match err {
      ServiceError::Validation(violations) => ApiError::Validation(violations),
      ServiceError::EmailAlreadyExists(email) => ApiError::EmailConflict(email),
      ServiceError::PatientNotFound(id) => ApiError::NotFound(id),
      ServiceError::Internal(source) => ApiError::Internal(source),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(violations) => {
        tracing::warn!(violations = violations.len(), "request failed validation");
        (StatusCode::BAD_REQUEST, Json(violations)).into_response()
      }
      ApiError::Internal(source) => {
        tracing::error!(error = ?source, "unexpected error");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "message": "An internal error occurred" })),
        )
          .into_response()
      }
      other => {
        let status = match other {
          ApiError::NotFound(_) => StatusCode::NOT_FOUND,
          _ => StatusCode::BAD_REQUEST,
        };
        let message = other.to_string();
        tracing::warn!(status = status.as_u16(), %message, "request rejected");
        (status, Json(json!({ "message": message }))).into_response()
      }
    }
  }
}
