//! Error types for `ward-core`.
//!
//! [`Error`] is the store-boundary taxonomy: the two conditions a backend
//! can surface that carry business meaning, plus an opaque variant for
//! everything else. Backends map their own failures into it; the service
//! layer classifies it further into [`ServiceError`](crate::service::ServiceError).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A write would leave two records sharing an email.
  #[error("email {0} is already in use")]
  DuplicateEmail(String),

  /// Backend failure with no business meaning. Never shown to clients.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
