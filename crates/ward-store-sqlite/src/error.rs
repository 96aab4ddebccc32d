//! Error type for `ward-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The UNIQUE index on `email` rejected a write.
  #[error("email {0} is already in use")]
  DuplicateEmail(String),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Forward the business-meaningful variant; box the rest as opaque backend
/// failure.
impl From<Error> for ward_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::DuplicateEmail(email) => ward_core::Error::DuplicateEmail(email),
      other => ward_core::Error::Storage(Box::new(other)),
    }
  }
}
