//! The `PatientStore` trait.
//!
//! Implemented by storage backends (e.g. `ward-store-sqlite`). Higher layers
//! depend on this abstraction, not on any concrete backend.
//!
//! Absence is an ordinary result here: `find_*` and `update` return `None`
//! for a missing id, and `delete_by_id` is idempotent. The only
//! business-meaningful failure a backend raises is
//! [`Error::DuplicateEmail`](crate::Error::DuplicateEmail), and it must be
//! detected atomically with the write — two concurrent creates must not both
//! see an email as free.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  patient::{NewPatient, Patient, PatientUpdate},
};

/// Abstraction over a patient record store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PatientStore: Send + Sync {
  /// Assign a fresh id, persist, and return the stored record.
  ///
  /// Fails with [`Error::DuplicateEmail`](crate::Error::DuplicateEmail) if
  /// another record already owns the email; the check is atomic with the
  /// insert.
  fn insert(
    &self,
    new: NewPatient,
  ) -> impl Future<Output = Result<Patient>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Patient>>> + Send + '_;

  /// Retrieve a record by its unique email. Returns `None` if not found.
  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Patient>>> + Send + 'a;

  /// Every record, in no contractual order.
  fn list_all(&self) -> impl Future<Output = Result<Vec<Patient>>> + Send + '_;

  /// Does a record *other than* `excluded_id` own this email?
  ///
  /// Update's conflict check: a record re-using its own current email is
  /// not a conflict.
  fn exists_by_email_excluding<'a>(
    &'a self,
    email: &'a str,
    excluded_id: Uuid,
  ) -> impl Future<Output = Result<bool>> + Send + 'a;

  /// Apply `update` to the record identified by `id`.
  ///
  /// Returns the updated record, or `None` if `id` does not exist. Fails
  /// with `DuplicateEmail` if the new email collides with another record.
  fn update(
    &self,
    id: Uuid,
    update: PatientUpdate,
  ) -> impl Future<Output = Result<Option<Patient>>> + Send + '_;

  /// Remove the record if present. Deleting a missing id is not an error.
  fn delete_by_id(&self, id: Uuid) -> impl Future<Output = Result<()>> + Send + '_;
}
