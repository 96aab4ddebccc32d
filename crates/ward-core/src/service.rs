//! Business-rule orchestration over a [`PatientStore`].
//!
//! The service is the only place business errors originate. The transport
//! layer maps [`ServiceError`] variants to status codes and never inspects
//! store outcomes itself.

use thiserror::Error;
use uuid::Uuid;

use crate::{
  Error,
  patient::{Patient, PatientDraft},
  store::PatientStore,
  validate::{Violations, validate},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A classified business outcome, the transport layer's single source of
/// truth for status-code selection.
#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("validation failed")]
  Validation(Violations),

  #[error("Email {0} is already in use")]
  EmailAlreadyExists(String),

  #[error("Patient {0} NOT FOUND")]
  PatientNotFound(Uuid),

  /// Unclassified failure. Logged at the boundary, never leaked to clients.
  #[error("internal error")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<Error> for ServiceError {
  fn from(err: Error) -> Self {
    match err {
      Error::DuplicateEmail(email) => ServiceError::EmailAlreadyExists(email),
      Error::Storage(source) => ServiceError::Internal(source),
    }
  }
}

impl From<Violations> for ServiceError {
  fn from(violations: Violations) -> Self {
    ServiceError::Validation(violations)
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Patient operations over any [`PatientStore`] backend.
#[derive(Clone)]
pub struct PatientService<S> {
  store: S,
}

impl<S: PatientStore> PatientService<S> {
  pub fn new(store: S) -> Self {
    Self { store }
  }

  /// Validate and persist a new patient.
  ///
  /// The store's atomic uniqueness check surfaces here as
  /// [`ServiceError::EmailAlreadyExists`].
  pub async fn create(&self, draft: &PatientDraft) -> Result<Patient, ServiceError> {
    let new = validate(draft)?;
    let patient = self.store.insert(new).await?;
    Ok(patient)
  }

  /// Absence is `Ok(None)`; the caller decides HTTP semantics.
  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Patient>, ServiceError> {
    Ok(self.store.find_by_id(id).await?)
  }

  pub async fn get_by_email(
    &self,
    email: &str,
  ) -> Result<Option<Patient>, ServiceError> {
    Ok(self.store.find_by_email(email).await?)
  }

  pub async fn list(&self) -> Result<Vec<Patient>, ServiceError> {
    Ok(self.store.list_all().await?)
  }

  /// Update `email` and `address` of an existing record.
  ///
  /// The payload has the same shape as create and is validated in full,
  /// but `name` and the date fields never take effect. Re-using the
  /// record's own current email is allowed; the conflict check excludes
  /// the record's own id.
  pub async fn update(
    &self,
    id: Uuid,
    draft: &PatientDraft,
  ) -> Result<Patient, ServiceError> {
    let new = validate(draft)?;

    self
      .store
      .find_by_id(id)
      .await?
      .ok_or(ServiceError::PatientNotFound(id))?;

    if self.store.exists_by_email_excluding(&new.email, id).await? {
      return Err(ServiceError::EmailAlreadyExists(new.email));
    }

    self
      .store
      .update(id, new.as_update())
      .await?
      .ok_or(ServiceError::PatientNotFound(id))
  }

  /// Idempotent: deleting a missing id succeeds.
  pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
    Ok(self.store.delete_by_id(id).await?)
  }
}
