//! [`SqliteStore`] — the SQLite implementation of [`PatientStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use ward_core::{
  patient::{NewPatient, Patient, PatientUpdate},
  store::PatientStore,
};

use crate::{
  Error, Result,
  encode::{PATIENT_COLUMNS, RawPatient, encode_date, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A patient record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and all
/// statements are serialised on its dedicated thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Did the UNIQUE index on `email` reject the statement?
fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Inherent operations (crate-level errors) ──────────────────────────────

  /// Assign a fresh id and persist. The UNIQUE email index makes the
  /// uniqueness check atomic with the insert.
  pub async fn insert_patient(&self, new: NewPatient) -> Result<Patient> {
    let patient = Patient {
      id:                   Uuid::new_v4(),
      name:                 new.name,
      email:                new.email,
      address:              new.address,
      date_of_birth:        new.date_of_birth,
      date_of_registration: new.date_of_registration,
    };

    let id_str   = encode_uuid(patient.id);
    let name     = patient.name.clone();
    let email    = patient.email.clone();
    let address  = patient.address.clone();
    let dob_str  = encode_date(patient.date_of_birth);
    let reg_str  = encode_date(patient.date_of_registration);
    let conflict = patient.email.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO patients (
             patient_id, name, email, address, date_of_birth, date_of_registration
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, name, email, address, dob_str, reg_str],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          Error::DuplicateEmail(conflict)
        } else {
          Error::Database(e)
        }
      })?;

    Ok(patient)
  }

  pub async fn patient_by_id(&self, id: Uuid) -> Result<Option<Patient>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPatient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?1"),
              rusqlite::params![id_str],
              RawPatient::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPatient::into_patient).transpose()
  }

  pub async fn patient_by_email(&self, email: &str) -> Result<Option<Patient>> {
    let email = email.to_owned();

    let raw: Option<RawPatient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE email = ?1"),
              rusqlite::params![email],
              RawPatient::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPatient::into_patient).transpose()
  }

  pub async fn all_patients(&self) -> Result<Vec<Patient>> {
    let raws: Vec<RawPatient> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {PATIENT_COLUMNS} FROM patients"))?;
        let rows = stmt
          .query_map([], RawPatient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPatient::into_patient).collect()
  }

  /// Does a record other than `excluded_id` own this email?
  pub async fn email_taken_excluding(
    &self,
    email: &str,
    excluded_id: Uuid,
  ) -> Result<bool> {
    let email  = email.to_owned();
    let id_str = encode_uuid(excluded_id);

    let taken: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM patients WHERE email = ?1 AND patient_id != ?2",
              rusqlite::params![email, id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(taken)
  }

  /// Apply the allowed mutation (`email`, `address`) and return the updated
  /// record, or `None` if `id` does not exist.
  pub async fn update_patient(
    &self,
    id: Uuid,
    update: PatientUpdate,
  ) -> Result<Option<Patient>> {
    let id_str   = encode_uuid(id);
    let conflict = update.email.clone();

    let raw: Option<RawPatient> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE patients SET email = ?2, address = ?3 WHERE patient_id = ?1",
          rusqlite::params![id_str, update.email, update.address],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(
          conn
            .query_row(
              &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?1"),
              rusqlite::params![id_str],
              RawPatient::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          Error::DuplicateEmail(conflict)
        } else {
          Error::Database(e)
        }
      })?;

    raw.map(RawPatient::into_patient).transpose()
  }

  /// Idempotent: deleting a missing id is a no-op.
  pub async fn delete_patient(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM patients WHERE patient_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}

// ─── PatientStore impl ───────────────────────────────────────────────────────

impl PatientStore for SqliteStore {
  async fn insert(&self, new: NewPatient) -> ward_core::Result<Patient> {
    self.insert_patient(new).await.map_err(Into::into)
  }

  async fn find_by_id(&self, id: Uuid) -> ward_core::Result<Option<Patient>> {
    self.patient_by_id(id).await.map_err(Into::into)
  }

  async fn find_by_email(&self, email: &str) -> ward_core::Result<Option<Patient>> {
    self.patient_by_email(email).await.map_err(Into::into)
  }

  async fn list_all(&self) -> ward_core::Result<Vec<Patient>> {
    self.all_patients().await.map_err(Into::into)
  }

  async fn exists_by_email_excluding(
    &self,
    email: &str,
    excluded_id: Uuid,
  ) -> ward_core::Result<bool> {
    self
      .email_taken_excluding(email, excluded_id)
      .await
      .map_err(Into::into)
  }

  async fn update(
    &self,
    id: Uuid,
    update: PatientUpdate,
  ) -> ward_core::Result<Option<Patient>> {
    self.update_patient(id, update).await.map_err(Into::into)
  }

  async fn delete_by_id(&self, id: Uuid) -> ward_core::Result<()> {
    self.delete_patient(id).await.map_err(Into::into)
  }
}
