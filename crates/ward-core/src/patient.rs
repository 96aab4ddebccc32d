//! Patient — the single managed entity.
//!
//! A [`Patient`] is the stored record. Inbound payloads arrive as a
//! [`PatientDraft`], which tolerates missing and malformed fields so that
//! validation, not deserialization, reports them. A draft that passes
//! [`validate`](crate::validate::validate) becomes a [`NewPatient`]; the
//! only mutation a store will ever apply is a [`PatientUpdate`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored patient record.
///
/// `id` is assigned by the store at insert and never reused. `name`,
/// `date_of_birth` and `date_of_registration` are fixed at creation; only
/// `email` and `address` are updatable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
  pub id:                   Uuid,
  pub name:                 String,
  pub email:                String,
  pub address:              String,
  pub date_of_birth:        NaiveDate,
  pub date_of_registration: NaiveDate,
}

/// The raw inbound payload, shared by create and update requests.
///
/// Every field is tolerant of absence: strings default to empty, dates stay
/// raw text. An unparsable date is a field violation, not a JSON error, so
/// a caller gets it back alongside every other violation in one round-trip.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
  #[serde(default)]
  pub name:                 String,
  #[serde(default)]
  pub email:                String,
  #[serde(default)]
  pub address:              String,
  #[serde(default)]
  pub date_of_birth:        Option<String>,
  #[serde(default)]
  pub date_of_registration: Option<String>,
}

/// A draft that passed validation, with the registration date default-filled.
///
/// Only [`validate`](crate::validate::validate) produces one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
  pub name:                 String,
  pub email:                String,
  pub address:              String,
  pub date_of_birth:        NaiveDate,
  pub date_of_registration: NaiveDate,
}

/// The only mutation a store applies to an existing record.
///
/// `name` and the date fields are immutable after creation; an update
/// payload carrying different values for them is ignored, not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientUpdate {
  pub email:   String,
  pub address: String,
}

impl NewPatient {
  /// The mutable subset of this draft, for the update path.
  pub fn as_update(&self) -> PatientUpdate {
    PatientUpdate {
      email:   self.email.clone(),
      address: self.address.clone(),
    }
  }
}
