//! TEXT codecs between domain types and SQLite rows.

use chrono::NaiveDate;
use uuid::Uuid;
use ward_core::patient::Patient;

use crate::{Error, Result};

pub fn encode_uuid(id: Uuid) -> String {
  id.to_string()
}

pub fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

fn decode_date(raw: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{raw}: {e}")))
}

/// Column list matching [`RawPatient::from_row`]'s field order.
pub const PATIENT_COLUMNS: &str =
  "patient_id, name, email, address, date_of_birth, date_of_registration";

/// A `patients` row as stored, before uuid/date decoding.
pub struct RawPatient {
  pub patient_id:           String,
  pub name:                 String,
  pub email:                String,
  pub address:              String,
  pub date_of_birth:        String,
  pub date_of_registration: String,
}

impl RawPatient {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      patient_id:           row.get(0)?,
      name:                 row.get(1)?,
      email:                row.get(2)?,
      address:              row.get(3)?,
      date_of_birth:        row.get(4)?,
      date_of_registration: row.get(5)?,
    })
  }

  pub fn into_patient(self) -> Result<Patient> {
    Ok(Patient {
      id:                   Uuid::parse_str(&self.patient_id)?,
      name:                 self.name,
      email:                self.email,
      address:              self.address,
      date_of_birth:        decode_date(&self.date_of_birth)?,
      date_of_registration: decode_date(&self.date_of_registration)?,
    })
  }
}
