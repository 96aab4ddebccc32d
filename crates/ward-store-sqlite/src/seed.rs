//! Demo seed records.
//!
//! Opt-in via the server's `seed_demo` config flag; also used as a fixture
//! by the API tests. Seeding an already-populated store is a no-op, so a
//! restarted server never duplicates records.

use chrono::NaiveDate;
use ward_core::patient::NewPatient;

use crate::{Result, SqliteStore};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// The four demo patients.
pub fn demo_patients() -> Vec<NewPatient> {
  vec![
    NewPatient {
      name:                 "Alice Johnson".into(),
      email:                "alice.johnson@example.com".into(),
      address:              "221 Maple Ave, Springfield".into(),
      date_of_birth:        date(1990, 4, 12),
      date_of_registration: date(2024, 1, 15),
    },
    NewPatient {
      name:                 "Emily Davis".into(),
      email:                "emily.davis@example.com".into(),
      address:              "14 Oak Lane, Springfield".into(),
      date_of_birth:        date(1992, 7, 3),
      date_of_registration: date(2024, 2, 8),
    },
    NewPatient {
      name:                 "James Harris".into(),
      email:                "james.harris@example.com".into(),
      address:              "52 Birch Rd, Springfield".into(),
      date_of_birth:        date(1985, 1, 22),
      date_of_registration: date(2024, 2, 21),
    },
    NewPatient {
      name:                 "Isabella Walker".into(),
      email:                "isabella.walker@example.com".into(),
      address:              "789 Willow St, Springfield".into(),
      date_of_birth:        date(1987, 10, 17),
      date_of_registration: date(2024, 3, 29),
    },
  ]
}

impl SqliteStore {
  /// Insert the demo records, unless the store already holds any record.
  pub async fn seed_demo(&self) -> Result<()> {
    if !self.all_patients().await?.is_empty() {
      return Ok(());
    }
    for new in demo_patients() {
      self.insert_patient(new).await?;
    }
    Ok(())
  }
}
