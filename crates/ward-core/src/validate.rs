//! Field-level validation of inbound patient payloads.
//!
//! One checker per field; [`validate`] merges their findings into a single
//! [`Violations`] map so a caller can fix every problem in one round-trip.
//! Nothing here fails fast.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::patient::{NewPatient, PatientDraft};

pub const NAME_MAX_LEN: usize = 128;

pub const NAME_BLANK: &str = "Name must not be blank";
pub const NAME_TOO_LONG: &str = "Name can have maximum 128 chars";
pub const EMAIL_INVALID: &str = "email is invalid";
pub const ADDRESS_BLANK: &str = "Address must not be blank";
pub const DOB_REQUIRED: &str = "Date of Birth is required";
pub const BAD_DATE: &str = "Bad Date (use YYYY-MM-DD)";

static EMAIL_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

// ─── Violations ──────────────────────────────────────────────────────────────

/// Field name → human-readable message, for every field that failed.
///
/// Keys are the wire-level (camelCase) field names, so the map can be
/// serialized straight into an error response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Violations(BTreeMap<&'static str, String>);

impl Violations {
  pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
    self.0.insert(field, message.into());
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn message(&self, field: &str) -> Option<&str> {
    self.0.get(field).map(String::as_str)
  }
}

// ─── Per-field checkers ──────────────────────────────────────────────────────

fn check_name(name: &str, violations: &mut Violations) {
  if name.trim().is_empty() {
    violations.insert("name", NAME_BLANK);
  } else if name.chars().count() > NAME_MAX_LEN {
    violations.insert("name", NAME_TOO_LONG);
  }
}

fn check_email(email: &str, violations: &mut Violations) {
  if !EMAIL_RE.is_match(email) {
    violations.insert("email", EMAIL_INVALID);
  }
}

fn check_address(address: &str, violations: &mut Violations) {
  if address.trim().is_empty() {
    violations.insert("address", ADDRESS_BLANK);
  }
}

/// Strict `YYYY-MM-DD`; anything else is rejected.
fn parse_date(raw: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn check_date_of_birth(raw: Option<&str>, violations: &mut Violations) -> Option<NaiveDate> {
  match raw {
    None => {
      violations.insert("dateOfBirth", DOB_REQUIRED);
      None
    }
    Some(s) => match parse_date(s) {
      Some(date) => Some(date),
      None => {
        violations.insert("dateOfBirth", BAD_DATE);
        None
      }
    },
  }
}

/// Absence is not a violation here; the caller default-fills with today.
fn check_date_of_registration(
  raw: Option<&str>,
  violations: &mut Violations,
) -> Option<NaiveDate> {
  match raw {
    None => None,
    Some(s) => match parse_date(s) {
      Some(date) => Some(date),
      None => {
        violations.insert("dateOfRegistration", BAD_DATE);
        None
      }
    },
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Validate a draft, collecting all violations rather than failing fast.
///
/// On success the registration date has been default-filled with the
/// current date if the payload omitted it.
pub fn validate(draft: &PatientDraft) -> Result<NewPatient, Violations> {
  let mut violations = Violations::default();

  check_name(&draft.name, &mut violations);
  check_email(&draft.email, &mut violations);
  check_address(&draft.address, &mut violations);
  let date_of_birth = check_date_of_birth(draft.date_of_birth.as_deref(), &mut violations);
  let date_of_registration =
    check_date_of_registration(draft.date_of_registration.as_deref(), &mut violations);

  if !violations.is_empty() {
    return Err(violations);
  }

  match date_of_birth {
    Some(date_of_birth) => Ok(NewPatient {
      name: draft.name.clone(),
      email: draft.email.clone(),
      address: draft.address.clone(),
      date_of_birth,
      date_of_registration: date_of_registration
        .unwrap_or_else(|| Utc::now().date_naive()),
    }),
    // A missing date of birth always recorded a violation above.
    None => Err(violations),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Utc};

  use super::*;
  use crate::patient::PatientDraft;

  fn good_draft() -> PatientDraft {
    PatientDraft {
      name:                 "Blue Sayama".into(),
      email:                "blue.sayama@example.com".into(),
      address:              "112 Mobin St., Crowsand".into(),
      date_of_birth:        Some("1992-09-15".into()),
      date_of_registration: Some("2024-11-07".into()),
    }
  }

  #[test]
  fn valid_draft_passes() {
    let new = validate(&good_draft()).unwrap();
    assert_eq!(new.name, "Blue Sayama");
    assert_eq!(new.email, "blue.sayama@example.com");
    assert_eq!(
      new.date_of_birth,
      NaiveDate::from_ymd_opt(1992, 9, 15).unwrap()
    );
    assert_eq!(
      new.date_of_registration,
      NaiveDate::from_ymd_opt(2024, 11, 7).unwrap()
    );
  }

  #[test]
  fn missing_registration_date_defaults_to_today() {
    let mut draft = good_draft();
    draft.date_of_registration = None;

    let new = validate(&draft).unwrap();
    assert_eq!(new.date_of_registration, Utc::now().date_naive());
  }

  #[test]
  fn blank_name_is_rejected() {
    let mut draft = good_draft();
    draft.name = "   ".into();

    let violations = validate(&draft).unwrap_err();
    assert_eq!(violations.message("name"), Some(NAME_BLANK));
  }

  #[test]
  fn overlong_name_is_rejected() {
    let mut draft = good_draft();
    draft.name = "x".repeat(NAME_MAX_LEN + 1);

    let violations = validate(&draft).unwrap_err();
    assert_eq!(violations.message("name"), Some(NAME_TOO_LONG));
  }

  #[test]
  fn name_at_max_length_is_accepted() {
    let mut draft = good_draft();
    draft.name = "x".repeat(NAME_MAX_LEN);

    assert!(validate(&draft).is_ok());
  }

  #[test]
  fn bad_email_is_rejected() {
    let mut draft = good_draft();
    draft.email = "blue.sayama-example.com".into();

    let violations = validate(&draft).unwrap_err();
    assert_eq!(violations.message("email"), Some(EMAIL_INVALID));
  }

  #[test]
  fn empty_email_is_rejected() {
    let mut draft = good_draft();
    draft.email = String::new();

    assert!(validate(&draft).is_err());
  }

  #[test]
  fn blank_address_is_rejected() {
    let mut draft = good_draft();
    draft.address = "".into();

    let violations = validate(&draft).unwrap_err();
    assert_eq!(violations.message("address"), Some(ADDRESS_BLANK));
  }

  #[test]
  fn missing_date_of_birth_is_required() {
    let mut draft = good_draft();
    draft.date_of_birth = None;

    let violations = validate(&draft).unwrap_err();
    assert_eq!(violations.message("dateOfBirth"), Some(DOB_REQUIRED));
  }

  #[test]
  fn unparsable_date_of_birth_is_distinct_from_missing() {
    let mut draft = good_draft();
    draft.date_of_birth = Some("15/09/1992".into());

    let violations = validate(&draft).unwrap_err();
    assert_eq!(violations.message("dateOfBirth"), Some(BAD_DATE));
  }

  #[test]
  fn unparsable_registration_date_is_rejected() {
    let mut draft = good_draft();
    draft.date_of_registration = Some("last tuesday".into());

    let violations = validate(&draft).unwrap_err();
    assert_eq!(violations.message("dateOfRegistration"), Some(BAD_DATE));
  }

  #[test]
  fn all_violations_are_collected_together() {
    let draft = PatientDraft {
      name:                 "    ".into(),
      email:                "bad-email".into(),
      address:              "112 Mobin St.".into(),
      date_of_birth:        None,
      date_of_registration: Some("2024-11-07".into()),
    };

    let violations = validate(&draft).unwrap_err();
    assert_eq!(violations.len(), 3);
    assert_eq!(violations.message("name"), Some(NAME_BLANK));
    assert_eq!(violations.message("email"), Some(EMAIL_INVALID));
    assert_eq!(violations.message("dateOfBirth"), Some(DOB_REQUIRED));
  }
}
