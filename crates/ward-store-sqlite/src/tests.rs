//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use uuid::Uuid;
use ward_core::patient::{NewPatient, PatientUpdate};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_patient(name: &str, email: &str) -> NewPatient {
  NewPatient {
    name:                 name.into(),
    email:                email.into(),
    address:              "112 Mobin St., Crowsand".into(),
    date_of_birth:        NaiveDate::from_ymd_opt(1992, 9, 15).unwrap(),
    date_of_registration: NaiveDate::from_ymd_opt(2024, 11, 7).unwrap(),
  }
}

// ─── Insert & lookup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_by_id() {
  let s = store().await;

  let created = s
    .insert_patient(new_patient("Blue Sayama", "blue.sayama@example.com"))
    .await
    .unwrap();
  assert!(!created.id.is_nil());

  let fetched = s.patient_by_id(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn insert_assigns_distinct_ids() {
  let s = store().await;

  let a = s
    .insert_patient(new_patient("A", "a@example.com"))
    .await
    .unwrap();
  let b = s
    .insert_patient(new_patient("B", "b@example.com"))
    .await
    .unwrap();
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn find_by_email_round_trips_every_field() {
  let s = store().await;

  let submitted = new_patient("Blue Sayama", "blue.sayama@example.com");
  s.insert_patient(submitted.clone()).await.unwrap();

  let fetched = s
    .patient_by_email("blue.sayama@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.name, submitted.name);
  assert_eq!(fetched.email, submitted.email);
  assert_eq!(fetched.address, submitted.address);
  assert_eq!(fetched.date_of_birth, submitted.date_of_birth);
  assert_eq!(fetched.date_of_registration, submitted.date_of_registration);
}

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;

  assert!(s.patient_by_id(Uuid::new_v4()).await.unwrap().is_none());
  assert!(
    s.patient_by_email("nobody@example.com")
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn duplicate_email_insert_is_rejected() {
  let s = store().await;

  s.insert_patient(new_patient("First", "taken@example.com"))
    .await
    .unwrap();
  let err = s
    .insert_patient(new_patient("Second", "taken@example.com"))
    .await
    .unwrap_err();

  assert!(matches!(err, Error::DuplicateEmail(ref e) if e == "taken@example.com"));
}

#[tokio::test]
async fn list_all_returns_every_record() {
  let s = store().await;

  s.insert_patient(new_patient("A", "a@example.com"))
    .await
    .unwrap();
  s.insert_patient(new_patient("B", "b@example.com"))
    .await
    .unwrap();

  let mut emails: Vec<String> = s
    .all_patients()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.email)
    .collect();
  emails.sort();
  assert_eq!(emails, vec!["a@example.com", "b@example.com"]);
}

// ─── Uniqueness check for updates ────────────────────────────────────────────

#[tokio::test]
async fn email_taken_excluding_ignores_own_record() {
  let s = store().await;

  let own = s
    .insert_patient(new_patient("Own", "own@example.com"))
    .await
    .unwrap();
  let other = s
    .insert_patient(new_patient("Other", "other@example.com"))
    .await
    .unwrap();

  // Re-using one's own email is not a conflict.
  assert!(
    !s.email_taken_excluding("own@example.com", own.id)
      .await
      .unwrap()
  );
  // Another record's email is.
  assert!(
    s.email_taken_excluding("other@example.com", own.id)
      .await
      .unwrap()
  );
  // An unused email never is.
  assert!(
    !s.email_taken_excluding("fresh@example.com", other.id)
      .await
      .unwrap()
  );
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_changes_only_email_and_address() {
  let s = store().await;

  let created = s
    .insert_patient(new_patient("Blue Sayama", "blue.sayama@example.com"))
    .await
    .unwrap();

  let updated = s
    .update_patient(created.id, PatientUpdate {
      email:   "blue.s@example.com".into(),
      address: "90 New Rd, Crowsand".into(),
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.id, created.id);
  assert_eq!(updated.email, "blue.s@example.com");
  assert_eq!(updated.address, "90 New Rd, Crowsand");
  assert_eq!(updated.name, created.name);
  assert_eq!(updated.date_of_birth, created.date_of_birth);
  assert_eq!(updated.date_of_registration, created.date_of_registration);

  // The old email no longer resolves.
  assert!(
    s.patient_by_email("blue.sayama@example.com")
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn update_missing_id_returns_none() {
  let s = store().await;

  let result = s
    .update_patient(Uuid::new_v4(), PatientUpdate {
      email:   "x@example.com".into(),
      address: "somewhere".into(),
    })
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn update_to_foreign_email_is_rejected() {
  let s = store().await;

  s.insert_patient(new_patient("Holder", "held@example.com"))
    .await
    .unwrap();
  let victim = s
    .insert_patient(new_patient("Victim", "victim@example.com"))
    .await
    .unwrap();

  let err = s
    .update_patient(victim.id, PatientUpdate {
      email:   "held@example.com".into(),
      address: victim.address.clone(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateEmail(ref e) if e == "held@example.com"));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_both_lookup_keys() {
  let s = store().await;

  let created = s
    .insert_patient(new_patient("Gone Soon", "gone@example.com"))
    .await
    .unwrap();

  s.delete_patient(created.id).await.unwrap();

  assert!(s.patient_by_id(created.id).await.unwrap().is_none());
  assert!(s.patient_by_email("gone@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_id_is_idempotent() {
  let s = store().await;
  s.delete_patient(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn deleted_email_becomes_reusable() {
  let s = store().await;

  let created = s
    .insert_patient(new_patient("First", "reuse@example.com"))
    .await
    .unwrap();
  s.delete_patient(created.id).await.unwrap();

  s.insert_patient(new_patient("Second", "reuse@example.com"))
    .await
    .unwrap();
}

// ─── Seed ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_demo_populates_empty_store() {
  let s = store().await;
  s.seed_demo().await.unwrap();

  let all = s.all_patients().await.unwrap();
  assert_eq!(all.len(), 4);

  let isabella = s
    .patient_by_email("isabella.walker@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(isabella.address, "789 Willow St, Springfield");
  assert_eq!(
    isabella.date_of_birth,
    NaiveDate::from_ymd_opt(1987, 10, 17).unwrap()
  );
  assert_eq!(
    isabella.date_of_registration,
    NaiveDate::from_ymd_opt(2024, 3, 29).unwrap()
  );
}

#[tokio::test]
async fn seed_demo_is_a_noop_on_populated_store() {
  let s = store().await;
  s.seed_demo().await.unwrap();
  s.seed_demo().await.unwrap();
  assert_eq!(s.all_patients().await.unwrap().len(), 4);
}
