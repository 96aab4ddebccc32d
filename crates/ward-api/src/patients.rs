//! Handlers for the `/api/v1/patients` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/v1/patients` | Optional `?email=` switches to a single-record lookup |
//! | `POST`   | `/api/v1/patients` | 201 + `Location`; 400 field map or conflict |
//! | `GET`    | `/api/v1/patients/{id}` | 404 with empty body if not found |
//! | `PUT`    | `/api/v1/patients/{id}` | Only `email`/`address` take effect |
//! | `DELETE` | `/api/v1/patients/{id}` | 204 always (idempotent) |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;
use ward_core::{
  patient::{Patient, PatientDraft},
  service::PatientService,
  store::PatientStore,
};

use crate::{PATIENTS_PATH, error::ApiError};

/// Unwrap the body, turning axum's rejection into our `{"message": ...}`
/// shape.
fn read_body(
  payload: Result<Json<PatientDraft>, JsonRejection>,
) -> Result<PatientDraft, ApiError> {
  let Json(draft) = payload
    .map_err(|rejection| ApiError::Malformed(format!("JSON Parse Error {}", rejection.body_text())))?;
  Ok(draft)
}

// ─── List / lookup by email ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub email: Option<String>,
}

/// `GET /api/v1/patients[?email=<email>]`
///
/// Without `email`: 200 with the full array. With it: 200 with the single
/// record, or 404 with an empty body.
pub async fn list<S>(
  State(service): State<Arc<PatientService<S>>>,
  Query(params): Query<ListParams>,
) -> Result<Response, ApiError>
where
  S: PatientStore,
{
  match params.email {
    Some(email) => match service.get_by_email(&email).await? {
      Some(patient) => Ok(Json(patient).into_response()),
      None => Ok(StatusCode::NOT_FOUND.into_response()),
    },
    None => {
      let patients = service.list().await?;
      Ok(Json(patients).into_response())
    }
  }
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /api/v1/patients/{id}`
///
/// A path segment that is not a UUID can match no record, so it falls under
/// the same 404 as a missing id.
pub async fn get_one<S>(
  State(service): State<Arc<PatientService<S>>>,
  Path(id): Path<String>,
) -> Result<Response, ApiError>
where
  S: PatientStore,
{
  let Ok(id) = Uuid::parse_str(&id) else {
    return Ok(StatusCode::NOT_FOUND.into_response());
  };
  match service.get_by_id(id).await? {
    Some(patient) => Ok(Json(patient).into_response()),
    None => Ok(StatusCode::NOT_FOUND.into_response()),
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /api/v1/patients`
///
/// 201 with the stored record and a `Location` header embedding the
/// server-assigned id.
pub async fn create<S>(
  State(service): State<Arc<PatientService<S>>>,
  payload: Result<Json<PatientDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PatientStore,
{
  let draft = read_body(payload)?;
  tracing::info!(email = %draft.email, "creating a new patient");

  let patient = service.create(&draft).await?;
  let location = format!("{PATIENTS_PATH}/{}", patient.id);

  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(patient),
  ))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /api/v1/patients/{id}`
///
/// The body shares the create shape; `name` and the date fields are
/// ignored. A non-UUID path segment is a malformed request, not a miss.
pub async fn update_one<S>(
  State(service): State<Arc<PatientService<S>>>,
  Path(id): Path<String>,
  payload: Result<Json<PatientDraft>, JsonRejection>,
) -> Result<Json<Patient>, ApiError>
where
  S: PatientStore,
{
  let id = Uuid::parse_str(&id)
    .map_err(|_| ApiError::Malformed(format!("Bad patient id {id}")))?;
  let draft = read_body(payload)?;
  tracing::info!(patient_id = %id, "updating patient");

  let patient = service.update(id, &draft).await?;
  Ok(Json(patient))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /api/v1/patients/{id}` — 204 regardless of prior existence.
pub async fn delete_one<S>(
  State(service): State<Arc<PatientService<S>>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: PatientStore,
{
  if let Ok(id) = Uuid::parse_str(&id) {
    service.delete(id).await?;
  }
  Ok(StatusCode::NO_CONTENT)
}
