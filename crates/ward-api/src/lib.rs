//! JSON REST API for Ward.
//!
//! Exposes an axum [`Router`] backed by any
//! [`ward_core::store::PatientStore`]. TLS and reverse-proxy concerns are
//! the caller's responsibility.

pub mod error;
pub mod patients;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use ward_core::{service::PatientService, store::PatientStore};

/// Base path of the patient collection; the `Location` header on create is
/// built from it.
pub const PATIENTS_PATH: &str = "/api/v1/patients";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` (with
/// `WARD_`-prefixed environment overrides).
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Populate an empty store with the four demo records at startup.
  #[serde(default)]
  pub seed_demo:  bool,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router over `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(service: Arc<PatientService<S>>) -> Router<()>
where
  S: PatientStore + 'static,
{
  Router::new()
    .route(
      PATIENTS_PATH,
      get(patients::list::<S>).post(patients::create::<S>),
    )
    .route(
      "/api/v1/patients/{id}",
      get(patients::get_one::<S>)
        .put(patients::update_one::<S>)
        .delete(patients::delete_one::<S>),
    )
    .with_state(service)
}
