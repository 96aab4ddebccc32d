//! Core types and trait definitions for the Ward patient record service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod patient;
pub mod service;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
