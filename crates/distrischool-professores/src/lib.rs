//! Teacher (professor) client and data models for DistriSchool.
//!
//! Provides typed structures and an asynchronous client for the
//! `/v1/professores` resource.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ProfessorClient, ProfessorClientBuilder, PROFESSORES_PATH};
pub use models::{CreateProfessorRequest, Professor, UpdateProfessorRequest};

/// Convenient result alias that reuses the shared DistriSchool error type.
pub type Result<T> = distrischool_core::Result<T>;
