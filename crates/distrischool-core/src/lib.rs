//! # distrischool-core
//!
//! Shared building blocks for talking to the DistriSchool REST API.
//!
//! Every entity crate (`distrischool-professores`, `distrischool-alunos`,
//! `distrischool-users`) goes through the same [`ApiClient`], which resolves
//! the backend base address once, issues JSON requests and turns responses
//! into a single `Result<Option<Value>>` contract.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy (transport, HTTP status, decode)
//! - [`config`] - Base-URL resolution and client configuration
//! - [`client`] - The HTTP client and request descriptors
//! - [`shape`] - Response normalization strategies and the paged envelope
//! - [`query`] - Query-string helpers for list endpoints
//! - [`id`] - Strongly-typed entity identifiers
//! - [`service`] - The `CrudService` trait implemented by entity clients

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod query;
pub mod service;
pub mod shape;

// Re-export commonly used types
pub use client::{ApiClient, HttpMethod, RequestDescriptor, ResponsePayload};
pub use config::{resolve_base_url, ApiClientConfig, RuntimeConfig, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use service::CrudService;
pub use shape::{Page, ResponseShape};
