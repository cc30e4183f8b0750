//! User account client and data models for DistriSchool.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{UserClient, UserClientBuilder, USERS_PATH};
pub use models::{CreateUserRequest, UpdateUserRequest, User};

/// Convenient result alias that reuses the shared DistriSchool error type.
pub type Result<T> = distrischool_core::Result<T>;
