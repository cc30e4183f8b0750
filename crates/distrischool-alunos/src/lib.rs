//! Student (aluno) client and data models for DistriSchool.
//!
//! Provides typed structures and an asynchronous client for the `/alunos`
//! resource, including lookup by enrollment number and filtered search.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{AlunoClient, AlunoClientBuilder, ALUNOS_PATH};
pub use models::{Aluno, AlunoFilter, AlunoRequest, Endereco};

/// Convenient result alias that reuses the shared DistriSchool error type.
pub type Result<T> = distrischool_core::Result<T>;
