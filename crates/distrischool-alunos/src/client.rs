//! Asynchronous alunos client implementation.

use crate::models::{Aluno, AlunoFilter, AlunoRequest};
use crate::Result;
use async_trait::async_trait;
use distrischool_core::config::{ApiClientConfig, RuntimeConfig};
use distrischool_core::id::AlunoId;
use distrischool_core::{ApiClient, CrudService, ResponsePayload, ResponseShape};
use tracing::debug;

const USER_AGENT: &str = concat!("distrischool-alunos/", env!("CARGO_PKG_VERSION"));

/// Collection path.
pub const ALUNOS_PATH: &str = "/alunos";

/// The search endpoint returns a bare array today; accept a page as well.
const LIST_SHAPE: ResponseShape = ResponseShape::PassthroughOrPaged;

/// Builder for [`AlunoClient`].
#[derive(Debug, Clone)]
pub struct AlunoClientBuilder {
    config: ApiClientConfig,
}

impl AlunoClientBuilder {
    /// Create a builder with the compiled-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(ApiClientConfig::new())
    }

    /// Create a builder from an existing configuration.
    #[must_use]
    pub fn from_config(config: ApiClientConfig) -> Self {
        let config = if config.user_agent.is_none() {
            config.with_user_agent(USER_AGENT)
        } else {
            config
        };
        Self { config }
    }

    /// Apply an operator-supplied runtime configuration.
    #[must_use]
    pub fn with_runtime(mut self, runtime: RuntimeConfig) -> Self {
        self.config = self.config.with_runtime(runtime);
        self
    }

    /// Set the origin used when the base URL is relative.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.config = self.config.with_origin(origin);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<AlunoClient> {
        Ok(AlunoClient::from_api(ApiClient::new(&self.config)?))
    }
}

impl Default for AlunoClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Asynchronous client for student records.
#[derive(Debug, Clone)]
pub struct AlunoClient {
    api: ApiClient,
}

impl AlunoClient {
    /// Construct a client directly from the base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        AlunoClientBuilder::new()
            .with_runtime(RuntimeConfig::new().with_api_url(base_url))
            .build()
    }

    /// Reuse an existing API client.
    #[must_use]
    pub const fn from_api(api: ApiClient) -> Self {
        Self { api }
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    /// List all students.
    pub async fn list_alunos(&self) -> Result<Vec<Aluno>> {
        self.search_alunos(&AlunoFilter::default()).await
    }

    /// Search students by name or class.
    pub async fn search_alunos(&self, filter: &AlunoFilter) -> Result<Vec<Aluno>> {
        let endpoint = filter.to_params().apply_to(ALUNOS_PATH);
        let alunos: Vec<Aluno> = self.api.get_list(&endpoint, LIST_SHAPE).await?;
        debug!(count = alunos.len(), "Listed alunos");
        Ok(alunos)
    }

    /// Fetch a single student by id.
    pub async fn get_aluno(&self, id: AlunoId) -> Result<Aluno> {
        self.api.get_as(&item_path(id)).await
    }

    /// Fetch a single student by enrollment number.
    pub async fn get_aluno_by_matricula(&self, matricula: &str) -> Result<Aluno> {
        let path = format!(
            "{ALUNOS_PATH}/matricula/{}",
            urlencoding::encode(matricula)
        );
        self.api.get_as(&path).await
    }

    /// Create a new student.
    pub async fn create_aluno(&self, request: &AlunoRequest) -> Result<Aluno> {
        self.api.post_as(ALUNOS_PATH, request).await
    }

    /// Replace an existing student record.
    pub async fn update_aluno(&self, id: AlunoId, request: &AlunoRequest) -> Result<Aluno> {
        self.api.put_as(&item_path(id), request).await
    }

    /// Delete a student.
    pub async fn delete_aluno(&self, id: AlunoId) -> Result<ResponsePayload> {
        self.api.delete(&item_path(id)).await
    }
}

fn item_path(id: AlunoId) -> String {
    format!("{ALUNOS_PATH}/{id}")
}

#[async_trait]
impl CrudService for AlunoClient {
    type Id = AlunoId;
    type Entity = Aluno;
    type Create = AlunoRequest;
    type Update = AlunoRequest;

    async fn list(&self) -> Result<Vec<Aluno>> {
        self.list_alunos().await
    }

    async fn get(&self, id: AlunoId) -> Result<Aluno> {
        self.get_aluno(id).await
    }

    async fn create(&self, request: &AlunoRequest) -> Result<Aluno> {
        self.create_aluno(request).await
    }

    async fn update(&self, id: AlunoId, request: &AlunoRequest) -> Result<Aluno> {
        self.update_aluno(id, request).await
    }

    async fn delete(&self, id: AlunoId) -> Result<ResponsePayload> {
        self.delete_aluno(id).await
    }
}
