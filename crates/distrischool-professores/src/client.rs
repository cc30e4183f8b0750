//! Asynchronous professores client implementation.

use crate::models::{CreateProfessorRequest, Professor, UpdateProfessorRequest};
use crate::Result;
use async_trait::async_trait;
use distrischool_core::config::{ApiClientConfig, RuntimeConfig};
use distrischool_core::id::ProfessorId;
use distrischool_core::query::PageRequest;
use distrischool_core::{ApiClient, CrudService, Page, ResponsePayload, ResponseShape};
use tracing::debug;

const USER_AGENT: &str = concat!("distrischool-professores/", env!("CARGO_PKG_VERSION"));

/// Collection path. Only the professor API carries a version prefix.
pub const PROFESSORES_PATH: &str = "/v1/professores";

/// The list endpoint is pageable and always answers with a page envelope.
const LIST_SHAPE: ResponseShape = ResponseShape::UnwrapPaged;

/// Builder for [`ProfessorClient`].
#[derive(Debug, Clone)]
pub struct ProfessorClientBuilder {
    config: ApiClientConfig,
}

impl ProfessorClientBuilder {
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
    pub fn build(self) -> Result<ProfessorClient> {
        Ok(ProfessorClient::from_api(ApiClient::new(&self.config)?))
    }
}

impl Default for ProfessorClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Asynchronous client for professor records.
#[derive(Debug, Clone)]
pub struct ProfessorClient {
    api: ApiClient,
}

impl ProfessorClient {
    /// Construct a client directly from the base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        ProfessorClientBuilder::new()
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

    /// List all professors from the first page of the pageable endpoint.
    pub async fn list_professores(&self) -> Result<Vec<Professor>> {
        let professores: Vec<Professor> = self.api.get_list(PROFESSORES_PATH, LIST_SHAPE).await?;
        debug!(count = professores.len(), "Listed professores");
        Ok(professores)
    }

    /// Fetch one page of professors with its pagination metadata.
    pub async fn list_professores_page(&self, request: &PageRequest) -> Result<Page<Professor>> {
        let endpoint = request.to_params().apply_to(PROFESSORES_PATH);
        self.api.get_page(&endpoint).await
    }

    /// Fetch a single professor.
    pub async fn get_professor(&self, id: ProfessorId) -> Result<Professor> {
        self.api.get_as(&item_path(id)).await
    }

    /// Create a new professor.
    pub async fn create_professor(&self, request: &CreateProfessorRequest) -> Result<Professor> {
        self.api.post_as(PROFESSORES_PATH, request).await
    }

    /// Update an existing professor.
    pub async fn update_professor(
        &self,
        id: ProfessorId,
        request: &UpdateProfessorRequest,
    ) -> Result<Professor> {
        self.api.put_as(&item_path(id), request).await
    }

    /// Delete a professor. The API answers `204 No Content`, so this is usually `None`.
    pub async fn delete_professor(&self, id: ProfessorId) -> Result<ResponsePayload> {
        self.api.delete(&item_path(id)).await
    }
}

fn item_path(id: ProfessorId) -> String {
    format!("{PROFESSORES_PATH}/{id}")
}

#[async_trait]
impl CrudService for ProfessorClient {
    type Id = ProfessorId;
    type Entity = Professor;
    type Create = CreateProfessorRequest;
    type Update = UpdateProfessorRequest;

    async fn list(&self) -> Result<Vec<Professor>> {
        self.list_professores().await
    }

    async fn get(&self, id: ProfessorId) -> Result<Professor> {
        self.get_professor(id).await
    }

    async fn create(&self, request: &CreateProfessorRequest) -> Result<Professor> {
        self.create_professor(request).await
    }

    async fn update(&self, id: ProfessorId, request: &UpdateProfessorRequest) -> Result<Professor> {
        self.update_professor(id, request).await
    }

    async fn delete(&self, id: ProfessorId) -> Result<ResponsePayload> {
        self.delete_professor(id).await
    }
}
