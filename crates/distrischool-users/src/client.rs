//! Asynchronous users client implementation.

use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::Result;
use async_trait::async_trait;
use distrischool_core::config::{ApiClientConfig, RuntimeConfig};
use distrischool_core::id::UserId;
use distrischool_core::query::PageRequest;
use distrischool_core::{ApiClient, CrudService, Page, ResponsePayload, ResponseShape};
use tracing::debug;

const USER_AGENT: &str = concat!("distrischool-users/", env!("CARGO_PKG_VERSION"));

/// Collection path.
pub const USERS_PATH: &str = "/users";

/// Deployments differ: some gateways page the list, some return a bare array.
const LIST_SHAPE: ResponseShape = ResponseShape::PassthroughOrPaged;

/// Builder for [`UserClient`].
#[derive(Debug, Clone)]
pub struct UserClientBuilder {
    config: ApiClientConfig,
}

impl UserClientBuilder {
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
    pub fn build(self) -> Result<UserClient> {
        Ok(UserClient::from_api(ApiClient::new(&self.config)?))
    }
}

impl Default for UserClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Asynchronous client for user accounts.
#[derive(Debug, Clone)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    /// Construct a client directly from the base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        UserClientBuilder::new()
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

    /// List users, accepting either a page or a bare array.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users: Vec<User> = self.api.get_list(USERS_PATH, LIST_SHAPE).await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Fetch one page of users with its pagination metadata.
    pub async fn list_users_page(&self, request: &PageRequest) -> Result<Page<User>> {
        let endpoint = request.to_params().apply_to(USERS_PATH);
        self.api.get_page(&endpoint).await
    }

    /// Fetch a single user.
    pub async fn get_user(&self, id: UserId) -> Result<User> {
        self.api.get_as(&item_path(id)).await
    }

    /// Create a new user.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        self.api.post_as(USERS_PATH, request).await
    }

    /// Update an existing user.
    pub async fn update_user(&self, id: UserId, request: &UpdateUserRequest) -> Result<User> {
        self.api.put_as(&item_path(id), request).await
    }

    /// Delete a user.
    pub async fn delete_user(&self, id: UserId) -> Result<ResponsePayload> {
        self.api.delete(&item_path(id)).await
    }
}

fn item_path(id: UserId) -> String {
    format!("{USERS_PATH}/{id}")
}

#[async_trait]
impl CrudService for UserClient {
    type Id = UserId;
    type Entity = User;
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;

    async fn list(&self) -> Result<Vec<User>> {
        self.list_users().await
    }

    async fn get(&self, id: UserId) -> Result<User> {
        self.get_user(id).await
    }

    async fn create(&self, request: &CreateUserRequest) -> Result<User> {
        self.create_user(request).await
    }

    async fn update(&self, id: UserId, request: &UpdateUserRequest) -> Result<User> {
        self.update_user(id, request).await
    }

    async fn delete(&self, id: UserId) -> Result<ResponsePayload> {
        self.delete_user(id).await
    }
}
