//! HTTP client shared by every DistriSchool entity service.
//!
//! [`ApiClient`] prefixes each endpoint with the base URL resolved at
//! construction, attaches JSON headers, and maps the response onto a single
//! contract: `Ok(Some(value))` for a JSON body, `Ok(None)` for an empty or
//! non-JSON body, and an [`Error`] for everything else.

use crate::config::ApiClientConfig;
use crate::shape::{Page, ResponseShape};
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, error};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Decoded response body; `None` when the body is empty or not JSON.
pub type ResponsePayload = Option<Value>;

/// HTTP verbs supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request, described independently of the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Path relative to the base URL, e.g. `/alunos/42`
    pub endpoint: String,
    /// HTTP method
    pub method: HttpMethod,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Extra headers applied after the defaults
    pub headers: BTreeMap<String, String>,
}

impl RequestDescriptor {
    /// Create a descriptor without body or extra headers.
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
            headers: BTreeMap::new(),
        }
    }

    /// Attach a serializable body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if the body cannot be represented as JSON.
    pub fn with_body<B>(mut self, body: &B) -> Result<Self>
    where
        B: Serialize + ?Sized,
    {
        let value = serde_json::to_value(body).map_err(|e| Error::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attach a header. Later values replace earlier ones, including defaults.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Asynchronous JSON client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    origin: Option<Url>,
}

impl ApiClient {
    /// Build a client, resolving the base URL from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the origin is invalid or the underlying
    /// HTTP client cannot be built.
    pub fn new(config: &ApiClientConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let http = builder
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;

        let base_url = config.resolve();
        debug!(base_url = %base_url, "Resolved API base URL");

        Ok(Self {
            http,
            base_url,
            origin: config.parse_origin()?,
        })
    }

    /// Build a client for an explicit base URL, bypassing resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let config = ApiClientConfig::new()
            .with_runtime(crate::RuntimeConfig::new().with_api_url(base_url));
        Self::new(&config)
    }

    /// Return the resolved base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL and an endpoint with exactly one `/` between them.
    #[must_use]
    pub fn url_for(&self, endpoint: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        if path.is_empty() {
            return if base.is_empty() {
                "/".to_string()
            } else {
                base.to_string()
            };
        }
        format!("{base}/{path}")
    }

    fn target_url(&self, endpoint: &str) -> Result<Url> {
        let address = self.url_for(endpoint);
        match Url::parse(&address) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.origin {
                Some(origin) => origin.join(&address).map_err(Error::from),
                None => Err(Error::InvalidEndpoint(format!(
                    "relative address `{address}` needs an origin"
                ))),
            },
            Err(err) => Err(Error::from(err)),
        }
    }

    /// Issue a `GET` request.
    pub async fn get(&self, endpoint: &str) -> Result<ResponsePayload> {
        self.execute(RequestDescriptor::new(HttpMethod::Get, endpoint))
            .await
    }

    /// Issue a `POST` request with a JSON body.
    pub async fn post<B>(&self, endpoint: &str, body: &B) -> Result<ResponsePayload>
    where
        B: Serialize + ?Sized,
    {
        self.execute_with_body(HttpMethod::Post, endpoint, body).await
    }

    /// Issue a `PUT` request with a JSON body.
    pub async fn put<B>(&self, endpoint: &str, body: &B) -> Result<ResponsePayload>
    where
        B: Serialize + ?Sized,
    {
        self.execute_with_body(HttpMethod::Put, endpoint, body).await
    }

    /// Issue a `DELETE` request.
    pub async fn delete(&self, endpoint: &str) -> Result<ResponsePayload> {
        self.execute(RequestDescriptor::new(HttpMethod::Delete, endpoint))
            .await
    }

    /// `GET` and decode the body into `T`.
    pub async fn get_as<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let payload = self.get(endpoint).await?;
        decode_payload(HttpMethod::Get, endpoint, payload)
    }

    /// `POST` and decode the body into `T`.
    pub async fn post_as<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = self.post(endpoint, body).await?;
        decode_payload(HttpMethod::Post, endpoint, payload)
    }

    /// `PUT` and decode the body into `T`.
    pub async fn put_as<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = self.put(endpoint, body).await?;
        decode_payload(HttpMethod::Put, endpoint, payload)
    }

    /// `GET` a list endpoint and reshape it with `shape` before decoding.
    pub async fn get_list<T>(&self, endpoint: &str, shape: ResponseShape) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let payload = self.get(endpoint).await?;
        log_decode_failure(HttpMethod::Get, endpoint, shape.decode_list(payload))
    }

    /// `GET` a pageable endpoint and keep its pagination metadata.
    pub async fn get_page<T>(&self, endpoint: &str) -> Result<Page<T>>
    where
        T: DeserializeOwned,
    {
        let payload = self.get(endpoint).await?;
        log_decode_failure(HttpMethod::Get, endpoint, Page::from_payload(payload))
    }

    async fn execute_with_body<B>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
    ) -> Result<ResponsePayload>
    where
        B: Serialize + ?Sized,
    {
        match RequestDescriptor::new(method, endpoint).with_body(body) {
            Ok(request) => self.execute(request).await,
            Err(err) => {
                error!(%method, endpoint, error = %err, "API request failed");
                Err(err)
            }
        }
    }

    /// Execute a request descriptor.
    ///
    /// Failures are logged once here and then returned unchanged.
    pub async fn execute(&self, request: RequestDescriptor) -> Result<ResponsePayload> {
        let method = request.method;
        let endpoint = request.endpoint.clone();

        self.send(request).await.map_err(|err| {
            error!(%method, endpoint = %endpoint, error = %err, "API request failed");
            err
        })
    }

    async fn send(&self, request: RequestDescriptor) -> Result<ResponsePayload> {
        let url = self.target_url(&request.endpoint)?;
        let headers = merge_headers(&request.headers)?;

        debug!(method = %request.method, url = %url, "Sending API request");

        let mut builder = self
            .http
            .request(request.method.to_reqwest(), url)
            .headers(headers);
        if let Some(body) = &request.body {
            let encoded = serde_json::to_string(body).map_err(|e| Error::Encode(e.to_string()))?;
            builder = builder.body(encoded);
        }

        let response = builder.send().await?;
        read_payload(response).await
    }
}

fn merge_headers(overrides: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    for (name, value) in overrides {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

async fn read_payload(response: Response) -> Result<ResponsePayload> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::Http {
            status: status.as_u16(),
            message,
        });
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains(JSON_CONTENT_TYPE));
    if !is_json {
        return Ok(None);
    }

    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&text).map(Some).map_err(Error::from)
}

fn decode_payload<T>(method: HttpMethod, endpoint: &str, payload: ResponsePayload) -> Result<T>
where
    T: DeserializeOwned,
{
    let result = match payload {
        Some(value) => serde_json::from_value(value).map_err(Error::from),
        None => Err(Error::Decode("expected a JSON body, got none".to_string())),
    };
    log_decode_failure(method, endpoint, result)
}

fn log_decode_failure<T>(method: HttpMethod, endpoint: &str, result: Result<T>) -> Result<T> {
    result.map_err(|err| {
        error!(%method, endpoint, error = %err, "Failed to decode API response");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuntimeConfig;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Counts ERROR events emitted by this crate.
    #[derive(Clone, Default)]
    struct ErrorCounter(Arc<AtomicUsize>);

    impl ErrorCounter {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            if *meta.level() == Level::ERROR && meta.target().starts_with("distrischool_core") {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_errors() -> (ErrorCounter, tracing::subscriber::DefaultGuard) {
        let counter = ErrorCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        (counter, tracing::subscriber::set_default(subscriber))
    }

    fn test_client(server: &MockServer) -> ApiClient {
        ApiClient::with_base_url(format!("{}/api", server.uri())).unwrap()
    }

    #[test]
    fn url_for_joins_with_single_slash() {
        let client = ApiClient::with_base_url("http://h/api").unwrap();
        assert_eq!(client.url_for("/alunos"), "http://h/api/alunos");
        assert_eq!(client.url_for("alunos"), "http://h/api/alunos");

        let trailing = ApiClient::with_base_url("http://h/api/").unwrap();
        assert_eq!(trailing.url_for("/alunos"), "http://h/api/alunos");
    }

    #[test]
    fn url_for_keeps_relative_base() {
        let config = ApiClientConfig::new()
            .with_build_time_url(None::<String>)
            .with_runtime(RuntimeConfig::new());
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "/api");
        assert_eq!(client.url_for("/users/1"), "/api/users/1");
    }

    #[test]
    fn relative_base_resolved_against_origin() {
        let config = ApiClientConfig::new()
            .with_build_time_url(None::<String>)
            .with_origin("http://localhost:8080");
        let client = ApiClient::new(&config).unwrap();
        let url = client.target_url("/alunos").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/alunos");
    }

    #[tokio::test]
    async fn relative_base_without_origin_is_rejected() {
        let config = ApiClientConfig::new().with_build_time_url(None::<String>);
        let client = ApiClient::new(&config).unwrap();
        let err = client.get("/alunos").await.unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn get_returns_json_unmodified() {
        let server = MockServer::start().await;
        let body = json!({"content": [1, 2, 3], "totalPages": 1});
        Mock::given(method("GET"))
            .and(path("/api/professores"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let payload = test_client(&server).get("/professores").await.unwrap();
        assert_eq!(payload, Some(body));
    }

    #[tokio::test]
    async fn get_returns_none_for_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let payload = test_client(&server).get("/health").await.unwrap();
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn json_content_type_with_empty_body_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/alunos/1"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let payload = test_client(&server)
            .put("/alunos/1", &json!({"nome": "Ana"}))
            .await
            .unwrap();
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn not_found_maps_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/alunos/99"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let err = test_client(&server).get("/alunos/99").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(matches!(err, Error::Http { ref message, .. } if message == "missing"));
    }

    #[tokio::test]
    async fn server_error_maps_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .post("/users", &json!({"name": "x"}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn post_serializes_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/alunos"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"nome": "Ana", "turma": "3A"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
            .mount(&server)
            .await;

        let payload = test_client(&server)
            .post("/alunos", &json!({"nome": "Ana", "turma": "3A"}))
            .await
            .unwrap();
        assert_eq!(payload, Some(json!({"id": 7})));
    }

    #[tokio::test]
    async fn delete_with_empty_body_resolves_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/users/3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let payload = test_client(&server).delete("/users/3").await.unwrap();
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{not json", "application/json"),
            )
            .mount(&server)
            .await;

        let err = test_client(&server).get("/users").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn caller_headers_merge_after_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(header("content-type", "application/json"))
            .and(header("x-request-id", "abc-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let request =
            RequestDescriptor::new(HttpMethod::Get, "/users").with_header("X-Request-Id", "abc-123");
        let payload = test_client(&server).execute(request).await.unwrap();
        assert_eq!(payload, Some(json!([])));
    }

    #[tokio::test]
    async fn caller_can_override_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/users/1"))
            .and(header("content-type", "application/merge-patch+json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let request = RequestDescriptor::new(HttpMethod::Put, "/users/1")
            .with_body(&json!({"name": "Bia"}))
            .unwrap()
            .with_header("Content-Type", "application/merge-patch+json");
        test_client(&server).execute(request).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_header_is_rejected() {
        let client = ApiClient::with_base_url("http://h/api").unwrap();
        let request = RequestDescriptor::new(HttpMethod::Get, "/users").with_header("bad header", "x");
        let err = client.execute(request).await.unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1/api").unwrap();
        let err = client.get("/alunos").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[tokio::test]
    async fn get_as_decodes_typed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;

        let item: Item = test_client(&server).get_as("/items/1").await.unwrap();
        assert_eq!(item, Item { id: 1 });
    }

    #[tokio::test]
    async fn get_as_without_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .get_as::<Item>("/items/1")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn get_list_reshapes_before_decoding() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"content": [{"id": 1}, {"id": 2}]})),
            )
            .mount(&server)
            .await;

        let items: Vec<Item> = test_client(&server)
            .get_list("/items", ResponseShape::UnwrapPaged)
            .await
            .unwrap();
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[tokio::test]
    async fn list_decode_failure_is_logged_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "not-a-number"}])))
            .mount(&server)
            .await;

        let (errors, _guard) = count_errors();
        let err = test_client(&server)
            .get_list::<Item>("/items", ResponseShape::PassthroughOrPaged)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(errors.count(), 1);
    }

    #[tokio::test]
    async fn page_decode_failure_is_logged_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"content": [{"id": "x"}]})),
            )
            .mount(&server)
            .await;

        let (errors, _guard) = count_errors();
        let err = test_client(&server)
            .get_page::<Item>("/items")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(errors.count(), 1);
    }

    #[tokio::test]
    async fn typed_decode_failure_is_logged_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
            .mount(&server)
            .await;

        let (errors, _guard) = count_errors();
        let err = test_client(&server)
            .get_as::<Item>("/items/1")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(errors.count(), 1);
    }

    #[tokio::test]
    async fn http_failure_on_list_is_logged_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (errors, _guard) = count_errors();
        let err = test_client(&server)
            .get_list::<Item>("/items", ResponseShape::PassthroughOrPaged)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(errors.count(), 1);
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
