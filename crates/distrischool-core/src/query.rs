//! Query-string helpers for list endpoints.
//!
//! Endpoints are plain strings relative to the base URL, so query parameters
//! are appended to the endpoint before it reaches the client.

use std::fmt::Display;
use url::form_urlencoded;

/// Ordered query-string pairs for list and search endpoints.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Start with no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Push `key=value` only for `Some`.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Push `key=value` unconditionally.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Whether nothing was pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode the pairs as `key=value&...` without a leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Append the encoded pairs to an endpoint path.
    #[must_use]
    pub fn apply_to(&self, endpoint: &str) -> String {
        if self.is_empty() {
            return endpoint.to_string();
        }
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{endpoint}{separator}{}", self.to_query_string())
    }
}

/// Page selection for pageable endpoints (`page`, `size`, `sort`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
    /// Sort expressions such as `nome,asc`.
    pub sort: Vec<String>,
}

impl PageRequest {
    /// Request a specific page.
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            sort: Vec::new(),
        }
    }

    /// Add a sort expression (`field` or `field,asc|desc`).
    #[must_use]
    pub fn sorted_by(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    /// Convert into query parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("page", self.page);
        params.push_opt("size", self.size);
        for sort in &self.sort {
            params.push("sort", sort);
        }
        params
    }
}
