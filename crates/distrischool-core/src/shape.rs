//! Response normalization strategies.
//!
//! List endpoints do not agree on a response shape: some return a Spring
//! style page (`{"content": [...], "totalPages": ...}`), some a bare array,
//! and some nothing at all. The client itself stays shape-agnostic; each
//! service picks one [`ResponseShape`] per endpoint instead.

use crate::client::ResponsePayload;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a service reshapes the payload of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    /// Expect a paged envelope and return its `content`, or `[]` without one.
    UnwrapPaged,
    /// Return a bare array as-is, otherwise unwrap `content`, otherwise `[]`.
    PassthroughOrPaged,
    /// Return the payload exactly as decoded.
    Direct,
}

impl ResponseShape {
    /// Apply the strategy to a raw payload.
    ///
    /// Both list strategies always produce `Some(Value::Array(_))`.
    #[must_use]
    pub fn apply(self, payload: ResponsePayload) -> ResponsePayload {
        match self {
            Self::Direct => payload,
            Self::UnwrapPaged => Some(Value::Array(paged_content(payload))),
            Self::PassthroughOrPaged => Some(Value::Array(match payload {
                Some(Value::Array(items)) => items,
                other => paged_content(other),
            })),
        }
    }

    /// Apply the strategy and decode the result as a list of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if an element does not match `T`, or if a
    /// [`ResponseShape::Direct`] payload is empty.
    pub fn decode_list<T>(self, payload: ResponsePayload) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        match self.apply(payload) {
            Some(value) => serde_json::from_value(value).map_err(Error::from),
            None => Err(Error::Decode("expected a JSON array, got none".to_string())),
        }
    }
}

fn paged_content(payload: ResponsePayload) -> Vec<Value> {
    match payload {
        Some(Value::Object(mut envelope)) => match envelope.remove("content") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// A page of results as returned by pageable endpoints.
///
/// Only `content` matters to the services; the remaining metadata is kept
/// for callers that render pagination controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Total number of items across all pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
    /// Total number of pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// Zero-based page index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Requested page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Whether this is the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<bool>,
    /// Whether this is the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<bool>,
    /// Whether the page has no items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
}

impl<T> Page<T> {
    /// Wrap a plain list as a single, complete page.
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            empty: Some(items.is_empty()),
            content: items,
            total_elements: Some(len as u64),
            total_pages: Some(1),
            number: Some(0),
            size: u32::try_from(len).ok(),
            first: Some(true),
            last: Some(true),
        }
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Returns true if the server reports pages after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        match (self.last, self.number, self.total_pages) {
            (Some(last), _, _) => !last,
            (None, Some(number), Some(total)) => number.saturating_add(1) < total,
            _ => false,
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Build a page from a raw payload.
    ///
    /// A bare array becomes a single page and an empty payload an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the payload does not match the page shape.
    pub fn from_payload(payload: ResponsePayload) -> Result<Self> {
        match payload {
            Some(Value::Array(items)) => {
                let items = serde_json::from_value(Value::Array(items))?;
                Ok(Self::from_items(items))
            }
            Some(value) => serde_json::from_value(value).map_err(Error::from),
            None => Ok(Self::from_items(Vec::new())),
        }
    }
}
