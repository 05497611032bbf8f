//! Edge invocation descriptors
//!
//! Request and response shapes exchanged with the hosting platform. Header
//! collections map a lowercase header name to an ordered list of entries, so a
//! single name can carry several declared values.

use crate::http::response::RedirectResponse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type HeaderMap = BTreeMap<String, Vec<HeaderEntry>>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeaderEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

/// Viewer request as delivered by the platform
///
/// Absent fields stay absent and unknown fields are kept as-is, so a
/// pass-through hands back exactly what came in.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EdgeRequest {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EdgeRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: None,
            headers: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Request method, `GET` when the descriptor does not carry one
    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }

    /// Append a header value under its lowercase name
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .entry(key.to_ascii_lowercase())
            .or_default()
            .push(HeaderEntry {
                key: Some(key.to_string()),
                value: value.to_string(),
            });
        self
    }

    /// First value of a header, looked up by name case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .get(&name.to_ascii_lowercase())
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }

    pub fn header_count(&self) -> usize {
        self.headers
            .as_ref()
            .map_or(0, |headers| headers.values().map(Vec::len).sum())
    }
}

/// Redirect response in platform shape
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EdgeResponse {
    pub status: String,
    #[serde(rename = "statusDescription")]
    pub status_description: String,
    pub headers: HeaderMap,
}

impl From<RedirectResponse> for EdgeResponse {
    fn from(response: RedirectResponse) -> Self {
        let mut headers = HeaderMap::new();
        for header in response.headers {
            headers
                .entry(header.name.to_ascii_lowercase())
                .or_default()
                .push(HeaderEntry {
                    key: Some(header.name.to_string()),
                    value: header.value,
                });
        }

        Self {
            status: response.status.as_u16().to_string(),
            status_description: response.status_text.to_string(),
            headers,
        }
    }
}

/// What the platform should do with a request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EdgeOutcome {
    /// Respond directly; the request never reaches the origin
    Respond(EdgeResponse),
    /// Continue normal processing with this (unmodified) request
    Continue(EdgeRequest),
}

impl EdgeOutcome {
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Respond(_))
    }

    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Respond(response) => Some(response.status.as_str()),
            Self::Continue(_) => None,
        }
    }
}

const UNKNOWN: &str = "Unknown";

/// Viewer details used for diagnostics only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientInfo {
    pub user_agent: String,
    pub client_ip: String,
    pub country: String,
}

impl ClientInfo {
    pub fn from_request(request: &EdgeRequest) -> Self {
        let get = |name: &str| request.header(name).unwrap_or(UNKNOWN).to_string();
        Self {
            user_agent: get("user-agent"),
            client_ip: get("cloudfront-viewer-address"),
            country: get("cloudfront-viewer-country"),
        }
    }
}
