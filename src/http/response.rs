//! Redirect response building module
//!
//! Builds the outbound 302 response for a redirect decision, independent of the
//! platform that finally serializes it.

use super::encoding::safe_header_value;
use crate::error::{Outcome, RoutingError};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::{Response, StatusCode};

pub const LOCATION: &str = "Location";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
pub const VARY: &str = "Vary";
pub const X_REDIRECTED_FROM: &str = "X-Redirected-From";
pub const X_REDIRECTED_TO: &str = "X-Redirected-To";
pub const X_SUBDIRECTORY_REDIRECT: &str = "X-Subdirectory-Redirect";
pub const X_ROOT_FALLBACK: &str = "X-Root-Fallback";

/// Longest encoded header value the builder emits
pub const DEFAULT_MAX_HEADER_BYTES: usize = 8192;

/// Single header as it appears on the wire (canonical name casing)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResponse {
    pub status: StatusCode,
    pub status_text: &'static str,
    pub headers: Vec<ResponseHeader>,
}

impl RedirectResponse {
    /// Redirect carrying only a `Location` header
    pub fn minimal(target: &str) -> Self {
        Self {
            status: StatusCode::FOUND,
            status_text: "Found",
            headers: vec![ResponseHeader {
                name: LOCATION,
                value: safe_header_value(target),
            }],
        }
    }

    /// First value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.header(LOCATION)
    }

    /// Convert into a hyper response with an empty body
    pub fn into_hyper(self) -> Response<Full<Bytes>> {
        let location = self.location().unwrap_or("/").to_string();
        let mut builder = Response::builder().status(self.status);
        for header in &self.headers {
            builder = builder.header(header.name, header.value.as_str());
        }

        builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
            log_build_error("302", &e);
            let mut response = Response::new(Full::new(Bytes::new()));
            *response.status_mut() = StatusCode::FOUND;
            if let Ok(value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(hyper::header::LOCATION, value);
            }
            response
        })
    }
}

/// Redirect response builder
#[derive(Debug, Clone, Copy)]
pub struct RedirectBuilder {
    /// Emit `X-Redirected-*` and the redirect marker header
    pub diagnostic_headers: bool,
    /// Limit on each encoded header value
    pub max_header_bytes: usize,
}

impl Default for RedirectBuilder {
    fn default() -> Self {
        Self {
            diagnostic_headers: true,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
        }
    }
}

impl RedirectBuilder {
    /// Build the full redirect response
    ///
    /// Falls back to [`RedirectResponse::minimal`] if any header value is over
    /// the size limit or cannot be represented.
    pub fn build(
        &self,
        target: &str,
        original_path: &str,
        subdirectory: Option<&str>,
    ) -> Outcome<RedirectResponse> {
        match self.headers(target, original_path, subdirectory) {
            Ok(headers) => Outcome::Value(RedirectResponse {
                status: StatusCode::FOUND,
                status_text: "Found",
                headers,
            }),
            Err(reason) => Outcome::fallback(RedirectResponse::minimal(target), reason),
        }
    }

    fn headers(
        &self,
        target: &str,
        original_path: &str,
        subdirectory: Option<&str>,
    ) -> Result<Vec<ResponseHeader>, RoutingError> {
        let limit = self.max_header_bytes;
        let header = |name: &'static str, raw: &str| checked_header(name, raw, limit);
        let mut headers = vec![
            header(LOCATION, target)?,
            header(CACHE_CONTROL, "no-cache")?,
            header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")?,
            header(CONTENT_DISPOSITION, "inline")?,
            header(VARY, "Origin")?,
        ];

        if self.diagnostic_headers {
            let marker = if subdirectory.is_some() {
                X_SUBDIRECTORY_REDIRECT
            } else {
                X_ROOT_FALLBACK
            };
            headers.push(header(X_REDIRECTED_FROM, original_path)?);
            headers.push(header(X_REDIRECTED_TO, target)?);
            headers.push(header(marker, "true")?);
        }

        Ok(headers)
    }
}

/// Build a redirect response with the default builder settings
pub fn build_redirect(
    target: &str,
    original_path: &str,
    subdirectory: Option<&str>,
) -> Outcome<RedirectResponse> {
    RedirectBuilder::default().build(target, original_path, subdirectory)
}

/// Encode a header value and check it is acceptable on the wire
fn checked_header(name: &'static str, raw: &str, limit: usize) -> Result<ResponseHeader, RoutingError> {
    let value = safe_header_value(raw);
    if value.len() > limit {
        return Err(RoutingError::HeaderTooLong {
            header: name,
            len: value.len(),
            limit,
        });
    }
    // encoded values are printable ASCII; this guards the wire format itself
    HeaderValue::from_str(&value)
        .map_err(|source| RoutingError::InvalidHeaderValue { header: name, source })?;
    Ok(ResponseHeader { name, value })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
