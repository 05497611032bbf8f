// Configuration types module
// Defines all configuration-related data structures

use crate::http::assets::DEFAULT_STATIC_EXTENSIONS;
use crate::http::response::DEFAULT_MAX_HEADER_BYTES;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub routing: RoutingConfig,
    pub assets: AssetsConfig,
    pub response: ResponseConfig,
    pub logging: LoggingConfig,
}

/// Application ownership of first path segments
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RoutingConfig {
    /// Registered application subdirectories; empty means every first segment
    pub applications: Vec<String>,
}

/// Static asset extension table
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Replaces the built-in table when set
    pub extensions: Vec<String>,
    /// Appended to `extensions`
    pub extra_extensions: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_STATIC_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            extra_extensions: Vec::new(),
        }
    }
}

/// Redirect response configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ResponseConfig {
    pub diagnostic_headers: bool,
    /// Longer encoded header values fall back to a `Location`-only redirect
    pub max_header_bytes: usize,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            diagnostic_headers: true,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Decision log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            show_headers: false,
            access_log_format: "combined".to_string(),
        }
    }
}
