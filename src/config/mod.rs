// Configuration module entry point
// Loads, validates and converts configuration into a routing policy

mod types;

use crate::http::assets::{normalize_extension, StaticAssetClassifier};
use crate::routing::RoutingPolicy;
use thiserror::Error;

// Re-export public types
pub use types::{AssetsConfig, Config, LoggingConfig, ResponseConfig, RoutingConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("empty static extension in assets.{field}")]
    EmptyExtension { field: &'static str },

    #[error("invalid application name {0:?}: must be a non-empty segment without '/'")]
    InvalidApplication(String),
}

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; `EDGE_`-prefixed environment variables override it
    /// (e.g. `EDGE_LOGGING__LEVEL=debug`).
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("EDGE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("response.diagnostic_headers", true)?
            .set_default("response.max_header_bytes", 8192)?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from an inline TOML document
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic checks beyond what deserialization enforces
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tables = [
            ("extensions", &self.assets.extensions),
            ("extra_extensions", &self.assets.extra_extensions),
        ];
        for (field, table) in tables {
            if table.iter().any(|ext| normalize_extension(ext).is_none()) {
                return Err(ConfigError::EmptyExtension { field });
            }
        }

        if let Some(bad) = self
            .routing
            .applications
            .iter()
            .find(|app| app.is_empty() || app.contains('/'))
        {
            return Err(ConfigError::InvalidApplication(bad.clone()));
        }

        Ok(())
    }

    /// Build the routing policy described by this configuration
    pub fn routing_policy(&self) -> Result<RoutingPolicy, ConfigError> {
        self.validate()?;
        let assets = StaticAssetClassifier::new(&self.assets.extensions)
            .extended_with(&self.assets.extra_extensions);
        Ok(RoutingPolicy::new(assets).with_applications(self.routing.applications.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::assets::DEFAULT_STATIC_EXTENSIONS;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert!(config.response.diagnostic_headers);
        assert_eq!(config.response.max_header_bytes, 8192);
        assert!(config.routing.applications.is_empty());

        let policy = config.routing_policy().unwrap();
        assert_eq!(policy.assets().len(), DEFAULT_STATIC_EXTENSIONS.len());
        assert_eq!(policy.registered_applications(), None);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(
            r#"
            [routing]
            applications = ["blog", "产品"]

            [assets]
            extra_extensions = ["wasm"]

            [response]
            diagnostic_headers = false
            max_header_bytes = 2048

            [logging]
            level = "debug"
            access_log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.routing.applications, vec!["blog", "产品"]);
        assert!(!config.response.diagnostic_headers);
        assert_eq!(config.response.max_header_bytes, 2048);
        assert_eq!(config.logging.access_log_format, "json");
        assert!(config.logging.access_log);

        let policy = config.routing_policy().unwrap();
        assert!(policy.assets().is_static_asset("/blog/app.wasm"));
        assert!(policy.assets().is_static_asset("/blog/app.js"));
        assert!(!policy.owns("missing"));
    }

    #[test]
    fn test_replacing_extension_table() {
        let config = Config::from_toml_str("[assets]\nextensions = [\"css\"]\n").unwrap();
        let policy = config.routing_policy().unwrap();
        assert_eq!(policy.assets().len(), 1);
        assert!(!policy.assets().is_static_asset("/app.js"));
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let err = Config::from_toml_str("[assets]\nextra_extensions = [\".\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyExtension { field: "extra_extensions" }));

        let err = Config::from_toml_str("[routing]\napplications = [\"a/b\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApplication(name) if name == "a/b"));

        assert!(matches!(
            Config::from_toml_str("[logging]\naccess_log = \"yes\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = Config::load_from("does-not-exist/edge-router").unwrap();
        assert_eq!(config.logging.access_log_format, "combined");
        assert_eq!(config.assets.extensions.len(), DEFAULT_STATIC_EXTENSIONS.len());
    }
}
