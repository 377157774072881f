use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct SourcingConfig {
    /// Where recipes come from
    #[serde(default)]
    pub recipe_source: SourceConfig,
    /// Where store prices come from
    #[serde(default)]
    pub price_source: SourceConfig,
    /// Per-call timeout for sources, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Leave out stores that carry none of a recipe's ingredients
    #[serde(default)]
    pub hide_unmatched_stores: bool,
    /// Extra restriction vocabularies, e.g. `gluten-free = ["flour", "wheat"]`
    #[serde(default)]
    pub restrictions: HashMap<String, Vec<String>>,
}

/// Configuration for a recipe or price source
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// "static" (built-in sample data) or "http"
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Endpoint URL, required for "http"
    pub url: Option<String>,
    /// Bearer token sent to the endpoint (can also be set via environment variable)
    pub api_key: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            url: None,
            api_key: None,
        }
    }
}

impl Default for SourcingConfig {
    fn default() -> Self {
        Self {
            recipe_source: SourceConfig::default(),
            price_source: SourceConfig::default(),
            timeout: default_timeout(),
            hide_unmatched_stores: false,
            restrictions: HashMap::new(),
        }
    }
}

fn default_kind() -> String {
    "static".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl SourcingConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_COST__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_COST__PRICE_SOURCE__URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`SourcingConfig::load`] for the priority order.
pub fn load_config() -> Result<SourcingConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_COST__RECIPE_SOURCE__KIND
        .add_source(
            Environment::with_prefix("RECIPE_COST")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Parse configuration from a TOML string, applying the same defaults as [`load_config`]
pub fn parse_config(toml: &str) -> Result<SourcingConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_kind(), "static");
        assert_eq!(default_timeout(), 30);
    }

    #[test]
    fn test_sourcing_config_default() {
        let config = SourcingConfig::default();
        assert_eq!(config.recipe_source.kind, "static");
        assert_eq!(config.price_source.kind, "static");
        assert!(!config.hide_unmatched_stores);
        assert!(config.restrictions.is_empty());
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.recipe_source.kind, "static");
        assert!(config.price_source.url.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            timeout = 5
            hide_unmatched_stores = true

            [recipe_source]
            kind = "http"
            url = "https://recipes.example.com/search"
            api_key = "secret"

            [price_source]
            kind = "http"
            url = "https://prices.example.com/catalog"

            [restrictions]
            gluten-free = ["flour", "wheat"]
        "#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.timeout, 5);
        assert!(config.hide_unmatched_stores);
        assert_eq!(config.recipe_source.kind, "http");
        assert_eq!(config.recipe_source.api_key.as_deref(), Some("secret"));
        assert_eq!(
            config.price_source.url.as_deref(),
            Some("https://prices.example.com/catalog")
        );
        assert_eq!(config.restrictions["gluten-free"], vec!["flour", "wheat"]);
    }

    #[test]
    fn test_load_config_without_file() {
        // Missing config.toml falls back to defaults
        let result = load_config();
        assert!(result.is_ok());
    }
}
