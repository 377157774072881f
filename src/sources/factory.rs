use crate::config::SourceConfig;
use crate::error::SourcingError;
use crate::sources::{
    HttpPriceSource, HttpRecipeSource, PriceSource, RecipeSource, StaticPriceSource,
    StaticRecipeSource,
};
use std::time::Duration;

const RECIPE_API_KEY_ENV: &str = "RECIPE_SOURCE_API_KEY";
const PRICE_API_KEY_ENV: &str = "PRICE_SOURCE_API_KEY";

pub struct SourceFactory;

impl SourceFactory {
    /// Create a recipe source from configuration
    pub fn recipe_source(
        config: &SourceConfig,
        timeout: Duration,
    ) -> Result<Box<dyn RecipeSource>, SourcingError> {
        match config.kind.as_str() {
            "static" => Ok(Box::new(StaticRecipeSource::sample())),
            "http" => {
                let url = require_url(config, "recipe_source")?;
                let api_key = api_key(config, RECIPE_API_KEY_ENV);
                Ok(Box::new(HttpRecipeSource::new(url, api_key, timeout)?))
            }
            other => Err(unknown_kind(other)),
        }
    }

    /// Create a price source from configuration
    pub fn price_source(
        config: &SourceConfig,
        timeout: Duration,
    ) -> Result<Box<dyn PriceSource>, SourcingError> {
        match config.kind.as_str() {
            "static" => Ok(Box::new(StaticPriceSource::sample())),
            "http" => {
                let url = require_url(config, "price_source")?;
                let api_key = api_key(config, PRICE_API_KEY_ENV);
                Ok(Box::new(HttpPriceSource::new(url, api_key, timeout)?))
            }
            other => Err(unknown_kind(other)),
        }
    }

    /// List all available source kinds
    pub fn available_kinds() -> Vec<&'static str> {
        vec!["static", "http"]
    }
}

fn require_url(config: &SourceConfig, section: &str) -> Result<String, SourcingError> {
    config.url.clone().ok_or_else(|| {
        SourcingError::BuilderError(format!("{}.url is required for kind 'http'", section))
    })
}

// Config first, then environment variable
fn api_key(config: &SourceConfig, env_var: &str) -> Option<String> {
    config
        .api_key
        .clone()
        .or_else(|| std::env::var(env_var).ok())
}

fn unknown_kind(kind: &str) -> SourcingError {
    SourcingError::BuilderError(format!(
        "Unknown source kind: {} (expected one of: {})",
        kind,
        SourceFactory::available_kinds().join(", ")
    ))
}
