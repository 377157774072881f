mod factory;
mod http;
mod sample;

pub use factory::SourceFactory;
pub use http::{HttpPriceSource, HttpRecipeSource};
pub use sample::{StaticPriceSource, StaticRecipeSource};

use crate::error::SourcingError;
use crate::model::{PriceCatalog, Recipe};
use async_trait::async_trait;
use serde::Serialize;

/// What the caller asked for. Sources may use it to narrow their results;
/// the returned recipes are filtered and scaled afterwards regardless.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchCriteria {
    pub restrictions: Vec<String>,
    pub servings: u32,
}

/// Supplier of raw recipe records
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Source name used in logs and errors (e.g. "static", "http")
    fn source_name(&self) -> &str;

    async fn fetch_recipes(&self, criteria: &SearchCriteria) -> Result<Vec<Recipe>, SourcingError>;
}

/// Supplier of per-store ingredient prices
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Fetch a fresh catalog snapshot; never cached by callers
    async fn fetch_catalog(&self) -> Result<PriceCatalog, SourcingError>;
}
