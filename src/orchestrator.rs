use crate::builder::RecipeSourcerBuilder;
use crate::config::SourcingConfig;
use crate::error::SourcingError;
use crate::filter::filter_recipes;
use crate::ingredient::ingredient_names;
use crate::model::{Recipe, StorePrice};
use crate::pricing::{aggregate_prices, hide_unmatched_stores};
use crate::restrictions::RestrictionRegistry;
use crate::scaler::{scale_recipe, validate_servings};
use crate::sources::{PriceSource, RecipeSource, SearchCriteria, SourceFactory};
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Entry point for searching recipes and comparing their cost.
///
/// Holds only immutable handles to its sources, so a single instance can
/// serve concurrent calls. Every call fetches fresh data.
#[derive(Clone)]
pub struct RecipeSourcer {
    pub(crate) recipe_source: Arc<dyn RecipeSource>,
    pub(crate) price_source: Arc<dyn PriceSource>,
    pub(crate) registry: RestrictionRegistry,
    pub(crate) timeout: Duration,
    pub(crate) hide_unmatched_stores: bool,
}

impl RecipeSourcer {
    /// Creates a new builder for configuring a sourcer
    pub fn builder() -> RecipeSourcerBuilder {
        RecipeSourcerBuilder::default()
    }

    /// Build sources, restrictions and policies from configuration
    pub fn from_config(config: &SourcingConfig) -> Result<Self, SourcingError> {
        let timeout = Duration::from_secs(config.timeout);
        let recipe_source = SourceFactory::recipe_source(&config.recipe_source, timeout)?;
        let price_source = SourceFactory::price_source(&config.price_source, timeout)?;
        info!(
            "Using '{}' recipe source and '{}' price source",
            recipe_source.source_name(),
            price_source.source_name()
        );

        let mut builder = Self::builder()
            .recipe_source_boxed(recipe_source)
            .price_source_boxed(price_source)
            .restrictions(RestrictionRegistry::with_exclusions(&config.restrictions))
            .timeout(timeout);
        if config.hide_unmatched_stores {
            builder = builder.hide_unmatched_stores();
        }
        builder.build()
    }

    /// Fetch recipes, keep those satisfying every restriction, and scale
    /// them to `target_servings`.
    ///
    /// # Errors
    /// - `InvalidServings` if `target_servings` is not positive (checked before any fetch)
    /// - `UpstreamUnavailable` if the recipe source fails, times out, or
    ///   returns a recipe with zero servings
    pub async fn search<S: AsRef<str>>(
        &self,
        target_servings: i64,
        restrictions: &[S],
    ) -> Result<Vec<Recipe>, SourcingError> {
        let servings = validate_servings(target_servings)?;
        let criteria = SearchCriteria {
            restrictions: restrictions.iter().map(|r| r.as_ref().to_string()).collect(),
            servings,
        };

        let source_name = self.recipe_source.source_name();
        let recipes = self
            .call_source(source_name, self.recipe_source.fetch_recipes(&criteria))
            .await?;

        if let Some(invalid) = recipes.iter().find(|recipe| recipe.servings == 0) {
            return Err(SourcingError::upstream(
                source_name,
                format!("recipe '{}' has zero servings", invalid.id),
            ));
        }

        let fetched = recipes.len();
        let matching = filter_recipes(recipes, restrictions, &self.registry);
        debug!(
            "{} of {} recipes satisfy {:?}",
            matching.len(),
            fetched,
            criteria.restrictions
        );

        matching
            .iter()
            .map(|recipe| scale_recipe(recipe, target_servings))
            .collect()
    }

    /// Compare the cost of a recipe's ingredients across stores, cheapest first.
    ///
    /// Quantity prefixes are stripped from ingredient lines before lookup.
    ///
    /// # Errors
    /// `UpstreamUnavailable` if the price source fails or times out.
    pub async fn price(&self, recipe: &Recipe) -> Result<Vec<StorePrice>, SourcingError> {
        let names = ingredient_names(&recipe.ingredients);

        let catalog = self
            .call_source(
                self.price_source.source_name(),
                self.price_source.fetch_catalog(),
            )
            .await?;

        let stores = aggregate_prices(&names, &catalog);
        if self.hide_unmatched_stores {
            Ok(hide_unmatched_stores(stores))
        } else {
            Ok(stores)
        }
    }

    pub fn restrictions(&self) -> &RestrictionRegistry {
        &self.registry
    }

    /// Run a collaborator call under the configured timeout, reporting any
    /// failure as `UpstreamUnavailable`
    async fn call_source<T, F>(&self, source_name: &str, call: F) -> Result<T, SourcingError>
    where
        F: Future<Output = Result<T, SourcingError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err @ SourcingError::UpstreamUnavailable { .. })) => Err(err),
            Ok(Err(err)) => {
                warn!("Source '{}' failed: {}", source_name, err);
                Err(SourcingError::upstream(source_name, err))
            }
            Err(_) => {
                warn!("Source '{}' timed out after {:?}", source_name, self.timeout);
                Err(SourcingError::upstream(
                    source_name,
                    format!("timed out after {:?}", self.timeout),
                ))
            }
        }
    }
}
