use std::sync::Arc;
use std::time::Duration;

use crate::restrictions::{Restriction, RestrictionRegistry};
use crate::sources::{PriceSource, RecipeSource};
use crate::{RecipeSourcer, SourcingError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for configuring a [`RecipeSourcer`]
#[derive(Default)]
pub struct RecipeSourcerBuilder {
    recipe_source: Option<Arc<dyn RecipeSource>>,
    price_source: Option<Arc<dyn PriceSource>>,
    registry: Option<RestrictionRegistry>,
    extra_restrictions: Vec<Arc<dyn Restriction>>,
    timeout: Option<Duration>,
    hide_unmatched_stores: bool,
}

impl RecipeSourcerBuilder {
    /// Set the source recipes are fetched from
    ///
    /// # Example
    /// ```
    /// use recipe_cost::{RecipeSourcer, StaticRecipeSource};
    ///
    /// let builder = RecipeSourcer::builder()
    ///     .recipe_source(StaticRecipeSource::sample());
    /// ```
    pub fn recipe_source<R: RecipeSource + 'static>(mut self, source: R) -> Self {
        self.recipe_source = Some(Arc::new(source));
        self
    }

    pub fn recipe_source_boxed(mut self, source: Box<dyn RecipeSource>) -> Self {
        self.recipe_source = Some(Arc::from(source));
        self
    }

    pub fn recipe_source_shared(mut self, source: Arc<dyn RecipeSource>) -> Self {
        self.recipe_source = Some(source);
        self
    }

    /// Set the source store prices are fetched from
    ///
    /// # Example
    /// ```
    /// use recipe_cost::{RecipeSourcer, StaticPriceSource};
    ///
    /// let builder = RecipeSourcer::builder()
    ///     .price_source(StaticPriceSource::sample());
    /// ```
    pub fn price_source<P: PriceSource + 'static>(mut self, source: P) -> Self {
        self.price_source = Some(Arc::new(source));
        self
    }

    pub fn price_source_boxed(mut self, source: Box<dyn PriceSource>) -> Self {
        self.price_source = Some(Arc::from(source));
        self
    }

    pub fn price_source_shared(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.price_source = Some(source);
        self
    }

    /// Replace the restriction table (defaults to the built-in vegetarian and vegan)
    pub fn restrictions(mut self, registry: RestrictionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register one more restriction on top of the table
    ///
    /// # Example
    /// ```
    /// use recipe_cost::{ExclusionList, RecipeSourcer};
    ///
    /// let builder = RecipeSourcer::builder()
    ///     .restriction(ExclusionList::new("nut-free", ["peanut", "almond", "walnut"]));
    /// ```
    pub fn restriction<R: Restriction + 'static>(mut self, restriction: R) -> Self {
        self.extra_restrictions.push(Arc::new(restriction));
        self
    }

    /// Set a timeout for each call to a recipe or price source
    ///
    /// # Example
    /// ```
    /// use recipe_cost::RecipeSourcer;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeSourcer::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Leave stores that carry none of a recipe's ingredients out of price results
    pub fn hide_unmatched_stores(mut self) -> Self {
        self.hide_unmatched_stores = true;
        self
    }

    /// Build the sourcer
    ///
    /// # Errors
    /// Returns `SourcingError::BuilderError` if either source is missing or
    /// the timeout is zero.
    ///
    /// # Example
    /// ```
    /// use recipe_cost::{RecipeSourcer, StaticPriceSource, StaticRecipeSource};
    ///
    /// let sourcer = RecipeSourcer::builder()
    ///     .recipe_source(StaticRecipeSource::sample())
    ///     .price_source(StaticPriceSource::sample())
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn build(self) -> Result<RecipeSourcer, SourcingError> {
        let recipe_source = self.recipe_source.ok_or_else(|| {
            SourcingError::BuilderError(
                "No recipe source specified. Use .recipe_source()".to_string(),
            )
        })?;
        let price_source = self.price_source.ok_or_else(|| {
            SourcingError::BuilderError(
                "No price source specified. Use .price_source()".to_string(),
            )
        })?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(SourcingError::BuilderError(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        let mut registry = self.registry.unwrap_or_default();
        for restriction in self.extra_restrictions {
            registry.register_shared(restriction);
        }

        Ok(RecipeSourcer {
            recipe_source,
            price_source,
            registry,
            timeout,
            hide_unmatched_stores: self.hide_unmatched_stores,
        })
    }
}
