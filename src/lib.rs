pub mod builder;
pub mod config;
pub mod error;
pub mod filter;
pub mod ingredient;
pub mod model;
pub mod orchestrator;
pub mod pricing;
pub mod restrictions;
pub mod scaler;
pub mod sources;
pub mod uniffi_bindings;

pub use builder::RecipeSourcerBuilder;
pub use config::SourcingConfig;
pub use error::SourcingError;
pub use filter::filter_recipes;
pub use ingredient::{ingredient_name, ingredient_names, IngredientLine};
pub use model::{PriceCatalog, PricedItem, Recipe, StorePrice};
pub use orchestrator::RecipeSourcer;
pub use pricing::{aggregate_prices, hide_unmatched_stores};
pub use restrictions::{ExclusionList, Restriction, RestrictionRegistry};
pub use scaler::scale_recipe;
pub use sources::{
    HttpPriceSource, HttpRecipeSource, PriceSource, RecipeSource, SearchCriteria, SourceFactory,
    StaticPriceSource, StaticRecipeSource,
};

/// Search for recipes using sources from `config.toml` / environment
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = recipe_cost::search_recipes(6, &["vegetarian"]).await?;
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes<S: AsRef<str>>(
    target_servings: i64,
    restrictions: &[S],
) -> Result<Vec<Recipe>, SourcingError> {
    let config = SourcingConfig::load()?;
    RecipeSourcer::from_config(&config)?
        .search(target_servings, restrictions)
        .await
}

/// Compare a recipe's cost across stores using sources from `config.toml` / environment
pub async fn compare_prices(recipe: &Recipe) -> Result<Vec<StorePrice>, SourcingError> {
    let config = SourcingConfig::load()?;
    RecipeSourcer::from_config(&config)?.price(recipe).await
}
