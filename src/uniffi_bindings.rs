//! UniFFI bindings for recipe-cost
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! The pure filter, scale and price operations are exposed synchronously; callers
//! supply recipes and catalogs themselves.

use std::fmt;

use crate::{PriceCatalog, PricedItem, Recipe, RestrictionRegistry, SourcingError, StorePrice};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub servings: u32,
    /// Empty string if none
    pub image_url: String,
    /// Empty string if none
    pub source_url: String,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            id: recipe.id,
            title: recipe.title,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            servings: recipe.servings,
            image_url: recipe.image_url.unwrap_or_default(),
            source_url: recipe.source_url.unwrap_or_default(),
        }
    }
}

impl From<FfiRecipe> for Recipe {
    fn from(ffi: FfiRecipe) -> Self {
        Recipe {
            id: ffi.id,
            title: ffi.title,
            ingredients: ffi.ingredients,
            instructions: ffi.instructions,
            servings: ffi.servings,
            image_url: non_empty(ffi.image_url),
            source_url: non_empty(ffi.source_url),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// One catalog row (since nested maps aren't directly supported in UniFFI)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiPriceEntry {
    pub store_name: String,
    pub ingredient: String,
    pub price: f64,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiPricedItem {
    pub ingredient: String,
    pub price: f64,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiStorePrice {
    pub store_name: String,
    pub total_price: f64,
    pub items: Vec<FfiPricedItem>,
}

impl From<PricedItem> for FfiPricedItem {
    fn from(item: PricedItem) -> Self {
        FfiPricedItem {
            ingredient: item.ingredient,
            price: item.price,
        }
    }
}

impl From<StorePrice> for FfiStorePrice {
    fn from(store: StorePrice) -> Self {
        FfiStorePrice {
            store_name: store.store_name,
            total_price: store.total_price,
            items: store.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiSourcingError {
    /// Serving count was zero or negative
    InvalidServings { message: String },
    /// Ingredient line could not be parsed
    MalformedIngredientLine { message: String },
    /// A recipe or price source failed
    UpstreamUnavailable { message: String },
    /// Configuration or builder error
    ConfigError { message: String },
}

impl fmt::Display for FfiSourcingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiSourcingError::InvalidServings { message } => {
                write!(f, "Invalid servings: {}", message)
            }
            FfiSourcingError::MalformedIngredientLine { message } => {
                write!(f, "Malformed ingredient line: {}", message)
            }
            FfiSourcingError::UpstreamUnavailable { message } => {
                write!(f, "Upstream unavailable: {}", message)
            }
            FfiSourcingError::ConfigError { message } => write!(f, "Config error: {}", message),
        }
    }
}

impl std::error::Error for FfiSourcingError {}

impl From<SourcingError> for FfiSourcingError {
    fn from(err: SourcingError) -> Self {
        let message = err.to_string();
        match err {
            SourcingError::InvalidServings(_) => FfiSourcingError::InvalidServings { message },
            SourcingError::MalformedIngredientLine(_) => {
                FfiSourcingError::MalformedIngredientLine { message }
            }
            SourcingError::UpstreamUnavailable { .. } | SourcingError::FetchError(_) => {
                FfiSourcingError::UpstreamUnavailable { message }
            }
            SourcingError::BuilderError(_) | SourcingError::ConfigError(_) => {
                FfiSourcingError::ConfigError { message }
            }
        }
    }
}

/// Keep recipes satisfying every restriction, using the built-in restriction table
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn filter_recipes(recipes: Vec<FfiRecipe>, restrictions: Vec<String>) -> Vec<FfiRecipe> {
    let recipes = recipes.into_iter().map(Recipe::from).collect();
    crate::filter_recipes(recipes, &restrictions, &RestrictionRegistry::builtin())
        .into_iter()
        .map(FfiRecipe::from)
        .collect()
}

/// Scale a recipe's ingredient quantities to a new serving count
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn scale_recipe(
    recipe: FfiRecipe,
    target_servings: i64,
) -> Result<FfiRecipe, FfiSourcingError> {
    let scaled = crate::scale_recipe(&recipe.into(), target_servings)?;
    Ok(scaled.into())
}

/// Price a recipe against a flattened catalog, cheapest store first
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn compare_prices(recipe: FfiRecipe, catalog: Vec<FfiPriceEntry>) -> Vec<FfiStorePrice> {
    let mut prices = PriceCatalog::new();
    for entry in &catalog {
        prices.insert(&entry.store_name, &entry.ingredient, entry.price);
    }

    let names = crate::ingredient_names(&recipe.ingredients);
    crate::aggregate_prices(&names, &prices)
        .into_iter()
        .map(FfiStorePrice::from)
        .collect()
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
