use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A recipe as supplied by a recipe source.
///
/// Ingredient order is significant: it is both display order and scaling
/// order. `servings` is the baseline the ingredient quantities are written
/// for and must be at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// One priced ingredient within a store's itemization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedItem {
    pub ingredient: String,
    pub price: f64,
}

/// Itemized cost of a recipe's ingredients at a single store.
///
/// `total_price` always equals the rounded sum of `items[].price`; use
/// [`StorePrice::new`] so the total is derived rather than supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePrice {
    pub store_name: String,
    pub total_price: f64,
    pub items: Vec<PricedItem>,
}

impl StorePrice {
    pub fn new(store_name: impl Into<String>, items: Vec<PricedItem>) -> Self {
        let total_price = round2(items.iter().fold(0.0, |sum, item| sum + item.price));
        StorePrice {
            store_name: store_name.into(),
            total_price,
            items,
        }
    }

    /// True when the store carried none of the requested ingredients
    pub fn is_unmatched(&self) -> bool {
        self.items.is_empty()
    }
}

/// Snapshot of unit prices: store name -> ingredient name -> price.
///
/// Ingredient keys are stored lowercased so lookups are case-insensitive.
/// Store names are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, HashMap<String, f64>>")]
#[serde(into = "BTreeMap<String, BTreeMap<String, f64>>")]
pub struct PriceCatalog {
    stores: BTreeMap<String, HashMap<String, f64>>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a store's price for one ingredient, returning the replaced price
    pub fn insert(&mut self, store: &str, ingredient: &str, price: f64) -> Option<f64> {
        self.stores
            .entry(store.to_string())
            .or_default()
            .insert(normalize_key(ingredient), price)
    }

    /// Register a store even if it has no prices yet
    pub fn add_store(&mut self, store: &str) {
        self.stores.entry(store.to_string()).or_default();
    }

    pub fn with_store<'a, I>(mut self, store: &str, prices: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        self.add_store(store);
        for (ingredient, price) in prices {
            self.insert(store, ingredient, price);
        }
        self
    }

    /// Case-insensitive price lookup
    pub fn price(&self, store: &str, ingredient: &str) -> Option<f64> {
        self.stores
            .get(store)
            .and_then(|prices| prices.get(&normalize_key(ingredient)))
            .copied()
    }

    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl From<HashMap<String, HashMap<String, f64>>> for PriceCatalog {
    fn from(raw: HashMap<String, HashMap<String, f64>>) -> Self {
        let mut catalog = PriceCatalog::new();
        for (store, prices) in raw {
            catalog.add_store(&store);
            // Keys differing only in case collapse; sorted order makes the last one win
            let mut prices: Vec<(String, f64)> = prices.into_iter().collect();
            prices.sort_by(|a, b| a.0.cmp(&b.0));
            for (ingredient, price) in prices {
                if let Some(previous) = catalog.insert(&store, &ingredient, price) {
                    warn!(
                        "{}: duplicate price for '{}' ({} replaced by {})",
                        store, ingredient, previous, price
                    );
                }
            }
        }
        catalog
    }
}

impl From<PriceCatalog> for BTreeMap<String, BTreeMap<String, f64>> {
    fn from(catalog: PriceCatalog) -> Self {
        catalog
            .stores
            .into_iter()
            .map(|(store, prices)| (store, prices.into_iter().collect()))
            .collect()
    }
}

fn normalize_key(ingredient: &str) -> String {
    ingredient.trim().to_lowercase()
}

/// Round to two decimal places (cents)
///
/// Adding `0.0` turns a negative zero into positive zero so empty totals
/// sort and serialize as `0.0`.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}
