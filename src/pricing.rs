use crate::model::{PriceCatalog, PricedItem, StorePrice};
use log::debug;
use std::cmp::Ordering;

/// Price a list of ingredient names at every store in the catalog.
///
/// Ingredients a store does not carry are left out of its itemization.
/// Every store appears in the result, including stores that matched
/// nothing (empty items, total 0.00). Results are sorted cheapest first,
/// ties broken by store name.
pub fn aggregate_prices<S: AsRef<str>>(
    ingredients: &[S],
    catalog: &PriceCatalog,
) -> Vec<StorePrice> {
    let mut stores: Vec<StorePrice> = catalog
        .store_names()
        .map(|store| {
            let items = ingredients
                .iter()
                .filter_map(|ingredient| {
                    let ingredient = ingredient.as_ref();
                    catalog.price(store, ingredient).map(|price| PricedItem {
                        ingredient: ingredient.to_string(),
                        price,
                    })
                })
                .collect::<Vec<_>>();
            debug!(
                "{} carries {}/{} ingredients",
                store,
                items.len(),
                ingredients.len()
            );
            StorePrice::new(store, items)
        })
        .collect();

    stores.sort_by(compare_stores);
    stores
}

/// Drop stores that matched none of the requested ingredients
pub fn hide_unmatched_stores(stores: Vec<StorePrice>) -> Vec<StorePrice> {
    stores
        .into_iter()
        .filter(|store| !store.is_unmatched())
        .collect()
}

fn compare_stores(a: &StorePrice, b: &StorePrice) -> Ordering {
    a.total_price
        .total_cmp(&b.total_price)
        .then_with(|| a.store_name.cmp(&b.store_name))
}
