use crate::error::SourcingError;
use crate::model::{PriceCatalog, Recipe};
use crate::sources::{PriceSource, RecipeSource, SearchCriteria};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; RecipeCostBot/1.0)";

fn build_client(timeout: Duration) -> Result<Client, SourcingError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

fn with_auth(request: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    match api_key {
        Some(key) => request.bearer_auth(key),
        None => request,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipesResponse {
    Wrapped { recipes: Vec<Recipe> },
    Bare(Vec<Recipe>),
}

/// Recipe source backed by a JSON search endpoint.
///
/// Sends `POST {url}` with `{"restrictions": [...], "servings": n}` and
/// accepts either `{"recipes": [...]}` or a bare array.
pub struct HttpRecipeSource {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpRecipeSource {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourcingError> {
        Ok(HttpRecipeSource {
            client: build_client(timeout)?,
            url: url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl RecipeSource for HttpRecipeSource {
    fn source_name(&self) -> &str {
        "http"
    }

    async fn fetch_recipes(&self, criteria: &SearchCriteria) -> Result<Vec<Recipe>, SourcingError> {
        let request = with_auth(self.client.post(&self.url), self.api_key.as_deref());
        let response = request
            .json(criteria)
            .send()
            .await?
            .error_for_status()?;

        let body: RecipesResponse = response.json().await?;
        let recipes = match body {
            RecipesResponse::Wrapped { recipes } | RecipesResponse::Bare(recipes) => recipes,
        };
        debug!("Fetched {} recipes from {}", recipes.len(), self.url);
        Ok(recipes)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreListing {
    store_name: String,
    #[serde(default)]
    items: Vec<ListedItem>,
}

#[derive(Deserialize)]
struct ListedItem {
    ingredient: String,
    price: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    Stores { stores: Vec<StoreListing> },
    Nested(PriceCatalog),
}

/// Price source backed by a JSON catalog endpoint.
///
/// `GET {url}` may return `{"stores": [{"storeName", "items": [...]}]}` or a
/// nested `{store: {ingredient: price}}` map. Any `totalPrice` the endpoint
/// supplies is ignored; totals are always recomputed from the items.
pub struct HttpPriceSource {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpPriceSource {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourcingError> {
        Ok(HttpPriceSource {
            client: build_client(timeout)?,
            url: url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    fn source_name(&self) -> &str {
        "http"
    }

    async fn fetch_catalog(&self) -> Result<PriceCatalog, SourcingError> {
        let request = with_auth(self.client.get(&self.url), self.api_key.as_deref());
        let response = request.send().await?.error_for_status()?;

        let catalog = match response.json::<CatalogResponse>().await? {
            CatalogResponse::Stores { stores } => {
                let mut catalog = PriceCatalog::new();
                for store in stores {
                    catalog.add_store(&store.store_name);
                    for item in store.items {
                        catalog.insert(&store.store_name, &item.ingredient, item.price);
                    }
                }
                catalog
            }
            CatalogResponse::Nested(catalog) => catalog,
        };
        debug!("Fetched prices for {} stores from {}", catalog.len(), self.url);
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_wrapped_recipes() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/recipes")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "recipes": [{
                        "id": "1",
                        "title": "Pasta",
                        "ingredients": ["1 pound pasta"],
                        "instructions": ["Boil"],
                        "servings": 4,
                        "sourceUrl": "https://example.com/pasta"
                    }],
                    "debug": {"restrictions": [], "numPeople": 4}
                }"#,
            )
            .create_async()
            .await;

        let source = HttpRecipeSource::new(
            format!("{}/recipes", server.url()),
            Some("secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        let recipes = source
            .fetch_recipes(&SearchCriteria::default())
            .await
            .unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Pasta");
        assert_eq!(
            recipes[0].source_url.as_deref(),
            Some("https://example.com/pasta")
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_recipes_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/recipes")
            .with_status(500)
            .with_body(r#"{"error": "Failed to search recipes"}"#)
            .create_async()
            .await;

        let source = HttpRecipeSource::new(
            format!("{}/recipes", server.url()),
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        let result = source.fetch_recipes(&SearchCriteria::default()).await;

        assert!(matches!(result, Err(SourcingError::FetchError(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_store_listing_ignores_supplied_total() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/prices")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "stores": [{
                        "storeName": "Walmart",
                        "totalPrice": 25.99,
                        "items": [
                            {"ingredient": "pasta", "price": 2.99},
                            {"ingredient": "Tomatoes", "price": 3.99}
                        ]
                    }]
                }"#,
            )
            .create_async()
            .await;

        let source =
            HttpPriceSource::new(format!("{}/prices", server.url()), None, Duration::from_secs(5))
                .unwrap();
        let catalog = source.fetch_catalog().await.unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.price("Walmart", "tomatoes"), Some(3.99));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_nested_catalog() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/prices")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"Target": {"pasta": 3.49}}"#)
            .create_async()
            .await;

        let source =
            HttpPriceSource::new(format!("{}/prices", server.url()), None, Duration::from_secs(5))
                .unwrap();
        let catalog = source.fetch_catalog().await.unwrap();
        assert_eq!(catalog.price("Target", "Pasta"), Some(3.49));
    }
}
