use crate::error::SourcingError;
use crate::model::{PriceCatalog, Recipe};
use crate::sources::{PriceSource, RecipeSource, SearchCriteria};
use async_trait::async_trait;
use log::debug;

/// In-memory recipe source returning a fixed set of recipes
#[derive(Debug, Clone, Default)]
pub struct StaticRecipeSource {
    recipes: Vec<Recipe>,
}

impl StaticRecipeSource {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Two demo recipes, one of which uses cheese
    pub fn sample() -> Self {
        Self::new(vec![
            Recipe {
                id: "1".to_string(),
                title: "Vegetarian Pasta Primavera".to_string(),
                ingredients: to_strings(&[
                    "1 pound pasta",
                    "2 cups mixed vegetables (broccoli, carrots, bell peppers)",
                    "3 cloves garlic",
                    "1/4 cup olive oil",
                    "Salt and pepper to taste",
                    "1/2 cup grated Parmesan cheese",
                ]),
                instructions: to_strings(&[
                    "Cook pasta according to package instructions",
                    "Sauté vegetables and garlic in olive oil",
                    "Combine pasta with vegetables",
                    "Season with salt and pepper",
                    "Top with Parmesan cheese",
                ]),
                servings: 4,
                image_url: Some(
                    "https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9".to_string(),
                ),
                source_url: Some("https://example.com/pasta-primavera".to_string()),
            },
            Recipe {
                id: "2".to_string(),
                title: "Quinoa Buddha Bowl".to_string(),
                ingredients: to_strings(&[
                    "1 cup quinoa",
                    "1 can chickpeas",
                    "2 sweet potatoes",
                    "2 cups kale",
                    "1/4 cup tahini",
                    "Lemon juice",
                    "Olive oil",
                ]),
                instructions: to_strings(&[
                    "Cook quinoa according to package instructions",
                    "Roast sweet potatoes and chickpeas",
                    "Massage kale with olive oil",
                    "Combine all ingredients in bowls",
                    "Drizzle with tahini-lemon sauce",
                ]),
                servings: 4,
                image_url: Some(
                    "https://images.unsplash.com/photo-1512621776951-a57141f2eefd".to_string(),
                ),
                source_url: Some("https://example.com/buddha-bowl".to_string()),
            },
        ])
    }
}

#[async_trait]
impl RecipeSource for StaticRecipeSource {
    fn source_name(&self) -> &str {
        "static"
    }

    async fn fetch_recipes(&self, criteria: &SearchCriteria) -> Result<Vec<Recipe>, SourcingError> {
        debug!(
            "Serving {} static recipes for {:?}",
            self.recipes.len(),
            criteria
        );
        Ok(self.recipes.clone())
    }
}

/// In-memory price source returning a fixed catalog
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    catalog: PriceCatalog,
}

impl StaticPriceSource {
    pub fn new(catalog: PriceCatalog) -> Self {
        Self { catalog }
    }

    /// Demo prices for three stores.
    ///
    /// Besides bare names, the catalog carries the names the sample recipes
    /// reduce to once their quantity is stripped ("pound pasta", "cup quinoa").
    pub fn sample() -> Self {
        let catalog = PriceCatalog::new()
            .with_store(
                "Walmart",
                [
                    ("pasta", 2.99),
                    ("tomatoes", 3.99),
                    ("basil", 2.49),
                    ("olive oil", 8.99),
                    ("garlic", 1.99),
                    ("pound pasta", 2.99),
                    ("cups mixed vegetables (broccoli, carrots, bell peppers)", 3.49),
                    ("cloves garlic", 1.99),
                    ("cup olive oil", 8.99),
                    ("cup grated parmesan cheese", 4.49),
                    ("cup quinoa", 4.99),
                    ("can chickpeas", 0.99),
                    ("sweet potatoes", 1.49),
                    ("lemon juice", 2.29),
                ],
            )
            .with_store(
                "Target",
                [
                    ("pasta", 3.49),
                    ("tomatoes", 4.49),
                    ("basil", 2.99),
                    ("olive oil", 9.99),
                    ("garlic", 2.49),
                    ("pound pasta", 3.49),
                    ("cups mixed vegetables (broccoli, carrots, bell peppers)", 3.99),
                    ("cloves garlic", 2.49),
                    ("cup olive oil", 9.99),
                    ("cup grated parmesan cheese", 4.99),
                    ("cup quinoa", 5.49),
                    ("can chickpeas", 1.19),
                    ("cups kale", 2.99),
                    ("lemon juice", 2.49),
                ],
            )
            .with_store(
                "Whole Foods",
                [
                    ("pasta", 4.99),
                    ("tomatoes", 5.99),
                    ("basil", 3.49),
                    ("olive oil", 12.99),
                    ("garlic", 2.99),
                    ("pound pasta", 4.99),
                    ("cups mixed vegetables (broccoli, carrots, bell peppers)", 5.49),
                    ("cloves garlic", 2.99),
                    ("cup olive oil", 12.99),
                    ("cup grated parmesan cheese", 6.99),
                    ("cup quinoa", 6.99),
                    ("can chickpeas", 1.79),
                    ("sweet potatoes", 2.49),
                    ("cups kale", 3.49),
                    ("cup tahini", 7.99),
                    ("lemon juice", 3.29),
                ],
            );
        Self::new(catalog)
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    fn source_name(&self) -> &str {
        "static"
    }

    async fn fetch_catalog(&self) -> Result<PriceCatalog, SourcingError> {
        Ok(self.catalog.clone())
    }
}

fn to_strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}
