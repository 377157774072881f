use log::{debug, error};
use recipe_cost::{RecipeSourcer, SourcingConfig};
use std::env;

const USAGE: &str = "Usage:
  recipe-cost search <servings> [restriction ...]
  recipe-cost price <recipe-id> [servings]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().ok_or(USAGE)?;

    let config = SourcingConfig::load()?;
    debug!("{:#?}", config);
    let sourcer = RecipeSourcer::from_config(&config)?;

    match command.as_str() {
        "search" => {
            let servings = parse_servings(args.get(1).ok_or(USAGE)?)?;
            let recipes = sourcer.search(servings, &args[2..]).await?;
            println!("{}", serde_json::to_string_pretty(&recipes)?);
        }
        "price" => {
            let id = args.get(1).ok_or(USAGE)?;
            // Quantities are stripped before lookup, so the serving count only
            // affects which recipes the source returns
            let servings = match args.get(2) {
                Some(value) => parse_servings(value)?,
                None => 1,
            };
            let recipes = sourcer.search(servings, &[] as &[&str]).await?;
            let Some(recipe) = recipes.iter().find(|recipe| &recipe.id == id) else {
                error!("No recipe with id '{}'", id);
                return Err(format!("No recipe with id '{}'", id).into());
            };

            let stores = sourcer.price(recipe).await?;
            println!("{}", serde_json::to_string_pretty(&stores)?);
        }
        other => {
            error!("Unknown command '{}'", other);
            return Err(USAGE.into());
        }
    }

    Ok(())
}

fn parse_servings(value: &str) -> Result<i64, String> {
    value
        .parse::<i64>()
        .map_err(|_| format!("Invalid serving count '{}'\n{}", value, USAGE))
}
