use crate::error::SourcingError;
use crate::ingredient::IngredientLine;
use crate::model::{round2, Recipe};
use log::debug;

/// Rescale a recipe's ingredient quantities to `target_servings`.
///
/// Lines with a leading quantity get `round(quantity * target / servings, 2)`
/// rendered with two decimals; other lines are copied unchanged. Everything
/// but `servings` and `ingredients` is carried through. The input is never
/// modified.
///
/// # Errors
/// `InvalidServings` if `target_servings` is not positive or the recipe's own
/// serving count is zero.
pub fn scale_recipe(recipe: &Recipe, target_servings: i64) -> Result<Recipe, SourcingError> {
    let target = validate_servings(target_servings)?;
    if recipe.servings == 0 {
        return Err(SourcingError::InvalidServings(0));
    }

    if target == recipe.servings {
        return Ok(recipe.clone());
    }

    let multiplier = f64::from(target) / f64::from(recipe.servings);
    debug!(
        "Scaling '{}' from {} to {} servings (x{})",
        recipe.id, recipe.servings, target, multiplier
    );

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|line| scale_line(line, multiplier))
        .collect();

    Ok(Recipe {
        servings: target,
        ingredients,
        ..recipe.clone()
    })
}

/// Check a requested serving count and narrow it to the recipe's type
pub fn validate_servings(target_servings: i64) -> Result<u32, SourcingError> {
    if target_servings <= 0 {
        return Err(SourcingError::InvalidServings(target_servings));
    }
    u32::try_from(target_servings).map_err(|_| SourcingError::InvalidServings(target_servings))
}

fn scale_line(line: &str, multiplier: f64) -> String {
    let parsed = IngredientLine::parse(line);
    match parsed.quantity {
        Some(quantity) => parsed.with_quantity(round2(quantity * multiplier)),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pasta() -> Recipe {
        Recipe {
            id: "1".to_string(),
            title: "Vegetarian Pasta Primavera".to_string(),
            ingredients: vec![
                "1 pound pasta".to_string(),
                "2 cups vegetables".to_string(),
                "1/4 cup olive oil".to_string(),
                "Salt and pepper to taste".to_string(),
            ],
            instructions: vec!["Cook pasta".to_string(), "Combine".to_string()],
            servings: 4,
            image_url: Some("https://example.com/pasta.jpg".to_string()),
            source_url: Some("https://example.com/pasta".to_string()),
        }
    }

    #[test]
    fn test_scale_up() {
        let scaled = scale_recipe(&pasta(), 8).unwrap();
        assert_eq!(scaled.servings, 8);
        assert_eq!(
            scaled.ingredients,
            vec![
                "2.00 pound pasta",
                "4.00 cups vegetables",
                "0.50 cup olive oil",
                "Salt and pepper to taste",
            ]
        );
    }

    #[test]
    fn test_scale_down_rounds_to_cents() {
        let scaled = scale_recipe(&pasta(), 3).unwrap();
        assert_eq!(scaled.servings, 3);
        assert_eq!(scaled.ingredients[0], "0.75 pound pasta");
        assert_eq!(scaled.ingredients[1], "1.50 cups vegetables");
        assert_eq!(scaled.ingredients[2], "0.19 cup olive oil");
    }

    #[test]
    fn test_same_servings_is_unchanged() {
        let recipe = pasta();
        assert_eq!(scale_recipe(&recipe, 4).unwrap(), recipe);
    }

    #[test]
    fn test_other_fields_carried_through() {
        let recipe = pasta();
        let scaled = scale_recipe(&recipe, 2).unwrap();
        assert_eq!(scaled.id, recipe.id);
        assert_eq!(scaled.title, recipe.title);
        assert_eq!(scaled.instructions, recipe.instructions);
        assert_eq!(scaled.image_url, recipe.image_url);
        assert_eq!(scaled.source_url, recipe.source_url);
        // input untouched
        assert_eq!(recipe.ingredients[0], "1 pound pasta");
        assert_eq!(recipe.servings, 4);
    }

    #[test]
    fn test_free_text_line_never_scaled() {
        let recipe = Recipe {
            ingredients: vec!["Salt to taste".to_string()],
            servings: 2,
            ..Default::default()
        };
        for target in [1, 3, 10] {
            assert_eq!(
                scale_recipe(&recipe, target).unwrap().ingredients,
                vec!["Salt to taste"]
            );
        }
    }

    #[test]
    fn test_non_positive_target_rejected() {
        assert!(matches!(
            scale_recipe(&pasta(), 0),
            Err(SourcingError::InvalidServings(0))
        ));
        assert!(matches!(
            scale_recipe(&pasta(), -1),
            Err(SourcingError::InvalidServings(-1))
        ));
    }

    #[test]
    fn test_target_too_large_rejected() {
        assert!(scale_recipe(&pasta(), i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_zero_serving_recipe_rejected() {
        let mut recipe = pasta();
        recipe.servings = 0;
        assert!(matches!(
            scale_recipe(&recipe, 4),
            Err(SourcingError::InvalidServings(0))
        ));
    }
}
