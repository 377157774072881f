use crate::model::Recipe;
use crate::restrictions::RestrictionRegistry;

/// Keep the recipes that satisfy every requested restriction.
///
/// Order is preserved. An empty restriction list returns the input as is,
/// and an empty result is not an error.
pub fn filter_recipes<S: AsRef<str>>(
    recipes: Vec<Recipe>,
    restrictions: &[S],
    registry: &RestrictionRegistry,
) -> Vec<Recipe> {
    if restrictions.is_empty() {
        return recipes;
    }

    recipes
        .into_iter()
        .filter(|recipe| {
            restrictions
                .iter()
                .all(|restriction| registry.is_satisfied(restriction.as_ref(), recipe))
        })
        .collect()
}
