//! Dietary restriction predicates.
//!
//! Matching is a case-insensitive substring check of each ingredient line
//! against an exclusion vocabulary. It is a heuristic: "fisher" fails
//! vegetarian, and ingredients named without a listed word slip through.
//!
//! Restriction ids without a registered predicate are always satisfied.

use crate::model::Recipe;
use log::warn;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub const VEGETARIAN: &str = "vegetarian";
pub const VEGAN: &str = "vegan";

const VEGETARIAN_EXCLUDES: &[&str] = &["meat", "chicken", "fish"];
const VEGAN_EXCLUDES: &[&str] = &["meat", "cheese", "egg", "milk"];

/// A named dietary restriction a recipe either satisfies or not
pub trait Restriction: Send + Sync {
    /// Restriction id as requested by callers (e.g. "vegan")
    fn name(&self) -> &str;

    fn is_satisfied_by(&self, recipe: &Recipe) -> bool;
}

/// Restriction that fails when any ingredient line mentions an excluded word
#[derive(Debug, Clone)]
pub struct ExclusionList {
    name: String,
    excluded: Vec<String>,
}

impl ExclusionList {
    pub fn new<I, S>(name: impl Into<String>, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ExclusionList {
            name: name.into(),
            excluded: excluded
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }
}

impl Restriction for ExclusionList {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_satisfied_by(&self, recipe: &Recipe) -> bool {
        !recipe.ingredients.iter().any(|line| {
            let line = line.to_lowercase();
            self.excluded.iter().any(|word| line.contains(word.as_str()))
        })
    }
}

/// Lookup table from restriction id to predicate
#[derive(Clone)]
pub struct RestrictionRegistry {
    restrictions: HashMap<String, Arc<dyn Restriction>>,
}

impl RestrictionRegistry {
    /// Registry with no predicates; every restriction passes
    pub fn empty() -> Self {
        RestrictionRegistry {
            restrictions: HashMap::new(),
        }
    }

    /// Registry with the built-in vegetarian and vegan predicates
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(ExclusionList::new(VEGETARIAN, VEGETARIAN_EXCLUDES));
        registry.register(ExclusionList::new(VEGAN, VEGAN_EXCLUDES));
        registry
    }

    /// Built-ins plus extra exclusion vocabularies keyed by restriction id
    pub fn with_exclusions(extra: &HashMap<String, Vec<String>>) -> Self {
        let mut registry = Self::builtin();
        for (name, words) in extra {
            if registry.contains(name) {
                warn!("Configured restriction '{}' replaces the built-in predicate", name);
            }
            registry.register(ExclusionList::new(name.clone(), words));
        }
        registry
    }

    /// Add or replace a predicate under its own name
    pub fn register<R: Restriction + 'static>(&mut self, restriction: R) {
        self.restrictions
            .insert(restriction.name().to_string(), Arc::new(restriction));
    }

    pub fn register_shared(&mut self, restriction: Arc<dyn Restriction>) {
        self.restrictions
            .insert(restriction.name().to_string(), restriction);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.restrictions.contains_key(name)
    }

    /// Whether `recipe` satisfies the named restriction; unknown names pass
    pub fn is_satisfied(&self, name: &str, recipe: &Recipe) -> bool {
        self.restrictions
            .get(name)
            .map_or(true, |restriction| restriction.is_satisfied_by(recipe))
    }

    /// Registered restriction ids, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.restrictions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for RestrictionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for RestrictionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestrictionRegistry")
            .field("restrictions", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_with(ingredients: &[&str]) -> Recipe {
        Recipe {
            id: "r".to_string(),
            title: "Test".to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            servings: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_vegetarian_rejects_meat_chicken_fish() {
        let registry = RestrictionRegistry::builtin();
        assert!(!registry.is_satisfied(VEGETARIAN, &recipe_with(&["1 lb ground MEAT"])));
        assert!(!registry.is_satisfied(VEGETARIAN, &recipe_with(&["2 Chicken breasts"])));
        assert!(!registry.is_satisfied(VEGETARIAN, &recipe_with(&["fish sauce"])));
        assert!(registry.is_satisfied(VEGETARIAN, &recipe_with(&["1 cup quinoa", "2 cups kale"])));
    }

    #[test]
    fn test_vegetarian_allows_dairy() {
        let registry = RestrictionRegistry::builtin();
        let recipe = recipe_with(&["1/2 cup grated Parmesan cheese", "2 eggs"]);
        assert!(registry.is_satisfied(VEGETARIAN, &recipe));
        assert!(!registry.is_satisfied(VEGAN, &recipe));
    }

    #[test]
    fn test_vegan_rejects_animal_products() {
        let registry = RestrictionRegistry::builtin();
        assert!(!registry.is_satisfied(VEGAN, &recipe_with(&["1 cup Milk"])));
        assert!(!registry.is_satisfied(VEGAN, &recipe_with(&["3 eggs"])));
        assert!(!registry.is_satisfied(VEGAN, &recipe_with(&["meatballs"])));
        assert!(registry.is_satisfied(VEGAN, &recipe_with(&["1 can chickpeas", "Olive oil"])));
    }

    #[test]
    fn test_vegan_does_not_check_fish() {
        let registry = RestrictionRegistry::builtin();
        assert!(registry.is_satisfied(VEGAN, &recipe_with(&["1 fish fillet"])));
    }

    #[test]
    fn test_substring_matching_is_heuristic() {
        let registry = RestrictionRegistry::builtin();
        assert!(!registry.is_satisfied(VEGETARIAN, &recipe_with(&["fisherman's bread"])));
        assert!(!registry.is_satisfied(VEGAN, &recipe_with(&["eggplant"])));
    }

    #[test]
    fn test_unknown_restriction_always_passes() {
        let registry = RestrictionRegistry::builtin();
        let recipe = recipe_with(&["1 lb beef", "wheat flour"]);
        assert!(registry.is_satisfied("gluten-free", &recipe));
        assert!(registry.is_satisfied("", &recipe));
        assert!(RestrictionRegistry::empty().is_satisfied(VEGETARIAN, &recipe_with(&["chicken"])));
    }

    #[test]
    fn test_configured_exclusions_are_registered() {
        let mut extra = HashMap::new();
        extra.insert(
            "gluten-free".to_string(),
            vec!["Flour".to_string(), "wheat".to_string()],
        );
        let registry = RestrictionRegistry::with_exclusions(&extra);

        assert_eq!(registry.names(), vec!["gluten-free", VEGAN, VEGETARIAN]);
        assert!(!registry.is_satisfied("gluten-free", &recipe_with(&["2 cups flour"])));
        assert!(registry.is_satisfied("gluten-free", &recipe_with(&["1 cup rice"])));
    }

    #[test]
    fn test_custom_restriction_trait_object() {
        struct ShortRecipe;
        impl Restriction for ShortRecipe {
            fn name(&self) -> &str {
                "quick"
            }
            fn is_satisfied_by(&self, recipe: &Recipe) -> bool {
                recipe.ingredients.len() <= 3
            }
        }

        let mut registry = RestrictionRegistry::empty();
        registry.register(ShortRecipe);
        assert!(registry.is_satisfied("quick", &recipe_with(&["a", "b"])));
        assert!(!registry.is_satisfied("quick", &recipe_with(&["a", "b", "c", "d"])));
    }
}
