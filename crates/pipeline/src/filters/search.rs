//! Free-text search over title, summary and ingredients.

use rayon::prelude::*;
use recipe_model::Recipe;

use crate::query::BrowseQuery;
use crate::traits::Filter;

/// Keeps recipes that mention the search text.
///
/// ## Algorithm
/// 1. Empty search text: keep everything
/// 2. Lowercase the search text once
/// 3. Keep a recipe if the needle is a substring of its lowercased title,
///    its lowercased summary, or at least one lowercased ingredient
///
/// Predicates run on the rayon pool; `collect` keeps the input order.
pub struct SearchFilter;

impl SearchFilter {
    /// Does `recipe` mention `needle`? `needle` must already be lowercase.
    pub fn matches(recipe: &Recipe, needle: &str) -> bool {
        recipe.title.to_lowercase().contains(needle)
            || recipe.summary.to_lowercase().contains(needle)
            || recipe
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(needle))
    }
}

impl Filter for SearchFilter {
    fn name(&self) -> &str {
        "SearchFilter"
    }

    fn apply<'a>(&self, recipes: Vec<&'a Recipe>, query: &BrowseQuery) -> Vec<&'a Recipe> {
        if query.search.is_empty() {
            return recipes;
        }

        let needle = query.search.to_lowercase();
        recipes
            .into_par_iter()
            .filter(|recipe| Self::matches(recipe, &needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::CategoryFilter;
    use recipe_model::{Category, RawRecipe, Seed};

    fn recipe(id: &str, title: &str, summary: &str, ingredients: &[&str]) -> Recipe {
        Recipe::from_raw(
            RawRecipe {
                id: id.to_string(),
                title: title.to_string(),
                category: Category::Primero,
                summary: summary.to_string(),
                full_description: "Tomate en la descripción larga".to_string(),
                ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
                steps: vec![],
                image_url: None,
            },
            Seed { rating: 4.0, votes: 10 },
        )
    }

    #[test]
    fn test_search_matches_ingredient_case_insensitively() {
        let recipes = vec![
            recipe("1", "Ensalada griega", "Fresca", &["Tomates cherry", "Feta"]),
            recipe("2", "Hummus", "Crema de garbanzos", &["Garbanzos", "Tahini"]),
        ];
        let query = BrowseQuery::new(CategoryFilter::All, "TOMATE");

        let filtered = SearchFilter.apply(recipes.iter().collect(), &query);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn test_search_matches_title_and_summary() {
        let recipes = vec![
            recipe("1", "Pan con tomate", "", &[]),
            recipe("2", "Salmorejo", "Crema fría de tomate", &[]),
            recipe("3", "Tortilla", "Huevos y patata", &["Huevos"]),
        ];
        let query = BrowseQuery::new(CategoryFilter::All, "tomate");

        let filtered = SearchFilter.apply(recipes.iter().collect(), &query);

        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_search_ignores_full_description() {
        // Only title, summary and ingredients are searched
        let recipes = vec![recipe("1", "Tortilla", "Huevos", &["Patata"])];
        let query = BrowseQuery::new(CategoryFilter::All, "descripción");
        assert!(SearchFilter.apply(recipes.iter().collect(), &query).is_empty());
    }

    #[test]
    fn test_empty_search_keeps_everything() {
        let recipes = vec![recipe("1", "a", "", &[]), recipe("2", "b", "", &[])];
        let filtered = SearchFilter.apply(recipes.iter().collect(), &BrowseQuery::default());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_accented_search() {
        let recipes = vec![recipe("1", "Atún encebollado", "", &[])];
        let query = BrowseQuery::new(CategoryFilter::All, "ATÚN");
        assert_eq!(SearchFilter.apply(recipes.iter().collect(), &query).len(), 1);
    }
}
