//! Filter to keep only the selected course.

use recipe_model::Recipe;

use crate::query::BrowseQuery;
use crate::traits::Filter;

/// Keeps recipes whose category matches the query's category selector.
///
/// The "all" selector passes everything through untouched.
pub struct CourseFilter;

impl Filter for CourseFilter {
    fn name(&self) -> &str {
        "CourseFilter"
    }

    fn apply<'a>(&self, recipes: Vec<&'a Recipe>, query: &BrowseQuery) -> Vec<&'a Recipe> {
        recipes
            .into_iter()
            .filter(|recipe| query.category.admits(recipe.category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::CategoryFilter;
    use recipe_model::{Category, RawRecipe, Seed};

    fn recipe(id: &str, category: Category) -> Recipe {
        Recipe::from_raw(
            RawRecipe {
                id: id.to_string(),
                title: id.to_string(),
                category,
                summary: String::new(),
                full_description: String::new(),
                ingredients: vec![],
                steps: vec![],
                image_url: None,
            },
            Seed { rating: 4.0, votes: 10 },
        )
    }

    #[test]
    fn test_course_filter() {
        let recipes = vec![
            recipe("crema-catalana", Category::Postre),
            recipe("lubina", Category::Segundo),
            recipe("baklava", Category::Postre),
        ];
        let query = BrowseQuery::new(CategoryFilter::Only(Category::Postre), "");

        let filtered = CourseFilter.apply(recipes.iter().collect(), &query);

        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["crema-catalana", "baklava"]);
    }

    #[test]
    fn test_all_passes_everything() {
        let recipes = vec![
            recipe("a", Category::Primero),
            recipe("b", Category::Segundo),
        ];
        let filtered = CourseFilter.apply(recipes.iter().collect(), &BrowseQuery::default());
        assert_eq!(filtered.len(), 2);
    }
}
