//! # Recipe Model Crate
//!
//! Domain types for the Mediterranean recipe catalogue.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Recipe, RawRecipe, Category)
//! - **rating**: Weighted-average rating arithmetic and seed ratings
//! - **collection**: The ordered, id-unique in-memory collection
//! - **error**: Error types for record validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use recipe_model::RecipeCollection;
//!
//! // Build a collection from a provider batch
//! let mut collection = RecipeCollection::seeded(batch, &mut rand::rng());
//!
//! // Vote on a recipe and read back the republished record
//! if let Some(recipe) = collection.rate("gazpacho", 5) {
//!     println!("{} now has {:.1} stars ({} votes)", recipe.title, recipe.rating, recipe.votes);
//! }
//! ```

// Public modules
pub mod collection;
pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types for convenience
pub use collection::RecipeCollection;
pub use error::{RecipeError, Result};
pub use rating::{MAX_SCORE, MIN_SCORE, Seed};
pub use types::{
    // Type aliases
    RecipeId,
    // Core types
    Category,
    RawRecipe,
    Recipe,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, category: Category) -> RawRecipe {
        RawRecipe {
            id: id.to_string(),
            title: format!("Receta {}", id),
            category,
            summary: String::new(),
            full_description: String::new(),
            ingredients: vec!["Aceite de oliva".to_string()],
            steps: vec!["Mezclar".to_string()],
            image_url: None,
        }
    }

    #[test]
    fn test_collection_creation() {
        let collection = RecipeCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert!(collection.get("anything").is_none());
    }

    #[test]
    fn test_votes_only_increase() {
        let mut rng = rand::rng();
        let mut collection = RecipeCollection::seeded(
            vec![raw("a", Category::Primero), raw("b", Category::Postre)],
            &mut rng,
        );
        let initial_votes = collection.get("a").unwrap().votes;

        let scores = [1u8, 5, 3, 2, 4, 5, 5, 1];
        let mut rating = collection.get("a").unwrap().rating;
        let mut votes = initial_votes;
        for (n, score) in scores.iter().enumerate() {
            let expected = rating::round1(
                (rating * f64::from(votes) + f64::from(*score)) / f64::from(votes + 1),
            );

            let recipe = collection.rate("a", *score).unwrap();
            assert_eq!(recipe.votes, initial_votes + n as u32 + 1);
            assert_eq!(recipe.rating, expected);
            assert!((0.0..=5.0).contains(&recipe.rating));

            rating = recipe.rating;
            votes = recipe.votes;
        }
    }
}
