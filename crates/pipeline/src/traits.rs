//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a recipe list.

use recipe_model::Recipe;

use crate::query::BrowseQuery;

/// Core trait for filtering recipes.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared with worker threads
/// - Filters work on borrowed recipes and return the survivors in their
///   original relative order; the collection itself is never touched
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a list of recipes.
    ///
    /// # Arguments
    /// * `recipes` - The recipes still in play, in collection order
    /// * `query` - What the user is browsing for
    ///
    /// # Returns
    /// The recipes that pass, order preserved
    fn apply<'a>(&self, recipes: Vec<&'a Recipe>, query: &BrowseQuery) -> Vec<&'a Recipe>;
}
