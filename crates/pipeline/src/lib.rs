//! Pipeline for filtering the recipe catalogue.
//!
//! This crate provides:
//! - Filter trait and implementations for recipe filtering
//! - FilterPipeline for composing filters
//! - BrowseQuery / CategoryFilter describing what the user is looking for
//!
//! ## Architecture
//! A browse request runs the collection through two stages:
//! 1. CourseFilter keeps the selected category ("all" keeps everything)
//! 2. SearchFilter keeps recipes mentioning the search text in their
//!    title, summary or ingredients
//!
//! Filtering is a pure projection: the result borrows from the collection
//! and keeps its order.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{BrowseQuery, CategoryFilter, FilterPipeline};
//!
//! let query = BrowseQuery::new("postre".parse()?, "naranja");
//! let visible = FilterPipeline::browse().apply(collection.as_slice(), &query);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod query;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use query::{BrowseQuery, CategoryFilter};
pub use traits::Filter;

use recipe_model::Recipe;

/// Filter `recipes` by category selector and search text.
///
/// Convenience wrapper around `FilterPipeline::browse()`.
pub fn filter_recipes<'a>(
    recipes: &'a [Recipe],
    category: CategoryFilter,
    search: &str,
) -> Vec<&'a Recipe> {
    FilterPipeline::browse().apply(recipes, &BrowseQuery::new(category, search))
}
