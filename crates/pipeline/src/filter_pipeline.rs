//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use recipe_model::Recipe;

use crate::filters::{CourseFilter, SearchFilter};
use crate::query::BrowseQuery;
use crate::traits::Filter;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(CourseFilter)
///     .add_filter(SearchFilter);
///
/// let visible = pipeline.apply(collection.as_slice(), &query);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The browse predicate: category selector, then search text.
    pub fn browse() -> Self {
        Self::new().add_filter(CourseFilter).add_filter(SearchFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence.
    ///
    /// ## Algorithm
    /// 1. Start with every recipe, in collection order
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return the survivors
    ///
    /// # Arguments
    /// * `recipes` - The full collection (borrowed, never mutated)
    /// * `query` - What the user is browsing for
    ///
    /// # Returns
    /// References to the recipes that pass every filter, order preserved
    pub fn apply<'a>(&self, recipes: &'a [Recipe], query: &BrowseQuery) -> Vec<&'a Recipe> {
        let mut current: Vec<&'a Recipe> = recipes.iter().collect();
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, query);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Number of filters in the chain
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::browse()
    }
}
