//! # Recipe Store
//!
//! The session's single source of truth for recipes:
//! - the current collection and its load phase
//! - the current browse query (category selector + search text)
//! - the rating update and the filter predicate
//!
//! ## Load phases
//!
//! ```text
//! Empty ──begin_load──▶ Loading ──finish_load──▶ Populated (batch non-empty)
//!                                       └──────▶ Empty     (failure / empty batch)
//! Populated ──rate──▶ Populated
//! ```
//!
//! A failed load is not an error: the store simply ends up empty and the
//! front end offers a retry.

use chef_client::ContentProvider;
use pipeline::{BrowseQuery, CategoryFilter, FilterPipeline};
use rand::Rng;
use recipe_model::{RawRecipe, Recipe, RecipeCollection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where the store is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    #[default]
    Empty,
    Loading,
    Populated,
}

/// In-memory recipe collection plus the current browse query.
pub struct RecipeStore {
    collection: RecipeCollection,
    query: BrowseQuery,
    phase: LoadPhase,
    pipeline: FilterPipeline,
}

impl RecipeStore {
    /// Creates an empty store browsing "all" with no search text
    pub fn new() -> Self {
        Self {
            collection: RecipeCollection::new(),
            query: BrowseQuery::default(),
            phase: LoadPhase::Empty,
            pipeline: FilterPipeline::browse(),
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn collection(&self) -> &RecipeCollection {
        &self.collection
    }

    pub fn query(&self) -> &BrowseQuery {
        &self.query
    }

    /// Get a recipe by id from the full collection (filters don't apply)
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.collection.get(id)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Enter the loading phase.
    ///
    /// # Returns
    /// `false` if a load is already in flight; the caller must not issue a
    /// second provider call
    pub fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            debug!("Load already in progress, ignoring");
            return false;
        }
        self.phase = LoadPhase::Loading;
        true
    }

    /// Replace the whole collection with a provider batch.
    ///
    /// Every record gets a fresh seed rating from `rng`. An empty batch
    /// leaves the store empty.
    ///
    /// # Returns
    /// Number of recipes now in the collection
    pub fn finish_load<R: Rng>(&mut self, batch: Vec<RawRecipe>, rng: &mut R) -> usize {
        if !self.is_loading() {
            debug!("finish_load called outside a load cycle");
        }

        self.collection = RecipeCollection::seeded(batch, rng);
        self.phase = if self.collection.is_empty() {
            warn!("Provider returned no usable recipes; collection is empty");
            LoadPhase::Empty
        } else {
            info!("Loaded {} recipes", self.collection.len());
            LoadPhase::Populated
        };
        self.collection.len()
    }

    /// Fetch a fresh batch from `provider` and replace the collection.
    ///
    /// # Returns
    /// * `Some(count)` - the load ran; `count` may be 0 after a failure
    /// * `None` - a load was already in flight
    pub async fn load<R: Rng>(
        &mut self,
        provider: &dyn ContentProvider,
        rng: &mut R,
    ) -> Option<usize> {
        if !self.begin_load() {
            return None;
        }
        info!("Requesting recipes from {}", provider.name());
        let batch = provider.generate_recipes().await;
        Some(self.finish_load(batch, rng))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Fold a star score into a recipe's rating.
    ///
    /// # Returns
    /// The updated record for republishing, or `None` when the id is unknown
    /// or the score is out of range (nothing changes)
    pub fn rate(&mut self, id: &str, score: u8) -> Option<&Recipe> {
        self.collection.rate(id, score)
    }

    /// Attach an image reference to a recipe.
    pub fn set_image(&mut self, id: &str, image_url: String) -> Option<&Recipe> {
        self.collection.set_image(id, image_url)
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.query.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    /// Back to "all" with no search text
    pub fn reset_filters(&mut self) {
        self.query = BrowseQuery::default();
    }

    /// Pure projection of the collection through `category` and `search`.
    pub fn filter(&self, category: CategoryFilter, search: &str) -> Vec<&Recipe> {
        self.pipeline
            .apply(self.collection.as_slice(), &BrowseQuery::new(category, search))
    }

    /// The collection filtered by the store's own query
    pub fn visible(&self) -> Vec<&Recipe> {
        self.pipeline.apply(self.collection.as_slice(), &self.query)
    }
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use recipe_model::Category;

    fn raw(id: &str, category: Category, ingredients: &[&str]) -> RawRecipe {
        RawRecipe {
            id: id.to_string(),
            title: format!("Plato {}", id),
            category,
            summary: String::new(),
            full_description: String::new(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: vec![],
            image_url: None,
        }
    }

    fn loaded_store() -> RecipeStore {
        let mut store = RecipeStore::new();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(store.begin_load());
        store.finish_load(
            vec![
                raw("1", Category::Primero, &["Tomates cherry"]),
                raw("2", Category::Segundo, &["Lubina"]),
                raw("3", Category::Postre, &["Higos"]),
            ],
            &mut rng,
        );
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = RecipeStore::new();
        assert_eq!(store.phase(), LoadPhase::Empty);
        assert!(store.collection().is_empty());
        assert!(store.query().is_unfiltered());
    }

    #[test]
    fn test_load_cycle() {
        let store = loaded_store();
        assert_eq!(store.phase(), LoadPhase::Populated);
        assert_eq!(store.collection().len(), 3);
        for recipe in store.collection() {
            assert!((4.0..=5.0).contains(&recipe.rating));
            assert!((10..=60).contains(&recipe.votes));
        }
    }

    #[test]
    fn test_overlapping_load_refused() {
        let mut store = RecipeStore::new();
        assert!(store.begin_load());
        assert!(!store.begin_load());
        assert!(store.is_loading());
    }

    #[test]
    fn test_empty_batch_leaves_store_empty() {
        let mut store = loaded_store();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(store.begin_load());
        assert_eq!(store.finish_load(Vec::new(), &mut rng), 0);
        assert_eq!(store.phase(), LoadPhase::Empty);
        assert!(store.collection().is_empty());
    }

    #[test]
    fn test_reload_replaces_wholesale() {
        let mut store = loaded_store();
        let mut rng = StdRng::seed_from_u64(2);
        assert!(store.begin_load());
        store.finish_load(vec![raw("9", Category::Postre, &[])], &mut rng);

        assert_eq!(store.collection().len(), 1);
        assert!(store.get("1").is_none());
        assert!(store.get("9").is_some());
    }

    #[test]
    fn test_visible_follows_query() {
        let mut store = loaded_store();
        store.set_search("TOMATE");
        let ids: Vec<&str> = store.visible().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);

        store.set_search("");
        store.set_category(CategoryFilter::Only(Category::Postre));
        let ids: Vec<&str> = store.visible().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);

        store.reset_filters();
        assert_eq!(store.visible().len(), 3);
    }

    #[test]
    fn test_filter_does_not_touch_query() {
        let store = loaded_store();
        let desserts = store.filter(CategoryFilter::Only(Category::Postre), "");
        assert_eq!(desserts.len(), 1);
        assert!(store.query().is_unfiltered());
    }

    #[test]
    fn test_rate_republishes_record() {
        let mut store = loaded_store();
        let before = store.get("2").unwrap().votes;

        let updated = store.rate("2", 4).unwrap();
        assert_eq!(updated.votes, before + 1);

        assert!(store.rate("missing", 4).is_none());
    }
}
