//! The in-memory recipe collection.
//!
//! A collection is built wholesale from one provider batch and is never
//! merged or appended to. Within a session individual records change in
//! place (rating, votes, image) but are never removed.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::{RecipeError, Result};
use crate::rating::{self, Seed};
use crate::types::{RawRecipe, Recipe};

/// Ordered sequence of recipes, unique by id.
///
/// Lookups are linear scans: a batch is a few dozen records at most and
/// keeping a single `Vec` preserves the provider's order for free.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCollection {
    recipes: Vec<Recipe>,
}

impl RecipeCollection {
    /// Creates a new, empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from a provider batch, giving each record a
    /// freshly drawn seed rating.
    ///
    /// ## Algorithm
    /// 1. Drop records with a blank id
    /// 2. Drop any record whose id was already seen (first one wins)
    /// 3. Draw a `Seed` per surviving record, in batch order
    ///
    /// Dropped records are logged, never returned as errors.
    pub fn seeded<R: Rng>(batch: Vec<RawRecipe>, rng: &mut R) -> Self {
        let received = batch.len();
        let mut seen = HashSet::with_capacity(received);
        let mut recipes = Vec::with_capacity(received);

        for raw in batch {
            if let Err(e) = Self::admit(&raw, &mut seen) {
                warn!("Dropping provider record: {}", e);
                continue;
            }
            recipes.push(Recipe::from_raw(raw, Seed::draw(rng)));
        }

        debug!(
            "Seeded collection with {} of {} provider records",
            recipes.len(),
            received
        );
        Self { recipes }
    }

    /// Ids must be non-blank and unseen in this batch.
    fn admit(raw: &RawRecipe, seen: &mut HashSet<String>) -> Result<()> {
        if raw.id.trim().is_empty() {
            return Err(RecipeError::EmptyId {
                title: raw.title.clone(),
            });
        }
        if !seen.insert(raw.id.clone()) {
            return Err(RecipeError::DuplicateId { id: raw.id.clone() });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// All recipes in load order
    pub fn as_slice(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Get a recipe by id
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.id == id)
    }

    /// Fold one star score into a recipe's rating.
    ///
    /// # Returns
    /// * `Some(&Recipe)` - the updated record, so views holding a copy can
    ///   refresh it
    /// * `None` - unknown id or out-of-range score; nothing changed
    pub fn rate(&mut self, id: &str, score: u8) -> Option<&Recipe> {
        let score = match rating::validate_score(score) {
            Ok(score) => score,
            Err(e) => {
                debug!("Ignoring vote for {}: {}", id, e);
                return None;
            }
        };

        let recipe = self.get_mut(id)?;
        let (new_rating, new_votes) = rating::fold_score(recipe.rating, recipe.votes, score);
        recipe.rating = new_rating;
        recipe.votes = new_votes;
        Some(&*recipe)
    }

    /// Attach an image reference to a recipe, replacing any previous one.
    pub fn set_image(&mut self, id: &str, image_url: String) -> Option<&Recipe> {
        let recipe = self.get_mut(id)?;
        recipe.image_url = Some(image_url);
        Some(&*recipe)
    }
}

impl<'a> IntoIterator for &'a RecipeCollection {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}
