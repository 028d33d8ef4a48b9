//! # Interaction Controller
//!
//! Turns user intents into store mutations and provider calls:
//! - search text / category selection → store query
//! - open / close a recipe → `ViewState` selection
//! - star rating → store rating update, once per viewing session
//! - photo request → provider image call, at most one in flight
//!
//! Long-running provider calls are split into `begin_*` (synchronous, hands
//! out a ticket) and `finish_*` (applies the result). Between the two the
//! caller is free to await the provider wherever it likes while the user
//! keeps interacting. A result whose ticket no longer matches the current
//! selection is dropped.

use chef_client::{ContentProvider, GeneratedImage};
use pipeline::{BrowseQuery, CategoryFilter};
use rand::SeedableRng;
use rand::rngs::StdRng;
use recipe_model::{RawRecipe, Recipe, RecipeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{LoadPhase, RecipeStore};

/// View-scoped state owned by the controller and handed to rendering by
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Copy of the recipe shown in the detail view, refreshed whenever the
    /// store republishes it
    pub selected: Option<Recipe>,
    /// A photo request for the selection is in flight
    pub image_pending: bool,
    /// The viewer already voted in this viewing session
    pub has_voted: bool,
    /// Bumped on every open/close/reload; tickets from older epochs are stale
    pub epoch: u64,
    /// The collection was replaced after `selected` was opened; the snapshot
    /// no longer refers to a stored recipe
    pub detached: bool,
}

impl ViewState {
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|r| r.id.as_str())
    }
}

/// Proof that `begin_load` succeeded; required to finish the load.
#[derive(Debug)]
pub struct LoadTicket {
    _private: (),
}

/// An image request for a particular viewing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTicket {
    recipe_id: RecipeId,
    title: String,
    epoch: u64,
}

impl ImageTicket {
    /// Title to send to the image model
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Drives the store and the view state from user intents.
pub struct InteractionController {
    store: RecipeStore,
    view: ViewState,
    rng: StdRng,
}

impl InteractionController {
    /// Controller with OS-seeded rating seeds
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Controller whose seed ratings are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            store: RecipeStore::new(),
            view: ViewState::default(),
            rng,
        }
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn phase(&self) -> LoadPhase {
        self.store.phase()
    }

    pub fn query(&self) -> &BrowseQuery {
        self.store.query()
    }

    /// Recipes currently offered for selection
    pub fn visible(&self) -> Vec<&Recipe> {
        self.store.visible()
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.store.set_search(text);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.store.set_category(category);
    }

    pub fn reset_filters(&mut self) {
        self.store.reset_filters();
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Start a load unless one is already running.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        self.store
            .begin_load()
            .then_some(LoadTicket { _private: () })
    }

    /// Replace the collection with `batch`.
    ///
    /// An open detail view keeps showing its copy but is detached from the
    /// new collection: ids are only unique within one batch, so it can no
    /// longer be voted on or photographed, and pending photos are dropped.
    pub fn finish_load(&mut self, _ticket: LoadTicket, batch: Vec<RawRecipe>) -> usize {
        let count = self.store.finish_load(batch, &mut self.rng);
        if self.view.selected.is_some() {
            debug!("Detaching open recipe view (epoch {})", self.view.epoch);
            self.view.epoch += 1;
            self.view.image_pending = false;
            self.view.detached = true;
        }
        count
    }

    /// Initial load or manual retry.
    ///
    /// # Returns
    /// `None` if a load was already in flight, otherwise the new collection
    /// size (0 after a provider failure)
    pub async fn load(&mut self, provider: &dyn ContentProvider) -> Option<usize> {
        self.store.load(provider, &mut self.rng).await
    }

    // =========================================================================
    // Detail view
    // =========================================================================

    /// Open the detail view for `id`.
    ///
    /// Looks the recipe up in the full collection, whatever the current
    /// filters. Starts a new viewing session: vote and pending flags reset.
    pub fn open(&mut self, id: &str) -> Option<&Recipe> {
        let recipe = self.store.get(id)?.clone();
        self.view = ViewState {
            selected: Some(recipe),
            image_pending: false,
            has_voted: false,
            epoch: self.view.epoch + 1,
            detached: false,
        };
        debug!("Opened recipe {} (epoch {})", id, self.view.epoch);
        self.view.selected.as_ref()
    }

    /// Close the detail view; any in-flight photo result will be dropped.
    pub fn close(&mut self) {
        if self.view.selected.is_some() {
            debug!("Closed recipe view (epoch {})", self.view.epoch);
        }
        self.view = ViewState {
            epoch: self.view.epoch + 1,
            ..ViewState::default()
        };
    }

    /// Vote on the selected recipe.
    ///
    /// Ignored when nothing is selected, when the view is detached, when this
    /// viewing session already voted, or when the store rejects the vote.
    ///
    /// # Returns
    /// `true` if the vote was counted
    pub fn rate(&mut self, score: u8) -> bool {
        if self.view.has_voted {
            debug!("Already voted in this viewing session");
            return false;
        }
        if self.view.detached {
            debug!("Recipe view is detached from the current collection");
            return false;
        }
        let Some(id) = self.view.selected_id().map(str::to_owned) else {
            return false;
        };

        match self.store.rate(&id, score) {
            Some(updated) => {
                self.view.selected = Some(updated.clone());
                self.view.has_voted = true;
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Photos
    // =========================================================================

    /// Start a photo request for the selection.
    ///
    /// `None` when nothing is selected, the view is detached, or a request
    /// is already pending.
    pub fn begin_image(&mut self) -> Option<ImageTicket> {
        if self.view.image_pending || self.view.detached {
            debug!("Image request refused (pending or detached view)");
            return None;
        }
        let recipe = self.view.selected.as_ref()?;
        let ticket = ImageTicket {
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            epoch: self.view.epoch,
        };
        self.view.image_pending = true;
        Some(ticket)
    }

    /// Apply a photo result.
    ///
    /// # Returns
    /// `true` if the image was stored; `false` if the provider gave nothing
    /// or the viewing session the ticket belongs to has ended
    pub fn finish_image(&mut self, ticket: ImageTicket, image: Option<GeneratedImage>) -> bool {
        if ticket.epoch != self.view.epoch {
            debug!(
                "Discarding late image for {} (epoch {} != {})",
                ticket.recipe_id, ticket.epoch, self.view.epoch
            );
            return false;
        }
        self.view.image_pending = false;

        let Some(image) = image else {
            return false;
        };
        match self.store.set_image(&ticket.recipe_id, image.to_data_uri()) {
            Some(updated) => {
                self.view.selected = Some(updated.clone());
                true
            }
            None => false,
        }
    }

    /// Request a photo for the selection and apply it.
    pub async fn request_image(&mut self, provider: &dyn ContentProvider) -> bool {
        let Some(ticket) = self.begin_image() else {
            return false;
        };
        let image = provider.generate_image(ticket.title()).await;
        self.finish_image(ticket, image)
    }

    /// Image to show for the selection: generated or provided, else a
    /// deterministic placeholder keyed by id.
    pub fn display_image(&self) -> Option<String> {
        let recipe = self.view.selected.as_ref()?;
        Some(
            recipe
                .image_url
                .clone()
                .unwrap_or_else(|| placeholder_image(&recipe.id)),
        )
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

/// Stock photo used until a real one exists
pub fn placeholder_image(id: &str) -> String {
    format!("https://picsum.photos/seed/{}/800/600", id)
}
