//! Background provider calls for an interactive session.
//!
//! The controller lives on one task and is mutated through `&mut self`.
//! Provider calls are spawned onto the runtime and their results come back
//! as `ProviderEvent`s over an mpsc channel, so the owning loop can keep
//! serving user input while a recipe batch or a photo is being generated:
//!
//! ```ignore
//! let (tasks, mut events) = ProviderTasks::new(provider);
//! loop {
//!     tokio::select! {
//!         line = lines.next_line() => { /* user intents, may call tasks.spawn_image(..) */ }
//!         Some(event) = events.recv() => controller.apply(event),
//!     }
//! }
//! ```

use std::sync::Arc;

use chef_client::{ContentProvider, GeneratedImage};
use recipe_model::RawRecipe;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::controller::{ImageTicket, InteractionController, LoadTicket};

/// Result of a spawned provider call
#[derive(Debug)]
pub enum ProviderEvent {
    RecipesLoaded {
        ticket: LoadTicket,
        batch: Vec<RawRecipe>,
    },
    ImageReady {
        ticket: ImageTicket,
        image: Option<GeneratedImage>,
    },
}

/// What applying an event changed, for the front end to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Collection replaced; holds the new size
    Loaded(usize),
    /// Photo stored on the selected recipe
    ImageApplied,
    /// Provider produced no photo
    ImageMissing,
    /// Photo arrived after its viewing session ended
    ImageDiscarded,
}

/// Spawns provider calls and reports results on a channel.
#[derive(Clone)]
pub struct ProviderTasks {
    provider: Arc<dyn ContentProvider>,
    events: UnboundedSender<ProviderEvent>,
}

impl ProviderTasks {
    /// Create the spawner and the receiving end for the session loop.
    pub fn new(provider: Arc<dyn ContentProvider>) -> (Self, UnboundedReceiver<ProviderEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { provider, events }, rx)
    }

    /// Generate a recipe batch in the background.
    pub fn spawn_load(&self, ticket: LoadTicket) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();
        tokio::spawn(async move {
            let batch = provider.generate_recipes().await;
            debug!("Background load finished with {} records", batch.len());
            if events.send(ProviderEvent::RecipesLoaded { ticket, batch }).is_err() {
                warn!("Session ended before recipes arrived");
            }
        })
    }

    /// Generate a photo in the background.
    pub fn spawn_image(&self, ticket: ImageTicket) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();
        tokio::spawn(async move {
            let image = provider.generate_image(ticket.title()).await;
            if events.send(ProviderEvent::ImageReady { ticket, image }).is_err() {
                warn!("Session ended before the photo arrived");
            }
        })
    }
}

impl InteractionController {
    /// Apply a background provider result.
    pub fn apply(&mut self, event: ProviderEvent) -> EventOutcome {
        match event {
            ProviderEvent::RecipesLoaded { ticket, batch } => {
                EventOutcome::Loaded(self.finish_load(ticket, batch))
            }
            ProviderEvent::ImageReady { ticket, image } => {
                let current = ticket.epoch() == self.view().epoch;
                if self.finish_image(ticket, image) {
                    EventOutcome::ImageApplied
                } else if current {
                    EventOutcome::ImageMissing
                } else {
                    EventOutcome::ImageDiscarded
                }
            }
        }
    }
}
