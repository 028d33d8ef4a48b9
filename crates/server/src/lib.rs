//! Server crate for the Mediterranean recipe browser.
//!
//! This crate contains the session core that sits between the front end and
//! the content provider:
//! - `store`: the recipe collection, its load phases, rating and filtering
//! - `controller`: user intents, the view state and the in-flight guards
//! - `tasks`: background provider calls feeding results back to the controller

pub mod controller;
pub mod store;
pub mod tasks;

pub use controller::{ImageTicket, InteractionController, LoadTicket, ViewState, placeholder_image};
pub use store::{LoadPhase, RecipeStore};
pub use tasks::{EventOutcome, ProviderEvent, ProviderTasks};
