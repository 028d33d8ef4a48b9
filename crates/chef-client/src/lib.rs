//! Content provider client for the recipe catalogue.
//!
//! This crate wraps the two remote operations the application depends on:
//! - "generate a batch of recipes"
//! - "generate an image for a given title"
//!
//! Both are exposed through the `ContentProvider` trait, whose contract is
//! that nothing fails past this boundary: transport errors, bad statuses,
//! malformed or schema-violating responses are logged and reported as "no
//! recipes" / "no image". `GeminiChef` is the production implementation.

pub mod config;
pub mod error;
pub mod gemini;
pub mod image;

use async_trait::async_trait;
use recipe_model::RawRecipe;

pub use config::ChefConfig;
pub use error::{ChefClientError, Result};
pub use gemini::GeminiChef;
pub use image::GeneratedImage;

/// A remote generator of recipes and dish photographs.
///
/// Calls may take many seconds. Implementations must be shareable across
/// tasks so the caller can await them without blocking other interaction.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Generate a fresh batch of recipes; empty on any failure.
    async fn generate_recipes(&self) -> Vec<RawRecipe>;

    /// Photograph the dish called `title`; `None` on any failure.
    async fn generate_image(&self, title: &str) -> Option<GeneratedImage>;
}
