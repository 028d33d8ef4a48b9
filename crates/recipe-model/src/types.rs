//! Core domain types for the recipe catalogue.
//!
//! This module defines the records that flow between the content provider,
//! the store and the views:
//! - `RawRecipe` is exactly what the provider sends (no rating fields)
//! - `Recipe` is the in-session record with its mutable rating state
//! - `Category` is the closed set of courses a recipe can belong to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecipeError;
use crate::rating::Seed;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque identifier chosen by the provider, unique within one collection
pub type RecipeId = String;

// =============================================================================
// Category
// =============================================================================

/// Course a recipe belongs to.
///
/// The wire names are the Spanish ones the provider schema enumerates.
/// There is deliberately no "all" variant here: "all" only exists as a
/// filter sentinel (see `pipeline::CategoryFilter`), never as a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    /// First course (starters, soups, salads)
    Primero,
    /// Main course
    Segundo,
    /// Dessert
    Postre,
}

impl Category {
    /// Every storable category, in menu order
    pub const ALL: [Category; 3] = [Category::Primero, Category::Segundo, Category::Postre];

    /// Wire name used by the provider schema
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Primero => "primero",
            Category::Segundo => "segundo",
            Category::Postre => "postre",
        }
    }

    /// Section heading shown above a list of this course
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Primero => "Primeros Platos",
            Category::Segundo => "Segundos Platos",
            Category::Postre => "Postres",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RecipeError;

    /// Case-insensitive; accepts the wire names and their English course names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primero" | "first-course" | "starter" => Ok(Category::Primero),
            "segundo" | "main-course" | "main" => Ok(Category::Segundo),
            "postre" | "dessert" => Ok(Category::Postre),
            _ => Err(RecipeError::UnknownCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = RecipeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Recipe records
// =============================================================================

/// A recipe exactly as the content provider returns it.
///
/// Field names follow the provider schema (`fullDescription`, `imageUrl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    pub id: RecipeId,
    pub title: String,
    pub category: Category,
    pub summary: String,
    pub full_description: String,
    pub ingredients: Vec<String>,
    /// Preparation sequence; order is meaningful
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A recipe held in the session's collection.
///
/// Identity and text are fixed once loaded; `rating`, `votes` and
/// `image_url` change in place as the user interacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub category: Category,
    pub summary: String,
    pub full_description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Vote-weighted mean in [0.0, 5.0], one decimal place
    pub rating: f64,
    /// Number of ratings folded into `rating`, seed included
    pub votes: u32,
}

impl Recipe {
    /// Build a session recipe from a provider record and its seed rating.
    pub fn from_raw(raw: RawRecipe, seed: Seed) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            category: raw.category,
            summary: raw.summary,
            full_description: raw.full_description,
            ingredients: raw.ingredients,
            steps: raw.steps,
            image_url: raw.image_url,
            rating: seed.rating,
            votes: seed.votes,
        }
    }

    /// Long description, falling back to the summary when the provider left
    /// it blank
    pub fn description(&self) -> &str {
        if self.full_description.trim().is_empty() {
            &self.summary
        } else {
            &self.full_description
        }
    }
}
