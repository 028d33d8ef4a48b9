//! Error types for the recipe-model crate.
//!
//! None of these ever reach the presentation layer: a record that fails
//! validation is dropped from its batch and logged, and an unparseable
//! category word is treated as "no change" by the callers.

use thiserror::Error;

/// Errors that can occur while validating recipe records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    /// A category word that is not one of primero/segundo/postre (or "all"
    /// where a filter is being parsed)
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Provider returned a record without an id
    #[error("Recipe '{title}' has an empty id")]
    EmptyId { title: String },

    /// Provider returned two records with the same id in one batch
    #[error("Duplicate recipe id in batch: {id}")]
    DuplicateId { id: String },

    /// A star score outside the accepted range
    #[error("Score {score} is outside {min}..={max}")]
    ScoreOutOfRange { score: u8, min: u8, max: u8 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecipeError>;
