//! What the user is currently browsing for.
//!
//! A `BrowseQuery` is the pair (category filter, search text) that every
//! filter in the pipeline reads.

use std::fmt;
use std::str::FromStr;

use recipe_model::{Category, RecipeError};
use serde::{Deserialize, Serialize};

/// Category selector offered to the user.
///
/// `All` is a UI sentinel only; a stored recipe always has a concrete
/// `Category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Does a recipe of `category` pass this selector?
    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    /// Heading shown above the list for this selection
    pub fn heading(&self) -> &'static str {
        match self {
            CategoryFilter::All => "Carta Completa",
            CategoryFilter::Only(category) => category.heading(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = RecipeError;

    /// Case-insensitive: "all" (or "todas") selects everything, anything else
    /// must name a `Category`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todas" | "todo" => Ok(CategoryFilter::All),
            _ => s.parse::<Category>().map(CategoryFilter::Only),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = RecipeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

/// Category selection plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseQuery {
    pub category: CategoryFilter,
    /// Raw search text as typed; matching lowercases it
    pub search: String,
}

impl BrowseQuery {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    /// True when no recipe can be excluded by this query
    pub fn is_unfiltered(&self) -> bool {
        self.category == CategoryFilter::All && self.search.is_empty()
    }
}
