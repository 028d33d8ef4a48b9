//! Filter implementations for the browse pipeline.
//!
//! This module contains the concrete filters that can be composed into
//! a FilterPipeline.

pub mod course;
pub mod search;

// Re-export for convenience
pub use course::CourseFilter;
pub use search::SearchFilter;
