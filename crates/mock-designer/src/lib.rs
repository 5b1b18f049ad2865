//! Mock designer implementations for studio workflows.
//!
//! This crate provides offline implementations of the `Designer` trait:
//! - `StaticDesigner` - Canned recipes, renders and scores
//! - `DelayedDesigner` - Wraps another designer with artificial delay
//!
//! For real generation, use the `gemini-designer` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_designer::{Designer, StaticDesigner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_designer::StudioError> {
//!     let designer = StaticDesigner::new();
//!
//!     let recipe = designer.generate_recipe("A cobalt bowl").await?;
//!     assert!(recipe.title.contains("A cobalt bowl"));
//!     Ok(())
//! }
//! ```

mod delayed;
mod static_designer;

// Re-export studio-core types for convenience
pub use studio_core::{
    async_trait, ComparisonOutcome, ComparisonResult, Designer, GeneratedDesign, GlassRecipe,
    ImageOutcome, StudioError,
};

pub use delayed::DelayedDesigner;
pub use static_designer::{ImageMode, StaticDesigner, STATIC_IMAGE, STATIC_SCORE};
