//! Google Gemini-based design client.
//!
//! This crate provides a [`Designer`] implementation that calls the Gemini
//! `generateContent` REST API to design glass recipes, render them, score
//! learners' attempts and caption finished pieces.
//!
//! # Features
//!
//! - Schema-constrained JSON output for recipes and comparisons
//! - Image rendering with a deterministic mock-image fallback
//! - Demo scoring when the prototype was not generated by the model
//! - Optional proxy base URL
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_designer::{Designer, GeminiDesigner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let designer = GeminiDesigner::from_env()?;
//!     let recipe = designer.generate_recipe("A dawn-coloured vase").await?;
//!     let image = designer.generate_image(&recipe.visual_prompt).await;
//!     println!("{} -> {}", recipe.title, image.image_url());
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod designer;
mod prompts;

pub use config::{
    GeminiDesignerConfig, GeminiDesignerConfigBuilder, DEFAULT_API_URL, DEFAULT_IMAGE_MODEL,
    DEFAULT_RESPONSE_LANGUAGE, DEFAULT_TEXT_MODEL,
};
pub use designer::GeminiDesigner;

// Re-export studio-core types for convenience
pub use studio_core::{
    async_trait, ComparisonOutcome, ComparisonResult, Designer, GeneratedDesign, GlassRecipe,
    ImageOutcome, StudioError,
};
