//! The Lumina glass studio.
//!
//! This crate ties a [`Designer`] to a [`RecordStore`]:
//!
//! - [`StorageService`] - Users, design history, the community gallery and
//!   the saved API key
//! - [`Studio`] - Design generation, attempt scoring and owner review
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use studio::{DesignRequest, MemoryStore, StorageService, Studio, UserRole};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), studio::StudioError> {
//!     let storage = StorageService::new(Arc::new(MemoryStore::new()));
//!     let studio = Studio::gemini(storage.clone()).await?;
//!
//!     let user = storage.login("Mia", UserRole::Hobbyist).await?;
//!     let generation = studio
//!         .generate(&user, &DesignRequest::from_prompt("A dawn-coloured vase"))
//!         .await?;
//!     println!("{}", generation.item.design.recipe.title);
//!     Ok(())
//! }
//! ```

pub mod demo;
mod storage;
mod workflow;

pub use storage::{StorageService, JUST_NOW};
pub use workflow::{DesignRequest, DesignerFactory, Generation, Studio};

// Re-export studio-core types for convenience
pub use studio_core::{
    ComparisonOutcome, Designer, FailedOperation, HistoryItem, ImageOutcome, MemoryStore,
    RecordStore, StudioError, User, UserRole,
};
