//! Core records and traits for the Lumina glass studio.
//!
//! This crate provides the shared vocabulary for the studio crates:
//!
//! - Studio records ([`GlassRecipe`], [`HistoryItem`], [`CommunityPost`], ...)
//! - [`Designer`] - The trait generative design clients implement
//! - [`RecordStore`] - Keyed-record storage, with an in-memory [`MemoryStore`]
//! - [`StudioError`] - Error types shared by every crate
//! - [`fallback`] - Canned images and results used when the model is not
//!   available
//!
//! # Example
//!
//! ```rust
//! use studio_core::{Collection, CommunityPost, MemoryStore};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), studio_core::StudioError> {
//!     const POSTS: Collection<CommunityPost> = Collection::new("community_posts");
//!
//!     let store = MemoryStore::new();
//!     assert!(POSTS.list(&store).await?.is_empty());
//!     Ok(())
//! }
//! ```

mod data_uri;
mod designer;
mod error;
pub mod fallback;
mod model;
mod store;

pub use data_uri::{DataUri, ImageSource};
pub use designer::{ComparisonOutcome, Designer, ImageOutcome};
pub use error::{FailedOperation, Result, StudioError};
pub use model::{
    AnalyticsData, CommunityComment, CommunityPost, ComparisonIteration, ComparisonResult,
    Difficulty, GeneratedDesign, GlassRecipe, HistoryItem, SocialComment, SocialRecords, Step,
    User, UserRole,
};
pub use store::{Collection, MemoryStore, RecordStore};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
