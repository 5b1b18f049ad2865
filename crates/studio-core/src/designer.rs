//! The generative design trait and its outcome types.

use async_trait::async_trait;

use crate::error::StudioError;
use crate::model::{ComparisonResult, GeneratedDesign, GlassRecipe};

/// Result of an image generation request.
///
/// Image generation never fails the user flow: when the model cannot
/// produce an image a bundled mock image is returned instead, and the
/// variant records which path was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// The model rendered the image (a data URI).
    Generated(String),
    /// A mock image was substituted.
    Fallback {
        image_url: String,
        /// Why generation did not succeed.
        reason: String,
    },
}

impl ImageOutcome {
    /// The image reference, whichever path produced it.
    pub fn image_url(&self) -> &str {
        match self {
            ImageOutcome::Generated(url) => url,
            ImageOutcome::Fallback { image_url, .. } => image_url,
        }
    }

    pub fn into_image_url(self) -> String {
        match self {
            ImageOutcome::Generated(url) => url,
            ImageOutcome::Fallback { image_url, .. } => image_url,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ImageOutcome::Fallback { .. })
    }
}

/// Result of comparing a learner's attempt with its prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// The model scored the attempt.
    Scored(ComparisonResult),
    /// The prototype was not generated by the model, so a fixed demo score
    /// was returned without calling it.
    Demo(ComparisonResult),
    /// The model call failed; the result carries score 0 and an apology.
    Unavailable(ComparisonResult),
}

impl ComparisonOutcome {
    pub fn result(&self) -> &ComparisonResult {
        match self {
            ComparisonOutcome::Scored(r)
            | ComparisonOutcome::Demo(r)
            | ComparisonOutcome::Unavailable(r) => r,
        }
    }

    pub fn into_result(self) -> ComparisonResult {
        match self {
            ComparisonOutcome::Scored(r)
            | ComparisonOutcome::Demo(r)
            | ComparisonOutcome::Unavailable(r) => r,
        }
    }

    /// Whether the result came from a real model assessment.
    pub fn is_scored(&self) -> bool {
        matches!(self, ComparisonOutcome::Scored(_))
    }
}

/// A source of glass designs, renders and critiques.
///
/// Implementations hold their own configuration; there is no shared
/// credential state. Swapping credentials means building a new designer.
#[async_trait]
pub trait Designer: Send + Sync {
    /// Design a recipe from a free-text idea.
    async fn generate_recipe(&self, prompt: &str) -> Result<GlassRecipe, StudioError>;

    /// Reverse-engineer a recipe from a photo (data URI), optionally guided
    /// by text. The returned design uses the photo as its image.
    async fn recipe_from_image(
        &self,
        image: &str,
        prompt: Option<&str>,
    ) -> Result<GeneratedDesign, StudioError>;

    /// Render a recipe's visual prompt. Never fails.
    async fn generate_image(&self, visual_prompt: &str) -> ImageOutcome;

    /// Score a learner's attempt against a prototype image.
    ///
    /// Only the missing-credential case is an error.
    async fn compare(
        &self,
        prototype_image: &str,
        user_image: &str,
    ) -> Result<ComparisonOutcome, StudioError>;

    /// Write a short caption for a finished piece. Never fails.
    async fn describe(&self, image: &str) -> String;

    /// Name of this designer, for logs.
    fn name(&self) -> &str;
}
