//! Delayed designer implementation - wraps another designer with artificial delay.

use std::time::Duration;

use studio_core::{
    async_trait, ComparisonOutcome, Designer, GeneratedDesign, GlassRecipe, ImageOutcome,
    StudioError,
};
use tokio::time::sleep;

/// A designer that wraps another designer and adds artificial delay.
///
/// Useful for simulating model latency in demos and UI work.
pub struct DelayedDesigner<D: Designer> {
    inner: D,
    delay: Duration,
}

impl<D: Designer> DelayedDesigner<D> {
    /// Create a new DelayedDesigner wrapping the given designer.
    pub fn new(inner: D, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a designer with a delay in milliseconds.
    pub fn with_millis(inner: D, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The wrapped designer.
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

#[async_trait]
impl<D: Designer> Designer for DelayedDesigner<D> {
    async fn generate_recipe(&self, prompt: &str) -> Result<GlassRecipe, StudioError> {
        sleep(self.delay).await;
        self.inner.generate_recipe(prompt).await
    }

    async fn recipe_from_image(
        &self,
        image: &str,
        prompt: Option<&str>,
    ) -> Result<GeneratedDesign, StudioError> {
        sleep(self.delay).await;
        self.inner.recipe_from_image(image, prompt).await
    }

    async fn generate_image(&self, visual_prompt: &str) -> ImageOutcome {
        sleep(self.delay).await;
        self.inner.generate_image(visual_prompt).await
    }

    async fn compare(
        &self,
        prototype_image: &str,
        user_image: &str,
    ) -> Result<ComparisonOutcome, StudioError> {
        sleep(self.delay).await;
        self.inner.compare(prototype_image, user_image).await
    }

    async fn describe(&self, image: &str) -> String {
        sleep(self.delay).await;
        self.inner.describe(image).await
    }

    fn name(&self) -> &str {
        "DelayedDesigner"
    }
}
