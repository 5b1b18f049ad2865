//! Static designer implementation - canned responses, no network.

use std::sync::atomic::{AtomicUsize, Ordering};

use studio_core::{
    async_trait, fallback, ComparisonOutcome, ComparisonResult, DataUri, Designer, Difficulty,
    GeneratedDesign, GlassRecipe, ImageOutcome, ImageSource, Step, StudioError,
};

/// Data URI returned by [`ImageMode::Generated`].
pub const STATIC_IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

/// Score given to every scored comparison.
pub const STATIC_SCORE: u8 = 76;

/// How [`StaticDesigner`] answers image requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    /// Return [`STATIC_IMAGE`] as a generated image.
    #[default]
    Generated,
    /// Behave as if rendering failed.
    Fallback,
}

/// A designer that answers every request with canned data.
///
/// It applies the same credential and fallback rules as a real client, so
/// workflows built on it behave the way they would against the model.
#[derive(Debug)]
pub struct StaticDesigner {
    has_key: bool,
    image_mode: ImageMode,
    calls: AtomicUsize,
}

impl Default for StaticDesigner {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticDesigner {
    /// Create a designer with a credential and working renders.
    pub fn new() -> Self {
        Self {
            has_key: true,
            image_mode: ImageMode::Generated,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a designer with no credential configured.
    pub fn without_key() -> Self {
        Self {
            has_key: false,
            ..Self::new()
        }
    }

    /// Set how image requests are answered.
    pub fn with_image_mode(mut self, mode: ImageMode) -> Self {
        self.image_mode = mode;
        self
    }

    /// Number of calls that would have reached the model.
    pub fn model_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn call_model(&self) -> Result<(), StudioError> {
        if !self.has_key {
            return Err(StudioError::MissingApiKey);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn recipe_for(idea: &str) -> GlassRecipe {
        GlassRecipe {
            title: format!("Study: {}", idea),
            description: format!("A practice piece exploring {}.", idea),
            techniques: vec!["Blowing".to_string(), "Cold working".to_string()],
            difficulty: Difficulty::Intermediate,
            estimated_time: "3 hours".to_string(),
            materials: vec!["Clear batch".to_string(), "Colour frit".to_string()],
            steps: vec![
                Step {
                    step_number: 1,
                    instruction: "Gather and marver the base.".to_string(),
                    tip: None,
                },
                Step {
                    step_number: 2,
                    instruction: "Roll in frit and reheat.".to_string(),
                    tip: Some("Keep the piece turning.".to_string()),
                },
            ],
            visual_prompt: format!("Studio photograph of a blown glass piece: {}", idea),
        }
    }
}

#[async_trait]
impl Designer for StaticDesigner {
    async fn generate_recipe(&self, prompt: &str) -> Result<GlassRecipe, StudioError> {
        self.call_model()?;

        let idea = prompt.trim();
        if idea.is_empty() {
            return Err(StudioError::InvalidInput(
                "describe the piece you want to make".to_string(),
            ));
        }

        Ok(Self::recipe_for(idea))
    }

    async fn recipe_from_image(
        &self,
        image: &str,
        prompt: Option<&str>,
    ) -> Result<GeneratedDesign, StudioError> {
        self.call_model()?;
        DataUri::parse(image)?;

        let idea = prompt
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("the uploaded piece");

        Ok(GeneratedDesign {
            image_url: image.to_string(),
            recipe: Self::recipe_for(idea),
        })
    }

    async fn generate_image(&self, visual_prompt: &str) -> ImageOutcome {
        let reason = match self.call_model() {
            Ok(()) if self.image_mode == ImageMode::Generated => {
                return ImageOutcome::Generated(STATIC_IMAGE.to_string());
            }
            Ok(()) => "render refused".to_string(),
            Err(e) => e.to_string(),
        };

        ImageOutcome::Fallback {
            image_url: fallback::fallback_image(visual_prompt).to_string(),
            reason,
        }
    }

    async fn compare(
        &self,
        prototype_image: &str,
        user_image: &str,
    ) -> Result<ComparisonOutcome, StudioError> {
        if !ImageSource::classify(prototype_image).is_inline() {
            return Ok(ComparisonOutcome::Demo(fallback::demo_comparison()));
        }

        self.call_model()?;
        if DataUri::parse(user_image).is_err() {
            return Ok(ComparisonOutcome::Unavailable(
                fallback::unavailable_comparison(),
            ));
        }

        Ok(ComparisonOutcome::Scored(ComparisonResult {
            score: STATIC_SCORE,
            comment: "Solid form; the colour band sits a little low.".to_string(),
            strengths: vec!["Even wall thickness".to_string()],
            improvements: vec!["Raise the colour band".to_string()],
        }))
    }

    async fn describe(&self, _image: &str) -> String {
        match self.call_model() {
            Ok(()) => "Layered amber glass catching the studio light.".to_string(),
            Err(_) => fallback::TRIAL_CAPTION.to_string(),
        }
    }

    fn name(&self) -> &str {
        "StaticDesigner"
    }
}
