//! Design workflows: generate, practice against a prototype, review.

use std::fmt;
use std::sync::Arc;

use gemini_designer::GeminiDesigner;
use studio_core::{
    ComparisonIteration, ComparisonOutcome, Designer, Difficulty, GeneratedDesign, GlassRecipe,
    HistoryItem, ImageOutcome, StudioError, User,
};
use tracing::{debug, info, warn};

use crate::storage::{now_ms, StorageService};

/// Builds a designer for a given API key.
pub type DesignerFactory =
    Arc<dyn Fn(&str) -> Result<Arc<dyn Designer>, StudioError> + Send + Sync>;

/// What the user asked the studio to design.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignRequest {
    /// Free-text idea.
    pub prompt: Option<String>,
    /// Reference photo as a data URI.
    pub image: Option<String>,
}

impl DesignRequest {
    /// Design from a text idea.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            image: None,
        }
    }

    /// Design from a reference photo.
    pub fn from_image(image: impl Into<String>) -> Self {
        Self {
            prompt: None,
            image: Some(image.into()),
        }
    }

    /// Add guiding text to an image request.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref().map(str::trim).filter(|i| !i.is_empty())
    }
}

/// A saved design and how its image was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub item: HistoryItem,
    /// Render outcome for text requests; `None` when the user's photo was used.
    pub image: Option<ImageOutcome>,
}

/// The studio: a designer plus the storage its results go to.
#[derive(Clone)]
pub struct Studio {
    storage: StorageService,
    designer: Arc<dyn Designer>,
    factory: Option<DesignerFactory>,
}

impl fmt::Debug for Studio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Studio")
            .field("designer", &self.designer.name())
            .field("rekeyable", &self.factory.is_some())
            .finish()
    }
}

impl Studio {
    /// Create a studio around a fixed designer.
    pub fn new(storage: StorageService, designer: Arc<dyn Designer>) -> Self {
        Self {
            storage,
            designer,
            factory: None,
        }
    }

    /// Allow swapping credentials by building designers from a key.
    pub fn with_factory(mut self, factory: DesignerFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Create a studio backed by Gemini.
    ///
    /// Configuration comes from the environment. When no key is set there,
    /// a key previously saved with [`Studio::with_api_key`] is used.
    pub async fn gemini(storage: StorageService) -> Result<Self, StudioError> {
        let base = GeminiDesigner::from_env()?;

        let designer = if base.config().has_api_key() {
            base.clone()
        } else {
            match storage.stored_api_key().await? {
                Some(key) => {
                    debug!("Using stored API key");
                    base.with_api_key(key)?
                }
                None => base.clone(),
            }
        };

        let factory: DesignerFactory =
            Arc::new(move |key: &str| -> Result<Arc<dyn Designer>, StudioError> {
                let designer = base.with_api_key(key)?;
                Ok(Arc::new(designer))
            });

        Ok(Self::new(storage, Arc::new(designer)).with_factory(factory))
    }

    pub fn storage(&self) -> &StorageService {
        &self.storage
    }

    pub fn designer(&self) -> &dyn Designer {
        self.designer.as_ref()
    }

    /// Save `key` and return a studio whose designer uses it.
    ///
    /// This studio keeps its old designer.
    pub async fn with_api_key(&self, key: &str) -> Result<Studio, StudioError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(StudioError::InvalidInput("API key must not be empty".to_string()));
        }

        let factory = self.factory.as_ref().ok_or_else(|| {
            StudioError::Configuration(format!(
                "designer '{}' does not accept API keys",
                self.designer.name()
            ))
        })?;

        let designer = (factory.as_ref())(key)?;
        self.storage.save_api_key(key).await?;

        info!("API key updated for designer {}", designer.name());
        Ok(Studio {
            storage: self.storage.clone(),
            designer,
            factory: self.factory.clone(),
        })
    }

    /// Design a piece and save it to the user's history.
    ///
    /// Image requests reverse-engineer the photo (optionally guided by the
    /// prompt). Text requests design a recipe and then render it; rendering
    /// falls back to a mock image rather than failing.
    pub async fn generate(
        &self,
        user: &User,
        request: &DesignRequest,
    ) -> Result<Generation, StudioError> {
        let (design, image) = match (request.image(), request.prompt()) {
            (Some(photo), prompt) => {
                debug!("Designing from image for user {}", user.id);
                let design = self.designer.recipe_from_image(photo, prompt).await?;
                (design, None)
            }
            (None, Some(prompt)) => {
                debug!("Designing from prompt for user {}", user.id);
                let recipe = self.designer.generate_recipe(prompt).await?;
                let outcome = self.designer.generate_image(&recipe.visual_prompt).await;
                if let ImageOutcome::Fallback { reason, .. } = &outcome {
                    warn!("Render for '{}' fell back: {}", recipe.title, reason);
                }
                let design = GeneratedDesign {
                    image_url: outcome.image_url().to_string(),
                    recipe,
                };
                (design, Some(outcome))
            }
            (None, None) => {
                return Err(StudioError::InvalidInput(
                    "describe your idea or upload a reference photo".to_string(),
                ));
            }
        };

        let item = self.storage.save_design(&user.id, design).await?;
        info!(
            "Generated '{}' for user {} with {}",
            item.design.recipe.title,
            user.id,
            self.designer.name()
        );

        Ok(Generation { item, image })
    }

    /// Generate with a new API key after the current one was missing.
    ///
    /// The key is saved and the request is tried once more with it. Returns
    /// the re-keyed studio along with the result.
    pub async fn generate_with_key(
        &self,
        user: &User,
        request: &DesignRequest,
        key: &str,
    ) -> Result<(Studio, Generation), StudioError> {
        let studio = self.with_api_key(key).await?;
        let generation = studio.generate(user, request).await?;
        Ok((studio, generation))
    }

    /// Score a photo of the user's physical attempt against a saved design.
    ///
    /// Scored and demo outcomes are recorded as a new iteration on the
    /// item; an unavailable assessment is returned but not recorded.
    pub async fn submit_attempt(
        &self,
        history_id: &str,
        user_image: &str,
    ) -> Result<(HistoryItem, ComparisonOutcome), StudioError> {
        let mut item = self.storage.history_item(history_id).await?;

        let outcome = self
            .designer
            .compare(&item.design.image_url, user_image)
            .await?;

        if let ComparisonOutcome::Unavailable(_) = outcome {
            warn!("Assessment unavailable for {}, attempt not recorded", history_id);
            return Ok((item, outcome));
        }

        let iteration = ComparisonIteration::from_result(
            item.next_attempt_number(),
            user_image,
            outcome.result(),
            now_ms(),
        );
        debug!(
            "Attempt {} on {} scored {}",
            iteration.attempt_number, history_id, iteration.ai_score
        );

        item.comparison_iterations
            .get_or_insert_with(Vec::new)
            .push(iteration);
        item.user_uploaded_image_url = Some(user_image.to_string());
        self.storage.update_history_item(&item).await?;

        Ok((item, outcome))
    }

    /// Attach an owner's endorsement to one attempt.
    pub async fn endorse_attempt(
        &self,
        reviewer: &User,
        history_id: &str,
        attempt_number: u32,
        endorsement: &str,
    ) -> Result<HistoryItem, StudioError> {
        let text = review_text(reviewer, endorsement)?;
        let mut item = self.storage.history_item(history_id).await?;

        let iteration = item
            .comparison_iterations
            .as_mut()
            .and_then(|its| its.iter_mut().find(|it| it.attempt_number == attempt_number))
            .ok_or_else(|| StudioError::NotFound {
                entity: "ComparisonIteration",
                id: format!("{}#{}", history_id, attempt_number),
            })?;
        iteration.master_endorsement = Some(text);

        self.storage.update_history_item(&item).await?;
        info!(
            "{} endorsed attempt {} on {}",
            reviewer.username, attempt_number, history_id
        );
        Ok(item)
    }

    /// Leave owner feedback on a piece, adding it to the learner's portfolio.
    pub async fn leave_feedback(
        &self,
        reviewer: &User,
        history_id: &str,
        feedback: &str,
    ) -> Result<HistoryItem, StudioError> {
        let text = review_text(reviewer, feedback)?;
        let mut item = self.storage.history_item(history_id).await?;

        item.owner_feedback = Some(text);
        self.storage.update_history_item(&item).await?;

        info!("{} reviewed {}", reviewer.username, history_id);
        Ok(item)
    }

    /// Save a finished piece the user made without a generated recipe.
    pub async fn publish_work(
        &self,
        user: &User,
        image: &str,
        description: Option<&str>,
    ) -> Result<HistoryItem, StudioError> {
        if image.trim().is_empty() {
            return Err(StudioError::InvalidInput("a photo of the piece is required".to_string()));
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("My latest glass artwork.");

        let design = GeneratedDesign {
            image_url: image.to_string(),
            recipe: GlassRecipe {
                title: "My new piece".to_string(),
                description: description.to_string(),
                techniques: vec!["Handmade".to_string()],
                difficulty: Difficulty::Intermediate,
                estimated_time: "Unknown".to_string(),
                materials: vec!["Glass".to_string()],
                steps: Vec::new(),
                visual_prompt: String::new(),
            },
        };

        let item = self.storage.save_design(&user.id, design).await?;
        info!("User {} published {}", user.id, item.id);
        Ok(item)
    }

    /// Suggest a caption for a finished piece. Never fails.
    pub async fn caption(&self, image: &str) -> String {
        self.designer.describe(image).await
    }
}

fn review_text(reviewer: &User, text: &str) -> Result<String, StudioError> {
    if !reviewer.is_owner() {
        return Err(StudioError::NotPermitted(
            "only studio owners can review work".to_string(),
        ));
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(StudioError::InvalidInput("review text must not be empty".to_string()));
    }

    Ok(text.to_string())
}
