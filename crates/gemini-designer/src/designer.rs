//! GeminiDesigner implementation using the Gemini REST API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use studio_core::{
    async_trait, fallback, ComparisonOutcome, ComparisonResult, DataUri, Designer,
    GeneratedDesign, GlassRecipe, ImageOutcome, ImageSource, StudioError,
};
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::config::GeminiDesignerConfig;
use crate::prompts;

/// A designer backed by Google's Gemini models.
///
/// The client is stateless between calls. Its credential comes from the
/// configuration it was built with; use [`GeminiDesigner::with_api_key`] to
/// get a client with a different key.
#[derive(Debug, Clone)]
pub struct GeminiDesigner {
    client: Client,
    config: GeminiDesignerConfig,
}

impl GeminiDesigner {
    /// Create a new GeminiDesigner with the given configuration.
    pub fn new(config: GeminiDesignerConfig) -> Result<Self, StudioError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StudioError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "GeminiDesigner initialized with text model: {}, image model: {}, key configured: {}",
            config.text_model,
            config.image_model,
            config.has_api_key()
        );

        Ok(Self { client, config })
    }

    /// Create a GeminiDesigner from environment variables.
    ///
    /// See [`GeminiDesignerConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, StudioError> {
        let config = GeminiDesignerConfig::from_env()?;
        Self::new(config)
    }

    /// Return a new designer using `key`, leaving this one untouched.
    pub fn with_api_key(&self, key: impl Into<String>) -> Result<Self, StudioError> {
        let mut config = self.config.clone();
        config.api_key = key.into().trim().to_string();
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiDesignerConfig {
        &self.config
    }

    fn ensure_api_key(&self) -> Result<(), StudioError> {
        if self.config.has_api_key() {
            Ok(())
        } else {
            Err(StudioError::MissingApiKey)
        }
    }

    /// Make a `generateContent` request.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, StudioError> {
        self.ensure_api_key()?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, model
        );

        debug!("Sending generateContent request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| StudioError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(ApiError { error }) => match error.status {
                    Some(reason) => format!("{} ({})", error.message, reason),
                    None => error.message,
                },
                Err(_) => error_text,
            };

            return Err(StudioError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            StudioError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Token usage - prompt: {}, candidates: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        Ok(body)
    }

    async fn request_recipe(
        &self,
        parts: Vec<Part>,
        system_instruction: String,
    ) -> Result<GlassRecipe, StudioError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            system_instruction: Some(Content::system(system_instruction)),
            generation_config: Some(GenerationConfig::json(prompts::recipe_schema(
                &self.config.response_language,
            ))),
        };

        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        parse_recipe(response.text().as_deref())
    }

    async fn request_image(&self, visual_prompt: &str) -> Result<DataUri, StudioError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(prompts::image_prompt(
                visual_prompt,
            ))])],
            system_instruction: None,
            generation_config: None,
        };

        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;

        if let Some(image) = response.first_image() {
            return Ok(image);
        }

        match response.block_reason() {
            Some(reason) => Err(StudioError::MalformedResponse(format!(
                "image blocked: {}",
                reason
            ))),
            None => Err(StudioError::MalformedResponse(
                "no image generated by the model".to_string(),
            )),
        }
    }

    async fn request_comparison(
        &self,
        prototype: &DataUri,
        attempt: &DataUri,
    ) -> Result<ComparisonResult, StudioError> {
        let language = &self.config.response_language;
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::text(prompts::comparison_prompt(language)),
                Part::text("Prototype Design:"),
                Part::image(prototype),
                Part::text("User Creation:"),
                Part::image(attempt),
            ])],
            system_instruction: None,
            generation_config: Some(GenerationConfig::json(prompts::comparison_schema(language))),
        };

        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        parse_comparison(response.text().as_deref())
    }

    async fn request_caption(&self, image: &DataUri) -> Result<Option<String>, StudioError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::text(prompts::caption_prompt(&self.config.response_language)),
                Part::image(image),
            ])],
            system_instruction: None,
            generation_config: None,
        };

        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        Ok(response.text().map(|t| t.trim().to_string()))
    }
}

#[async_trait]
impl Designer for GeminiDesigner {
    async fn generate_recipe(&self, prompt: &str) -> Result<GlassRecipe, StudioError> {
        self.ensure_api_key()?;

        let idea = prompt.trim();
        if idea.is_empty() {
            return Err(StudioError::InvalidInput(
                "describe the piece you want to make".to_string(),
            ));
        }

        let language = &self.config.response_language;
        let parts = vec![Part::text(prompts::recipe_prompt(idea, language))];

        self.request_recipe(parts, prompts::recipe_system_instruction(language))
            .await
            .inspect_err(|e| warn!("Recipe generation failed: {}", e))
    }

    async fn recipe_from_image(
        &self,
        image: &str,
        prompt: Option<&str>,
    ) -> Result<GeneratedDesign, StudioError> {
        self.ensure_api_key()?;

        let photo = DataUri::parse(image)?;
        let language = &self.config.response_language;
        let parts = vec![
            Part::text(prompts::image_recipe_prompt(prompt, language)),
            Part::image(&photo),
        ];

        let recipe = self
            .request_recipe(parts, prompts::image_analysis_system_instruction(language))
            .await
            .inspect_err(|e| warn!("Image analysis failed: {}", e))?;

        Ok(GeneratedDesign {
            image_url: image.to_string(),
            recipe,
        })
    }

    async fn generate_image(&self, visual_prompt: &str) -> ImageOutcome {
        match self.request_image(visual_prompt).await {
            Ok(image) => ImageOutcome::Generated(image.to_uri()),
            Err(e) => {
                warn!("Real image generation failed, falling back to mock: {}", e);
                ImageOutcome::Fallback {
                    image_url: fallback::fallback_image(visual_prompt).to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn compare(
        &self,
        prototype_image: &str,
        user_image: &str,
    ) -> Result<ComparisonOutcome, StudioError> {
        let prototype = match ImageSource::classify(prototype_image) {
            ImageSource::Inline(uri) => uri,
            other => {
                info!(
                    "Prototype is not a generated image ({}), returning demo score",
                    kind(&other)
                );
                return Ok(ComparisonOutcome::Demo(fallback::demo_comparison()));
            }
        };

        self.ensure_api_key()?;
        let attempt = match DataUri::parse(user_image) {
            Ok(attempt) => attempt,
            Err(e) => {
                warn!("Comparison failed: {}", e);
                return Ok(ComparisonOutcome::Unavailable(
                    fallback::unavailable_comparison(),
                ));
            }
        };

        match self.request_comparison(&prototype, &attempt).await {
            Ok(result) => Ok(ComparisonOutcome::Scored(result)),
            Err(StudioError::MissingApiKey) => Err(StudioError::MissingApiKey),
            Err(e) => {
                warn!("Comparison failed: {}", e);
                Ok(ComparisonOutcome::Unavailable(fallback::unavailable_comparison()))
            }
        }
    }

    async fn describe(&self, image: &str) -> String {
        if !self.config.has_api_key() {
            return fallback::TRIAL_CAPTION.to_string();
        }

        let photo = match DataUri::parse(image) {
            Ok(photo) => photo,
            Err(e) => {
                warn!("Description generation failed: {}", e);
                return fallback::FAILED_CAPTION.to_string();
            }
        };

        match self.request_caption(&photo).await {
            Ok(Some(text)) => text,
            Ok(None) => fallback::PENDING_CAPTION.to_string(),
            Err(e) => {
                warn!("Description generation failed: {}", e);
                fallback::FAILED_CAPTION.to_string()
            }
        }
    }

    fn name(&self) -> &str {
        "GeminiDesigner"
    }
}

fn kind(source: &ImageSource) -> &'static str {
    match source {
        ImageSource::Inline(_) => "inline",
        ImageSource::Remote(_) => "remote",
        ImageSource::Local(_) => "local",
    }
}

/// Models occasionally wrap JSON in a markdown fence despite the MIME type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn parse_recipe(text: Option<&str>) -> Result<GlassRecipe, StudioError> {
    let text = text
        .ok_or_else(|| StudioError::MalformedResponse("model returned no recipe text".to_string()))?;

    let recipe: GlassRecipe = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| StudioError::MalformedResponse(format!("recipe is not valid JSON: {}", e)))?;

    recipe.validate()?;
    Ok(recipe)
}

#[derive(Deserialize)]
struct RawComparison {
    score: f64,
    comment: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
}

fn parse_comparison(text: Option<&str>) -> Result<ComparisonResult, StudioError> {
    let text = text.ok_or_else(|| {
        StudioError::MalformedResponse("model returned no comparison text".to_string())
    })?;

    let raw: RawComparison = serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        StudioError::MalformedResponse(format!("comparison is not valid JSON: {}", e))
    })?;

    Ok(ComparisonResult {
        score: raw.score.round().clamp(0.0, 100.0) as u8,
        comment: raw.comment,
        strengths: raw.strengths,
        improvements: raw.improvements,
    })
}
