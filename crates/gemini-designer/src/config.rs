//! Configuration for GeminiDesigner.

use std::env;

use studio_core::StudioError;

/// Default Gemini REST endpoint.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for recipes, comparisons and captions.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";

/// Default model for rendering images.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Default language for user-facing recipe fields.
pub const DEFAULT_RESPONSE_LANGUAGE: &str = "Simplified Chinese";

/// Configuration for GeminiDesigner.
#[derive(Debug, Clone)]
pub struct GeminiDesignerConfig {
    /// Gemini API base URL, or a proxy in front of it.
    pub api_url: String,

    /// API key. Empty means no credential is configured.
    pub api_key: String,

    /// Model for structured text output and image understanding.
    pub text_model: String,

    /// Model for image generation.
    pub image_model: String,

    /// Language the model writes recipe fields, critiques and captions in.
    /// The visual prompt is always English.
    pub response_language: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiDesignerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            response_language: DEFAULT_RESPONSE_LANGUAGE.to_string(),
            timeout_secs: 60,
        }
    }
}

impl GeminiDesignerConfig {
    /// Create configuration from environment variables.
    ///
    /// All variables are optional. A missing key is not an error here;
    /// credentialed calls report [`StudioError::MissingApiKey`] instead so the
    /// caller can ask for one.
    ///
    /// - `GEMINI_API_KEY` - API key
    /// - `GEMINI_API_URL` - API or proxy base URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_TEXT_MODEL` - Text model (default: gemini-3-flash-preview)
    /// - `GEMINI_IMAGE_MODEL` - Image model (default: gemini-2.5-flash-image)
    /// - `GEMINI_RESPONSE_LANGUAGE` - Output language (default: Simplified Chinese)
    /// - `GEMINI_TIMEOUT_SECS` - Request timeout (default: 60)
    pub fn from_env() -> Result<Self, StudioError> {
        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();

        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(StudioError::Configuration(format!(
                "GEMINI_API_URL must be an http(s) URL, got '{}'",
                api_url
            )));
        }

        let text_model =
            env::var("GEMINI_TEXT_MODEL").unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string());

        let image_model =
            env::var("GEMINI_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());

        let response_language = env::var("GEMINI_RESPONSE_LANGUAGE")
            .unwrap_or_else(|_| DEFAULT_RESPONSE_LANGUAGE.to_string());

        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            text_model,
            image_model,
            response_language,
            timeout_secs,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiDesignerConfigBuilder {
        GeminiDesignerConfigBuilder::default()
    }

    /// Whether a credential is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Builder for GeminiDesignerConfig.
#[derive(Debug, Default)]
pub struct GeminiDesignerConfigBuilder {
    config: GeminiDesignerConfig,
}

impl GeminiDesignerConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API (or proxy) URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the text model.
    pub fn text_model(mut self, model: impl Into<String>) -> Self {
        self.config.text_model = model.into();
        self
    }

    /// Set the image model.
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.config.image_model = model.into();
        self
    }

    /// Set the response language.
    pub fn response_language(mut self, language: impl Into<String>) -> Self {
        self.config.response_language = language.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiDesignerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiDesignerConfig::default();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.api_key.is_empty());
        assert!(!config.has_api_key());
        assert_eq!(config.text_model, "gemini-3-flash-preview");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.response_language, "Simplified Chinese");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_builder_all_options() {
        let config = GeminiDesignerConfig::builder()
            .api_key("my-key")
            .api_url("https://proxy.example.workers.dev/")
            .text_model("gemini-2.5-flash")
            .image_model("imagen")
            .response_language("English")
            .timeout_secs(5)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert!(config.has_api_key());
        assert_eq!(config.api_url, "https://proxy.example.workers.dev");
        assert_eq!(config.text_model, "gemini-2.5-flash");
        assert_eq!(config.image_model, "imagen");
        assert_eq!(config.response_language, "English");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = GeminiDesignerConfig::builder().api_key("   ").build();
        assert!(!config.has_api_key());
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_gemini_vars() {
            std::env::remove_var("GEMINI_API_KEY");
            std::env::remove_var("GEMINI_API_URL");
            std::env::remove_var("GEMINI_TEXT_MODEL");
            std::env::remove_var("GEMINI_IMAGE_MODEL");
            std::env::remove_var("GEMINI_RESPONSE_LANGUAGE");
            std::env::remove_var("GEMINI_TIMEOUT_SECS");
        }

        // Scenario 1: nothing set, defaults and no key
        clear_all_gemini_vars();
        let config = GeminiDesignerConfig::from_env().unwrap();
        assert!(!config.has_api_key());
        assert_eq!(config.api_url, DEFAULT_API_URL);

        // Scenario 2: everything set
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_API_KEY", " env-key ");
        std::env::set_var("GEMINI_API_URL", "https://proxy.test/");
        std::env::set_var("GEMINI_TEXT_MODEL", "text-m");
        std::env::set_var("GEMINI_IMAGE_MODEL", "image-m");
        std::env::set_var("GEMINI_RESPONSE_LANGUAGE", "English");
        std::env::set_var("GEMINI_TIMEOUT_SECS", "15");

        let config = GeminiDesignerConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.api_url, "https://proxy.test");
        assert_eq!(config.text_model, "text-m");
        assert_eq!(config.image_model, "image-m");
        assert_eq!(config.response_language, "English");
        assert_eq!(config.timeout_secs, 15);

        // Scenario 3: unparsable timeout falls back, bad URL errors
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_TIMEOUT_SECS", "soon");
        assert_eq!(GeminiDesignerConfig::from_env().unwrap().timeout_secs, 60);

        std::env::set_var("GEMINI_API_URL", "ftp://nope");
        match GeminiDesignerConfig::from_env() {
            Err(StudioError::Configuration(msg)) => assert!(msg.contains("GEMINI_API_URL")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        clear_all_gemini_vars();
    }
}
