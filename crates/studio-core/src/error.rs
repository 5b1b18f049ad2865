//! Error types for studio operations.

use thiserror::Error;

/// Errors that can occur while generating designs or touching the store.
#[derive(Debug, Error)]
pub enum StudioError {
    /// No API key is configured. Callers should ask the user for one and retry.
    #[error("missing API key")]
    MissingApiKey,

    /// Invalid client or store configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Request could not reach the model service.
    #[error("network error: {0}")]
    Network(String),

    /// The model service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model returned no text, malformed JSON, or an incomplete record.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// The caller supplied unusable input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The user's role does not allow this operation.
    #[error("not permitted: {0}")]
    NotPermitted(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Persistence backend failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// A record could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The operation a user-facing message is being produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedOperation {
    /// Designing a recipe from a text prompt.
    Recipe,
    /// Reverse-engineering a recipe from a photo.
    ImageAnalysis,
    /// Anything else.
    Other,
}

impl StudioError {
    /// Whether this error is the recoverable missing-credential case.
    pub fn is_missing_api_key(&self) -> bool {
        matches!(self, StudioError::MissingApiKey)
    }

    /// Plain text suitable for showing to the user.
    pub fn user_message(&self, operation: FailedOperation) -> String {
        if self.is_missing_api_key() {
            return "A Gemini API key is required for this feature. Enter a key to continue."
                .to_string();
        }

        match operation {
            FailedOperation::Recipe => {
                "The AI ran into trouble designing this recipe. Check your network or try again later."
                    .to_string()
            }
            FailedOperation::ImageAnalysis => {
                "The AI could not read the glasswork in this image. Try a clearer photo."
                    .to_string()
            }
            FailedOperation::Other => match self {
                StudioError::InvalidInput(msg) | StudioError::NotPermitted(msg) => msg.clone(),
                _ => "Something unexpected happened while consulting the AI glass master."
                    .to_string(),
            },
        }
    }
}

/// Result type for studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;
