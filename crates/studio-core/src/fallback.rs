//! Canned data used when the model is unavailable or not applicable.

use sha2::{Digest, Sha256};

use crate::model::ComparisonResult;

/// Bundled images substituted when rendering fails.
pub const MOCK_IMAGES: [&str; 5] = [
    "/images/mock/glass-blown.png",
    "/images/mock/glass-lampwork.png",
    "/images/mock/glass-fused.png",
    "/images/mock/glass-masterpiece.png",
    "/images/mock/glass-student.png",
];

/// Caption returned when no API key is configured.
pub const TRIAL_CAPTION: &str = "A striking piece of glass art with beautiful play of light. \
Careful heat control gives it a unique sense of flow. (AI trial mode)";

/// Caption returned when the model gave back nothing.
pub const PENDING_CAPTION: &str = "The AI is still savoring your piece...";

/// Caption returned when the caption request failed.
pub const FAILED_CAPTION: &str =
    "The AI is still savoring your piece... (request failed, please try again later)";

/// Pick a mock image for a prompt.
///
/// The pick is a pure function of the prompt, so the same prompt always
/// falls back to the same image.
pub fn fallback_image(prompt: &str) -> &'static str {
    let digest = Sha256::digest(prompt.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let index = (u64::from_be_bytes(head) % MOCK_IMAGES.len() as u64) as usize;
    MOCK_IMAGES[index]
}

/// Fixed result for prototypes that did not come from the model.
pub fn demo_comparison() -> ComparisonResult {
    ComparisonResult {
        score: 88,
        comment: "(Demo mode) The prototype is a reference gallery image, so this is a \
simulated score. Your piece reproduces the form closely and the surface sheen is well handled."
            .to_string(),
        strengths: vec![
            "Well balanced proportions".to_string(),
            "Accurate colour reproduction".to_string(),
            "Clean, glossy surface".to_string(),
        ],
        improvements: vec![
            "Compare against an AI-generated prototype for a real assessment".to_string(),
            "Watch the finish at the base".to_string(),
            "Let the texture flow more naturally".to_string(),
        ],
    }
}

/// Result returned when the comparison service failed.
pub fn unavailable_comparison() -> ComparisonResult {
    ComparisonResult {
        score: 0,
        comment: "The AI vision service is temporarily unavailable. Check your network or try again later."
            .to_string(),
        strengths: vec![],
        improvements: vec![],
    }
}
