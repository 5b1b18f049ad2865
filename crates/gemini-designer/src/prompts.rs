//! Prompt text and response schemas.

use serde_json::{json, Value};
use studio_core::Difficulty;

/// Appended to every visual prompt before rendering.
pub const IMAGE_STYLE_SUFFIX: &str = "cinematic lighting, 8k resolution, highly detailed glass \
texture, studio photography, shallow depth of field, masterpiece";

/// System instruction for designing recipes from text.
pub fn recipe_system_instruction(language: &str) -> String {
    format!(
        "You are Lumina, the AI assistant of a professional glass art studio. You give expert \
guidance on glassblowing, lampworking, kiln casting and cold working. Always answer in {} \
except for image generation prompts, which are English.",
        language
    )
}

/// System instruction for reading recipes out of photos.
pub fn image_analysis_system_instruction(language: &str) -> String {
    format!(
        "You are Lumina, the AI assistant of a professional glass art studio. You are skilled at \
reading the material, luster and forming process of glass artworks from images. Always answer \
in {} except for image generation prompts, which are English.",
        language
    )
}

/// User prompt for a text-only recipe.
pub fn recipe_prompt(idea: &str, language: &str) -> String {
    format!(
        "As a world-class glass art master, design a professional glassmaking recipe for this \
idea: \"{idea}\".\n\n\
Requirements:\n\
1. Every field (title, description, steps, materials, ...) must be written in {language}, \
except 'visualPrompt', which must stay in English.\n\
2. The design should be both artistic and practical to make.\n\
3. Rate the difficulty objectively."
    )
}

/// User prompt accompanying a photo.
pub fn image_recipe_prompt(hint: Option<&str>, language: &str) -> String {
    let hint = hint.map(str::trim).unwrap_or_default();
    format!(
        "As a world-class glass art master, analyze the glass artwork in this image.\n\
1. Identify its techniques (blowing, lampworking, kiln casting, ...).\n\
2. Work backwards to the recipe used to make it.\n\
3. If the user added a description, take it into account: \"{hint}\".\n\n\
Output the recipe strictly as JSON. Every field must be written in {language}, except \
'visualPrompt', which must stay in English. Steps should be detailed and professional."
    )
}

/// Prompt sent to the image model.
pub fn image_prompt(visual_prompt: &str) -> String {
    format!("{}, {}", visual_prompt.trim(), IMAGE_STYLE_SUFFIX)
}

/// Instruction heading a prototype/attempt comparison.
pub fn comparison_prompt(language: &str) -> String {
    format!(
        "As a strict glass art critic, compare the learner's physical piece (User Creation) with \
the design prototype (Prototype Design). Assess form, colour fidelity and technical execution. \
Write the JSON result in {}.",
        language
    )
}

/// Instruction for a short social caption.
pub fn caption_prompt(language: &str) -> String {
    format!(
        "Analyze this image of a glass artwork and write a short social-media caption in an \
artist's voice. Focus on the craft (blowing, lampworking, colour layering, ...) and its visual \
beauty. Keep it under 80 words, professional yet passionate, written in {}.",
        language
    )
}

/// Response schema for [`studio_core::GlassRecipe`].
pub fn recipe_schema(language: &str) -> Value {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": format!("Name of the piece ({})", language) },
            "description": { "type": "STRING", "description": format!("Design concept and description ({})", language) },
            "techniques": { "type": "ARRAY", "items": { "type": "STRING" }, "description": format!("Required techniques ({})", language) },
            "difficulty": { "type": "STRING", "enum": difficulties },
            "estimatedTime": { "type": "STRING", "description": format!("Estimated time, e.g. '4 hours' ({})", language) },
            "materials": { "type": "ARRAY", "items": { "type": "STRING" }, "description": format!("Required materials ({})", language) },
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "stepNumber": { "type": "INTEGER" },
                        "instruction": { "type": "STRING", "description": format!("Step details ({})", language) },
                        "tip": { "type": "STRING", "description": format!("Master's tip ({})", language) }
                    },
                    "required": ["stepNumber", "instruction"]
                }
            },
            "visualPrompt": {
                "type": "STRING",
                "description": "A highly detailed, photorealistic visual prompt in English to generate an image of this glass artwork. Include lighting, texture, and color details."
            }
        },
        "required": ["title", "description", "techniques", "difficulty", "estimatedTime", "materials", "steps", "visualPrompt"]
    })
}

/// Response schema for [`studio_core::ComparisonResult`].
pub fn comparison_schema(language: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER", "description": "Score between 0 and 100" },
            "comment": { "type": "STRING", "description": format!("Constructive critique from a glass art master ({})", language) },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" }, "description": format!("Strengths ({})", language) },
            "improvements": { "type": "ARRAY", "items": { "type": "STRING" }, "description": format!("Suggested improvements ({})", language) }
        },
        "required": ["score", "comment", "strengths", "improvements"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_schema_requires_all_fields() {
        let schema = recipe_schema("English");
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 8);
        assert!(required.iter().any(|v| v == "visualPrompt"));
        assert_eq!(
            schema["properties"]["difficulty"]["enum"],
            json!(["Beginner", "Intermediate", "Advanced", "Master"])
        );
    }

    #[test]
    fn test_prompts_carry_language_and_input() {
        let prompt = recipe_prompt("a dawn-coloured vase", "Simplified Chinese");
        assert!(prompt.contains("a dawn-coloured vase"));
        assert!(prompt.contains("Simplified Chinese"));

        let prompt = image_recipe_prompt(None, "English");
        assert!(prompt.contains("\"\""));

        let prompt = image_recipe_prompt(Some("  blue swirl "), "English");
        assert!(prompt.contains("\"blue swirl\""));
    }

    #[test]
    fn test_image_prompt_suffix() {
        let prompt = image_prompt("A cobalt bowl ");
        assert!(prompt.starts_with("A cobalt bowl, cinematic lighting"));
        assert!(prompt.ends_with("masterpiece"));
    }
}
