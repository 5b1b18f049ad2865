//! Design a recipe and render it with GeminiDesigner.
//!
//! Run with: cargo run -p gemini-designer --example test_recipe
//! Or with a custom idea: cargo run -p gemini-designer --example test_recipe -- "Your idea here"
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Gemini API key

use gemini_designer::{Designer, GeminiDesigner, ImageOutcome};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let idea = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "A small vase fading from amber to rose, like the sky at dawn".to_string()
    };

    println!("Initializing GeminiDesigner...");
    let designer = GeminiDesigner::from_env()?;

    println!("Designer initialized: {}", designer.name());
    println!("API URL: {}", designer.config().api_url);
    println!("Text model: {}", designer.config().text_model);
    println!("Image model: {}", designer.config().image_model);
    println!();

    println!("Designing: \"{}\"", idea);
    let recipe = designer.generate_recipe(&idea).await?;

    println!("=== Recipe ===");
    println!("{} ({})", recipe.title, recipe.difficulty.as_str());
    println!("{}", recipe.description);
    println!("Time: {}", recipe.estimated_time);
    println!("Techniques: {}", recipe.techniques.join(", "));
    println!("Materials: {}", recipe.materials.join(", "));
    for step in &recipe.steps {
        println!("  {}. {}", step.step_number, step.instruction);
        if let Some(ref tip) = step.tip {
            println!("     tip: {}", tip);
        }
    }
    println!("==============");

    println!("\nRendering...");
    match designer.generate_image(&recipe.visual_prompt).await {
        ImageOutcome::Generated(uri) => {
            println!("Generated image ({} bytes of data URI)", uri.len());
        }
        ImageOutcome::Fallback { image_url, reason } => {
            println!("Fell back to {} ({})", image_url, reason);
        }
    }

    Ok(())
}
