//! Log in, design a piece with Gemini and list the saved history.
//!
//! Run with: cargo run -p studio --example generate_design
//! Or with a custom idea: cargo run -p studio --example generate_design -- "Your idea here"
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Gemini API key
//!   STUDIO_DATABASE_URL - Optional SQLite URL (defaults to in-memory storage)

use std::env;
use std::sync::Arc;

use studio::{
    DesignRequest, FailedOperation, MemoryStore, RecordStore, StorageService, Studio, UserRole,
};
use studio_db::StudioDb;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("studio=info".parse()?))
        .init();

    let args: Vec<String> = env::args().collect();
    let idea = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "A small vase fading from amber to rose, like the sky at dawn".to_string()
    };

    let store: Arc<dyn RecordStore> = match env::var("STUDIO_DATABASE_URL") {
        Ok(url) => {
            let db = StudioDb::connect(&url).await?;
            db.migrate().await?;
            Arc::new(db)
        }
        Err(_) => Arc::new(MemoryStore::new()),
    };

    let storage = StorageService::new(store);
    let studio = Studio::gemini(storage.clone()).await?;
    let user = storage.login("Mia", UserRole::Hobbyist).await?;
    println!("Logged in as {} ({})", user.username, user.id);

    println!("Designing: \"{}\"", idea);
    match studio.generate(&user, &DesignRequest::from_prompt(&idea)).await {
        Ok(generation) => {
            let recipe = &generation.item.design.recipe;
            println!("=== {} ===", recipe.title);
            println!("{}", recipe.description);
            if let Some(image) = &generation.image {
                if image.is_fallback() {
                    println!("Using mock image {}", image.image_url());
                }
            }
        }
        Err(e) => println!("{}", e.user_message(FailedOperation::Recipe)),
    }

    println!("\nHistory:");
    for item in storage.user_history(&user.id).await? {
        println!("  {} {}", item.id, item.design.recipe.title);
    }

    Ok(())
}
