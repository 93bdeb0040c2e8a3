//! Provider activation walkthrough
//!
//! This demo shows:
//! 1. Loading config.toml (falling back to built-in defaults)
//! 2. Activating every provider whose credential is set
//! 3. Resolving models by role and calling them with generic options
//!
//! Setup:
//! ```bash
//! cp config.toml.example config.toml
//! export OPENAI_API_KEY=sk-...
//! cargo run --example provider_activation
//! ```

use anyhow::Result;
use zdk_core::{Document, LlmOptions, ModelRole, ProcessEnvironment, ZConfig, ZConfigExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = match ZConfig::load() {
        Ok(config) => config,
        Err(e) => {
            println!("⚠️  Could not load config.toml: {}", e);
            println!("💡 Falling back to built-in OpenAI defaults");
            ZConfig::test_defaults()
        }
    };

    zdk_telemetry::init_telemetry(&config.telemetry);

    println!("=== ZDK Provider Activation ===\n");

    let available = config.available_providers(&ProcessEnvironment);
    if available.is_empty() {
        println!("❌ No provider credential set (OPENAI_API_KEY, GEMINI_API_KEY)");
        println!("   Nothing will be registered.\n");
    } else {
        println!("✅ Available providers: {}\n", available.join(", "));
    }

    let registry = config.activate_providers()?;

    println!("📋 Registered resources: {}", registry.len());
    for resource in registry.iter() {
        println!(
            "   - [{}] {:<10} {}",
            resource.provider(),
            resource.role().as_str(),
            resource.name()
        );
    }
    println!();

    let workhorse = match registry.chat(ModelRole::Workhorse) {
        Ok(resource) => resource,
        Err(e) => {
            println!("ℹ️  {}", e);
            return Ok(());
        }
    };

    let options = LlmOptions::new()
        .with_temperature(0.2)
        .with_max_tokens(128)
        .with_top_k(40);
    if let Some(converter) = workhorse.converter() {
        let dropped = converter.unsupported_fields(&options);
        if !dropped.is_empty() {
            println!("🔧 {} ignores: {}", workhorse.provider(), dropped.join(", "));
        }
    }

    match workhorse
        .generate("Explain what an embedding is in one sentence.", &options)
        .await
    {
        Ok(response) => println!("🤖 {}: {}\n", workhorse.name(), response.content),
        Err(e) => println!("⚠️  Generation failed: {}\n", e),
    }

    let embedding = registry.embedding()?;
    let document = Document::new("Embeddings map text to vectors.")
        .with_metadata("source", "demo");
    match embedding.embed_document(&document).await {
        Ok(vector) => println!(
            "📐 {} produced {} dimensions",
            embedding.name(),
            vector.vector.len()
        ),
        Err(e) => println!("⚠️  Embedding failed: {}", e),
    }

    Ok(())
}
