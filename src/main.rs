//! # steptutor
//!
//! LINE webhook bot that forwards homework problems (text or image) to an
//! LLM via OpenRouter and replies with a step-by-step solution, reformatted
//! from the model's markdown/LaTeX into chat-safe plain text.

mod config;
mod format;
mod line;
mod llm;
mod webhook;

use std::sync::Arc;

use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging (info level by default; use RUST_LOG=debug for verbose)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .ok();

    // Load application configuration (print user-friendly message; exit uses Display not Debug)
    let config = config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    log::info!("Configuration loaded, model: {}", config.model_id);

    let state = Arc::new(webhook::AppState {
        line: line::Client::new(config.line_channel_access_token.clone()),
        config,
    });
    let app = webhook::router(state.clone());

    let addr = format!("0.0.0.0:{}", state.config.port);
    log::info!("Starting webhook server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
