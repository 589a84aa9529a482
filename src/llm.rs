//! OpenRouter calls: prompt building, bounded retry, fallback on failure.

use std::time::{Duration, Instant};

use async_openai::Client;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

use crate::config::Config;
use crate::format::FALLBACK_MESSAGE;

const MAX_ATTEMPTS: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Call the chat completions endpoint with retry.
///
/// Never fails: after the last attempt the fixed fallback string is returned
/// instead, so a reply is always available to send.
async fn call_openrouter(config: &Config, messages: Value) -> String {
    let client = Client::with_config(config.openai_config.clone());
    let request = json!({
        "model": config.model_id,
        "messages": messages,
        "max_tokens": config.max_tokens,
    });

    for attempt in 1..=MAX_ATTEMPTS {
        match client.chat().create_byot::<_, Value>(request.clone()).await {
            Ok(response) => {
                // OpenRouter reports some failures inside a 200 body.
                if let Some(err) = response.get("error") {
                    let msg = err
                        .get("message")
                        .and_then(|v| v.as_str())
                        .unwrap_or("Unknown error");
                    log::warn!("API call attempt {} returned an error: {}", attempt, msg);
                } else if let Some(content) = response["choices"][0]["message"]["content"].as_str()
                {
                    return content.to_string();
                } else {
                    log::warn!("API call attempt {} returned no content", attempt);
                }
            }
            Err(e) => {
                if attempt == MAX_ATTEMPTS {
                    log::error!("API call failed after {} attempts: {}", MAX_ATTEMPTS, e);
                    return FALLBACK_MESSAGE.to_string();
                }
                log::warn!("API call attempt {} failed: {}", attempt, e);
            }
        }
        if attempt < MAX_ATTEMPTS {
            tokio::time::sleep(RETRY_DELAY).await;
        }
    }

    FALLBACK_MESSAGE.to_string()
}

/// Generate a step-by-step answer for a text problem.
/// Empty input is skipped and yields an empty string.
pub async fn generate_answer(config: &Config, user_input: &str) -> String {
    if user_input.is_empty() {
        log::info!("User input is empty, skipping");
        return String::new();
    }

    let messages = json!([
        { "role": "system", "content": config.system_prompt() },
        {
            "role": "user",
            "content": format!("Please solve this problem step by step: {}", user_input),
        },
    ]);

    log::info!("User prompt: {:?}", user_input);
    let started = Instant::now();
    let answer = call_openrouter(config, messages).await;
    log::info!(
        "Answer generation took {:.2} seconds",
        started.elapsed().as_secs_f64()
    );

    answer
}

/// Generate an answer for a problem sent as an image. The bytes go to the
/// vision model as a data URL; no OCR happens on our side.
pub async fn answer_from_image(config: &Config, image_bytes: &[u8]) -> String {
    let encoded = BASE64.encode(image_bytes);

    let messages = json!([
        { "role": "system", "content": config.image_system_prompt() },
        {
            "role": "user",
            "content": [
                {
                    "type": "text",
                    "text": "Please analyze this problem and provide a step-by-step solution:",
                },
                {
                    "type": "image_url",
                    "image_url": { "url": format!("data:image/jpeg;base64,{}", encoded) },
                },
            ],
        },
    ]);

    let started = Instant::now();
    let answer = call_openrouter(config, messages).await;
    log::info!(
        "Image answer generation took {:.2} seconds",
        started.elapsed().as_secs_f64()
    );

    answer
}
