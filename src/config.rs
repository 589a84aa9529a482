use std::env;

use async_openai::config::OpenAIConfig;

/// System prompt for text problems. `{RESPONSE_LANGUAGE}` is filled from config.
const SYSTEM_PROMPT: &str = "You are a helpful tutor that provides detailed step-by-step solutions to academic problems. \
Always break down complex problems into smaller, manageable steps. \
Explain each step clearly and concisely. \
If relevant, include mathematical formulas, scientific principles, or theoretical concepts. \
End with a brief summary of the solution. \
Respond in {RESPONSE_LANGUAGE}.";

/// System prompt for problems sent as an image.
const IMAGE_SYSTEM_PROMPT: &str = "You are a helpful tutor that solves academic problems found in images. \
Read the problem from the image, then provide a detailed step-by-step solution. \
Explain each step clearly and concisely. \
End with a brief summary of the solution. \
Respond in {RESPONSE_LANGUAGE}.";

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_config: OpenAIConfig,
    pub model_id: String,
    pub max_tokens: u32,
    pub response_language: String,
    pub line_channel_secret: String,
    pub line_channel_access_token: String,
    pub port: u16,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{} is not set", name),
            ConfigError::InvalidVar(name, value) => {
                write!(f, "{} has invalid value {:?}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidVar(name, value)),
        Err(_) => Ok(default),
    }
}

/// Load configuration from environment. Returns an error if a credential is
/// missing or a numeric variable fails to parse.
pub fn load() -> Result<Config, ConfigError> {
    let base_url = env::var("OPENROUTER_BASE_URL")
        .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());

    let api_key = required("OPENROUTER_API_KEY")?;

    let model_id = env::var("LANGUAGE_MODEL").unwrap_or_else(|_| "openai/gpt-4o-mini".to_string());

    let openai_config = OpenAIConfig::new()
        .with_api_base(base_url)
        .with_api_key(api_key);

    Ok(Config {
        openai_config,
        model_id,
        max_tokens: parsed("MAX_TOKENS", 1024)?,
        response_language: env::var("RESPONSE_LANGUAGE").unwrap_or_else(|_| "English".to_string()),
        line_channel_secret: required("LINE_CHANNEL_SECRET")?,
        line_channel_access_token: required("LINE_CHANNEL_ACCESS_TOKEN")?,
        port: parsed("PORT", 5000)?,
    })
}

impl Config {
    /// Text-problem system prompt with the response language filled in.
    pub fn system_prompt(&self) -> String {
        SYSTEM_PROMPT.replace("{RESPONSE_LANGUAGE}", &self.response_language)
    }

    /// Image-problem system prompt with the response language filled in.
    pub fn image_system_prompt(&self) -> String {
        IMAGE_SYSTEM_PROMPT.replace("{RESPONSE_LANGUAGE}", &self.response_language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_fills_language() {
        let config = Config {
            openai_config: OpenAIConfig::new(),
            model_id: "m".to_string(),
            max_tokens: 16,
            response_language: "Japanese".to_string(),
            line_channel_secret: "s".to_string(),
            line_channel_access_token: "t".to_string(),
            port: 5000,
        };
        assert!(config.system_prompt().contains("Respond in Japanese."));
        assert!(config.image_system_prompt().contains("Respond in Japanese."));
        assert!(!config.system_prompt().contains("{RESPONSE_LANGUAGE}"));
    }
}
