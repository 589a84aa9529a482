//! LINE Messaging API client: reply to a message, download image content.

use serde_json::json;

const REPLY_URL: &str = "https://api.line.me/v2/bot/message/reply";
const CONTENT_URL: &str = "https://api-data.line.me/v2/bot/message";

/// Error talking to the LINE Messaging API.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("LINE API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Thin client over the two Messaging API endpoints the bot uses.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    access_token: String,
}

impl Client {
    pub fn new(access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            access_token,
        }
    }

    /// Send one text message back on the reply token.
    pub async fn reply(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        let body = json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });

        let response = self
            .http
            .post(REPLY_URL)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Download the binary content (e.g. an image) attached to a message.
    pub async fn message_content(&self, message_id: &str) -> Result<Vec<u8>, LineError> {
        let url = format!("{}/{}/content", CONTENT_URL, message_id);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LineError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(LineError::Status { status, body })
}
