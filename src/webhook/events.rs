//! Serde model of the webhook payload (message events only).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct WebhookPayload {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum Event {
    Message {
        #[serde(rename = "replyToken")]
        reply_token: String,
        message: Message,
        #[serde(default)]
        source: Option<Source>,
    },
    /// Follow/unfollow/postback and anything newer: ignored.
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum Message {
    Text { text: String },
    Image { id: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Source {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}
