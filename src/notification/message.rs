//! Slack message payloads.
//!
//! These types serialize to the JSON accepted by both incoming webhooks and
//! `chat.postMessage`. Only the block shapes podalert emits are modelled.

use serde::{Deserialize, Serialize};

/// A message as posted to an incoming webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMessage {
    /// Overrides the webhook's default channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
}

impl WebhookMessage {
    /// A text-only message with no blocks.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// A block-only message with no fallback text.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Default::default()
        }
    }

    /// The text field, if it is set and non-empty.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

fn is_blank(text: &Option<String>) -> bool {
    text.as_deref().map_or(true, str::is_empty)
}

/// A layout block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fields: Vec<TextObject>,
    },
}

impl Block {
    /// A section rendering `text` as mrkdwn.
    pub fn markdown(text: impl Into<String>) -> Self {
        Block::Section {
            text: Some(TextObject::markdown(text)),
            fields: Vec::new(),
        }
    }

    /// A section rendering `text` as plain text.
    pub fn plain(text: impl Into<String>) -> Self {
        Block::Section {
            text: Some(TextObject::plain(text)),
            fields: Vec::new(),
        }
    }

    /// A section laid out as a grid of fields.
    pub fn fields(fields: Vec<TextObject>) -> Self {
        Block::Section { text: None, fields }
    }

    /// The section's main text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Section { text, .. } => text.as_ref().map(TextObject::text),
        }
    }
}

/// A text composition object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TextObject {
    #[serde(rename = "plain_text")]
    PlainText { text: String, emoji: bool },
    #[serde(rename = "mrkdwn")]
    Markdown { text: String, verbatim: bool },
}

impl TextObject {
    pub fn markdown(text: impl Into<String>) -> Self {
        TextObject::Markdown {
            text: text.into(),
            verbatim: true,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        TextObject::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            TextObject::PlainText { text, .. } | TextObject::Markdown { text, .. } => text,
        }
    }
}
