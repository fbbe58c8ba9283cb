//! Slack webhook message payload and error-alert construction.

use serde::{Deserialize, Serialize};

/// Action type used for the logs link.
const ACTION_TYPE_BUTTON: &str = "button";

/// Top-level webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message text, prefixed with mention links.
    pub text: String,
    /// Styled blocks rendered below the text.
    pub attachments: Vec<Attachment>,
}

/// Styled message block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Plain-text summary for clients that cannot render attachments.
    pub fallback: String,
    pub title: String,
    pub author_name: String,
    pub author_icon: String,
    /// Severity tag, e.g. "danger".
    pub color: String,
    pub fields: Vec<Field>,
    pub actions: Vec<Action>,
}

/// Labeled value shown in an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    /// Layout hint: render side by side with other short fields.
    pub short: bool,
}

/// Interactive element attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub style: String,
    pub url: String,
}

/// Fixed presentational content of an error alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Attachment title.
    pub title: String,
    /// Attachment author name.
    pub author_name: String,
    /// Attachment author icon URL.
    pub author_icon: String,
    /// Attachment color tag.
    pub color: String,
    /// Title of the field carrying the error text.
    pub field_title: String,
    /// Label of the logs button.
    pub action_text: String,
    /// Style of the logs button.
    pub action_style: String,
    /// Text appended after the mention prefix.
    pub suffix: String,
    /// Prepended to the error text in the fallback summary.
    pub fallback_prefix: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: "High Priority".to_string(),
            author_name: "Hit-The_Bananas".to_string(),
            author_icon: "https://rpelm.com/images/banana-clipart-cartoon-1.png".to_string(),
            color: "danger".to_string(),
            field_title: "[Error Message]".to_string(),
            action_text: "View Logs".to_string(),
            action_style: "primary".to_string(),
            suffix: "you have a system error!".to_string(),
            fallback_prefix: "error alert ".to_string(),
        }
    }
}

impl Branding {
    /// Builds an error alert message with this branding.
    pub fn error_message<S: AsRef<str>>(
        &self,
        error_text: &str,
        logs_url: &str,
        mentions: &[S],
    ) -> Message {
        Message {
            text: format!("{}{}", link_mentions(mentions), self.suffix),
            attachments: vec![Attachment {
                fallback: format!("{}{}", self.fallback_prefix, error_text),
                title: self.title.clone(),
                author_name: self.author_name.clone(),
                author_icon: self.author_icon.clone(),
                color: self.color.clone(),
                fields: vec![Field {
                    title: self.field_title.clone(),
                    value: error_text.to_string(),
                    short: false,
                }],
                actions: vec![Action {
                    kind: ACTION_TYPE_BUTTON.to_string(),
                    text: self.action_text.clone(),
                    style: self.action_style.clone(),
                    url: logs_url.to_string(),
                }],
            }],
        }
    }
}

/// Builds an error alert message with the default branding.
pub fn build_error_message<S: AsRef<str>>(
    error_text: &str,
    logs_url: &str,
    mentions: &[S],
) -> Message {
    Branding::default().error_message(error_text, logs_url, mentions)
}

/// Wraps each mention as `<id> ` and concatenates them in order.
fn link_mentions<S: AsRef<str>>(mentions: &[S]) -> String {
    mentions.iter().fold(String::new(), |mut acc, name| {
        acc.push('<');
        acc.push_str(name.as_ref());
        acc.push_str("> ");
        acc
    })
}
