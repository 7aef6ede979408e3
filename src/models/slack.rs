use serde::{Deserialize, Serialize, Serializer};

/// Form body Slack posts for a slash command invocation.
///
/// Only `text` and `user_id` drive the roll; the rest is kept for logging
/// and the audit record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlashCommandPayload {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
}

/// Who sees the reply inside Slack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    InChannel,
    Ephemeral,
}

/// Attachment colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageColor {
    Success,
    Error,
    Info,
}

impl MessageColor {
    pub fn as_hex(self) -> &'static str {
        match self {
            Self::Success => "#00ff00",
            Self::Error => "#ff0000",
            Self::Info => "#439fe0",
        }
    }
}

impl Serialize for MessageColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_hex())
    }
}

/// A labelled value rendered inside an attachment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl AttachmentField {
    pub fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }

    pub fn long(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }
}

/// Legacy Slack message attachment.
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub color: MessageColor,
    pub text: String,
    pub fallback: String,
    pub fields: Vec<AttachmentField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    pub mrkdwn_in: Vec<&'static str>,
}

/// Body returned to Slack for a slash command.
#[derive(Debug, Clone, Serialize)]
pub struct SlackMessage {
    pub response_type: ResponseType,
    pub attachments: Vec<Attachment>,
}

impl SlackMessage {
    pub fn new(response_type: ResponseType, attachment: Attachment) -> Self {
        Self {
            response_type,
            attachments: vec![attachment],
        }
    }

    /// The single attachment every reply carries.
    pub fn attachment(&self) -> &Attachment {
        &self.attachments[0]
    }

    pub fn field_titles(&self) -> Vec<&str> {
        self.attachment()
            .fields
            .iter()
            .map(|f| f.title.as_str())
            .collect()
    }
}
