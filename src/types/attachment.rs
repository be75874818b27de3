use serde::{Deserialize, Serialize};

/// A rich attachment on a message.
///
/// Only the fields the display layer consumes are modeled; everything
/// else the platform sends is ignored on deserialization.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    /// Plain-text summary used when the attachment cannot be rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,

    /// Main body text of the attachment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Title line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// URL the title links to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,

    /// URL of an image to display inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Attachment {
    /// Creates an attachment with only body text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Attachment {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}
