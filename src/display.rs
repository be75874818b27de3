//! The display-ready view of a message.

use time::OffsetDateTime;

use crate::data_store::DataStore;
use crate::parser::TextParser;
use crate::types::{Attachment, ChannelId, MessageEdit, NewMessage, TeamId, Timestamp, UserId};

/// A view-level aggregate of one reaction on a message.
///
/// Reaction events are not yet folded into this aggregate; the field
/// exists so the display shape is stable when they are.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionSummary {
    /// Emoji name, without colons.
    pub name: String,
    /// How many users reacted with it.
    pub count: u32,
}

/// One displayable message in the log.
///
/// Identity within a channel is the platform timestamp; across channels
/// the `(channel_id, timestamp)` pair disambiguates. The stored `text`
/// is raw platform markup; display text is derived on demand through a
/// parsing pipeline, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayMessage {
    /// Platform timestamp, the identity key within the channel.
    pub timestamp: Timestamp,
    /// Channel the message belongs to.
    pub channel_id: ChannelId,
    /// Team the message arrived from.
    pub team_id: TeamId,
    /// Author, when known.
    pub user: Option<UserId>,
    /// Raw markup text.
    pub text: String,
    /// Attachments, in platform order.
    pub attachments: Vec<Attachment>,
    /// Whether the message has been edited since delivery.
    pub edited: bool,
    /// Aggregated reactions (currently always empty, see module docs).
    pub reactions: Vec<ReactionSummary>,
}

impl DisplayMessage {
    /// Renders the raw text through a pipeline for display.
    ///
    /// Pure: identical pipeline and store give identical output.
    pub fn rendered_text(&self, parser: &dyn TextParser, store: &dyn DataStore) -> String {
        parser.parse(&self.text, store)
    }

    /// Replaces the content in place and marks the message edited.
    pub fn apply_edit(&mut self, edit: MessageEdit) {
        self.text = edit.text;
        self.attachments = edit.attachments;
        self.edited = true;
    }

    /// Wall-clock time the message was posted.
    pub fn posted_at(&self) -> OffsetDateTime {
        self.timestamp.to_datetime()
    }
}

impl From<NewMessage> for DisplayMessage {
    fn from(event: NewMessage) -> Self {
        DisplayMessage {
            timestamp: event.timestamp,
            channel_id: event.channel_id,
            team_id: event.team_id,
            user: event.user,
            text: event.text,
            attachments: event.attachments,
            edited: false,
            reactions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_store::Directory;
    use crate::emoji::EmojiCatalog;
    use crate::parser::ComposedParser;
    use std::sync::Arc;

    fn message(text: &str) -> DisplayMessage {
        DisplayMessage::from(NewMessage {
            channel_id: ChannelId::new("C1"),
            team_id: TeamId::new("T1"),
            timestamp: Timestamp::parse("100.000000").unwrap(),
            user: Some(UserId::new("U1")),
            text: text.to_string(),
            attachments: Vec::new(),
        })
    }

    #[test]
    fn new_messages_start_unedited() {
        let msg = message("hi");
        assert!(!msg.edited);
        assert!(msg.reactions.is_empty());
    }

    #[test]
    fn apply_edit_replaces_content_and_flags() {
        let mut msg = message("hi");
        msg.apply_edit(MessageEdit {
            timestamp: msg.timestamp,
            text: "edited".to_string(),
            attachments: vec![Attachment::from_text("new")],
        });
        assert!(msg.edited);
        assert_eq!(msg.text, "edited");
        assert_eq!(msg.attachments.len(), 1);
    }

    #[test]
    fn rendered_text_is_derived_not_stored() {
        let msg = message("hi :smile:");
        let pipeline = ComposedParser::for_session(Arc::new(EmojiCatalog::with_builtins()));
        let store = Directory::new();
        assert_eq!(msg.rendered_text(&pipeline, &store), "hi \u{1f604}");
        // raw text untouched
        assert_eq!(msg.text, "hi :smile:");
    }
}
