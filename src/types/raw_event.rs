use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{Attachment, ChannelId, ReactionEvent, TeamId, Timestamp, UserId};

/// Wire envelope for a message event on the real-time stream.
///
/// The platform multiplexes new messages, edits, deletions, and reply
/// notifications over one shape, discriminated by `subtype`: absence of
/// a subtype means "new message", and edits/deletes nest the original
/// message's identity inside the payload rather than reusing the
/// envelope's own `ts`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawMessage {
    /// Discriminator selecting the reconciliation transition.
    #[serde(default)]
    pub subtype: Option<String>,
    /// The event's own timestamp.
    #[serde(default)]
    pub ts: Option<Timestamp>,
    /// Channel the event belongs to.
    #[serde(default)]
    pub channel: Option<ChannelId>,
    /// Author, absent for bot and synthetic events.
    #[serde(default)]
    pub user: Option<UserId>,
    /// Message text for plain new messages.
    #[serde(default)]
    pub text: Option<String>,
    /// For `message_deleted`: the timestamp of the removed message.
    #[serde(default)]
    pub deleted_ts: Option<Timestamp>,
    /// For `message_changed`/`message_replied`: the nested original message.
    #[serde(default)]
    pub message: Option<NestedMessage>,
    /// Attachments on a plain new message.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// The nested message payload carried by edit and reply envelopes.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NestedMessage {
    /// Timestamp of the original message this payload targets.
    #[serde(default)]
    pub ts: Option<Timestamp>,
    /// Replacement text.
    #[serde(default)]
    pub text: Option<String>,
    /// Replacement attachments.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Thread root, present on reply notifications.
    #[serde(default)]
    pub thread_ts: Option<Timestamp>,
}

const SUBTYPE_CHANGED: &str = "message_changed";
const SUBTYPE_DELETED: &str = "message_deleted";
const SUBTYPE_REPLIED: &str = "message_replied";

impl RawMessage {
    /// Classifies the envelope into a [`RawEvent`] for the team the
    /// delivering session is connected to.
    ///
    /// Returns `Ok(None)` for envelopes the engine deliberately ignores
    /// (decorative subtypes with no text). Structural violations — a
    /// delete without `deleted_ts`, an edit without the nested message —
    /// are [`Error::MalformedEvent`]; the caller drops and counts them.
    pub fn classify(self, team_id: TeamId) -> Result<Option<RawEvent>> {
        let channel_id = self
            .channel
            .clone()
            .ok_or_else(|| Error::malformed_event("event is missing a channel"))?;

        match self.subtype.as_deref() {
            Some(SUBTYPE_DELETED) => {
                let deleted_timestamp = self
                    .deleted_ts
                    .ok_or_else(|| Error::malformed_event("message_deleted without deleted_ts"))?;
                Ok(Some(RawEvent::MessageDeleted(MessageDeleted {
                    channel_id,
                    team_id,
                    timestamp: self.ts.unwrap_or(deleted_timestamp),
                    deleted_timestamp,
                })))
            }
            Some(SUBTYPE_CHANGED) => {
                let nested = self
                    .message
                    .ok_or_else(|| Error::malformed_event("message_changed without a message"))?;
                let target_timestamp = nested.ts.ok_or_else(|| {
                    Error::malformed_event("message_changed target is missing ts")
                })?;
                Ok(Some(RawEvent::MessageChanged(MessageChanged {
                    channel_id,
                    team_id,
                    timestamp: self.ts.unwrap_or(target_timestamp),
                    target: MessageEdit {
                        timestamp: target_timestamp,
                        text: nested.text.unwrap_or_default(),
                        attachments: nested.attachments,
                    },
                })))
            }
            Some(SUBTYPE_REPLIED) => {
                let nested = self
                    .message
                    .ok_or_else(|| Error::malformed_event("message_replied without a message"))?;
                let parent_timestamp = nested.thread_ts.or(nested.ts).ok_or_else(|| {
                    Error::malformed_event("message_replied target is missing ts")
                })?;
                Ok(Some(RawEvent::MessageReplied(MessageReplied {
                    channel_id,
                    team_id,
                    timestamp: self.ts.unwrap_or(parent_timestamp),
                    parent_timestamp,
                })))
            }
            // No subtype is a plain new message. Subtypes like
            // "me_message" still carry ordinary text, so anything
            // unrecognized with text is treated the same way; anything
            // without text is decorative and ignored.
            _ => {
                let Some(text) = self.text else {
                    return Ok(None);
                };
                let timestamp = self
                    .ts
                    .ok_or_else(|| Error::malformed_event("message without ts"))?;
                Ok(Some(RawEvent::NewMessage(NewMessage {
                    channel_id,
                    team_id,
                    timestamp,
                    user: self.user,
                    text,
                    attachments: self.attachments,
                })))
            }
        }
    }
}

/// A new message to insert into the log.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMessage {
    /// Channel the message was posted to.
    pub channel_id: ChannelId,
    /// Team the delivering session is connected to.
    pub team_id: TeamId,
    /// Platform timestamp, the message's identity within its channel.
    pub timestamp: Timestamp,
    /// Author, when known.
    pub user: Option<UserId>,
    /// Raw markup text.
    pub text: String,
    /// Attachments, in platform order.
    pub attachments: Vec<Attachment>,
}

/// Replacement content for an existing message.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageEdit {
    /// Timestamp of the message being edited, not of the edit event.
    pub timestamp: Timestamp,
    /// Replacement text.
    pub text: String,
    /// Replacement attachments.
    pub attachments: Vec<Attachment>,
}

/// An edit to a previously delivered message.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageChanged {
    /// Channel of the edited message.
    pub channel_id: ChannelId,
    /// Team the delivering session is connected to.
    pub team_id: TeamId,
    /// The edit event's own timestamp.
    pub timestamp: Timestamp,
    /// The original message's identity and replacement content.
    pub target: MessageEdit,
}

/// A deletion of a previously delivered message.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageDeleted {
    /// Channel of the deleted message.
    pub channel_id: ChannelId,
    /// Team the delivering session is connected to.
    pub team_id: TeamId,
    /// The delete event's own timestamp.
    pub timestamp: Timestamp,
    /// Timestamp of the message being removed.
    pub deleted_timestamp: Timestamp,
}

/// A notification that a threaded reply was posted.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageReplied {
    /// Channel of the thread.
    pub channel_id: ChannelId,
    /// Team the delivering session is connected to.
    pub team_id: TeamId,
    /// The reply event's own timestamp.
    pub timestamp: Timestamp,
    /// Timestamp of the thread root.
    pub parent_timestamp: Timestamp,
}

/// A classified event ready for reconciliation.
///
/// This is the input alphabet of the [`MessageLog`](crate::MessageLog)
/// state machine. `MessageReplied` and the reaction variants are
/// acknowledged but reserved: the log counts them without mutating.
#[derive(Clone, Debug, PartialEq)]
pub enum RawEvent {
    /// A message to insert.
    NewMessage(NewMessage),
    /// An in-place edit of an existing message.
    MessageChanged(MessageChanged),
    /// Removal of an existing message.
    MessageDeleted(MessageDeleted),
    /// A threaded reply notification (reserved transition).
    MessageReplied(MessageReplied),
    /// A reaction added to a message (reserved transition).
    ReactionAdded(ReactionEvent),
    /// A reaction removed from a message (reserved transition).
    ReactionRemoved(ReactionEvent),
}

impl RawEvent {
    /// The channel this event belongs to.
    pub fn channel_id(&self) -> &ChannelId {
        match self {
            RawEvent::NewMessage(e) => &e.channel_id,
            RawEvent::MessageChanged(e) => &e.channel_id,
            RawEvent::MessageDeleted(e) => &e.channel_id,
            RawEvent::MessageReplied(e) => &e.channel_id,
            RawEvent::ReactionAdded(e) => &e.channel_id,
            RawEvent::ReactionRemoved(e) => &e.channel_id,
        }
    }

    /// The team this event originated from.
    pub fn team_id(&self) -> &TeamId {
        match self {
            RawEvent::NewMessage(e) => &e.team_id,
            RawEvent::MessageChanged(e) => &e.team_id,
            RawEvent::MessageDeleted(e) => &e.team_id,
            RawEvent::MessageReplied(e) => &e.team_id,
            RawEvent::ReactionAdded(e) => &e.team_id,
            RawEvent::ReactionRemoved(e) => &e.team_id,
        }
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            RawEvent::NewMessage(_) => "message",
            RawEvent::MessageChanged(_) => "message_changed",
            RawEvent::MessageDeleted(_) => "message_deleted",
            RawEvent::MessageReplied(_) => "message_replied",
            RawEvent::ReactionAdded(_) => "reaction_added",
            RawEvent::ReactionRemoved(_) => "reaction_removed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> TeamId {
        TeamId::new("T1")
    }

    #[test]
    fn plain_message_classifies_as_new() {
        let raw: RawMessage = serde_json::from_str(
            r#"{"type":"message","channel":"C1","user":"U1","text":"hi","ts":"100.000000"}"#,
        )
        .unwrap();
        match raw.classify(team()).unwrap() {
            Some(RawEvent::NewMessage(m)) => {
                assert_eq!(m.text, "hi");
                assert_eq!(m.timestamp, Timestamp::parse("100.000000").unwrap());
            }
            other => panic!("expected NewMessage, got {other:?}"),
        }
    }

    #[test]
    fn changed_targets_nested_timestamp() {
        let raw: RawMessage = serde_json::from_str(
            r#"{"subtype":"message_changed","channel":"C1","ts":"200.000000",
                "message":{"ts":"100.000000","text":"edited"}}"#,
        )
        .unwrap();
        match raw.classify(team()).unwrap() {
            Some(RawEvent::MessageChanged(m)) => {
                assert_eq!(m.target.timestamp, Timestamp::parse("100.000000").unwrap());
                assert_eq!(m.timestamp, Timestamp::parse("200.000000").unwrap());
                assert_eq!(m.target.text, "edited");
            }
            other => panic!("expected MessageChanged, got {other:?}"),
        }
    }

    #[test]
    fn deleted_targets_deleted_ts() {
        let raw: RawMessage = serde_json::from_str(
            r#"{"subtype":"message_deleted","channel":"C1","ts":"200.000000","deleted_ts":"100.000000"}"#,
        )
        .unwrap();
        match raw.classify(team()).unwrap() {
            Some(RawEvent::MessageDeleted(m)) => {
                assert_eq!(m.deleted_timestamp, Timestamp::parse("100.000000").unwrap());
            }
            other => panic!("expected MessageDeleted, got {other:?}"),
        }
    }

    #[test]
    fn changed_without_nested_message_is_malformed() {
        let raw: RawMessage = serde_json::from_str(
            r#"{"subtype":"message_changed","channel":"C1","ts":"200.000000"}"#,
        )
        .unwrap();
        let err = raw.classify(team()).unwrap_err();
        assert!(err.is_malformed_event());
    }

    #[test]
    fn missing_channel_is_malformed() {
        let raw: RawMessage =
            serde_json::from_str(r#"{"text":"hi","ts":"100.000000"}"#).unwrap();
        assert!(raw.classify(team()).unwrap_err().is_malformed_event());
    }

    #[test]
    fn decorative_subtype_without_text_is_ignored() {
        let raw: RawMessage = serde_json::from_str(
            r#"{"subtype":"channel_join","channel":"C1","ts":"100.000000"}"#,
        )
        .unwrap();
        assert!(raw.classify(team()).unwrap().is_none());
    }

    #[test]
    fn unknown_subtype_with_text_is_a_message() {
        let raw: RawMessage = serde_json::from_str(
            r#"{"subtype":"me_message","channel":"C1","text":"waves","ts":"100.000000"}"#,
        )
        .unwrap();
        assert!(matches!(
            raw.classify(team()).unwrap(),
            Some(RawEvent::NewMessage(_))
        ));
    }
}
