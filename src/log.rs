//! The event reconciliation state machine.
//!
//! A [`MessageLog`] folds an unordered, at-least-once stream of raw
//! platform events into a consistent in-memory list of displayable
//! messages, most recent first. Per `(channel, timestamp)` entry the
//! states are Absent and Present; events drive the transitions:
//!
//! - new message: Absent -> Present (head insert); duplicate inserts
//!   are ignored, so delivery is idempotent.
//! - message changed: Present -> Present with replaced content and
//!   `edited` set, matched by the *target* timestamp nested in the
//!   change payload; Absent -> no-op.
//! - message deleted: Present -> Absent, matched by `deleted_ts`;
//!   Absent -> no-op.
//! - replies and reactions: reserved transitions, acknowledged and
//!   counted without mutating the log.
//!
//! Nothing here ever panics or propagates an error for a bad event;
//! the log degrades to a silent no-op and reports what happened through
//! counters and the [`EventLogger`].

use std::sync::Arc;

use crate::display::DisplayMessage;
use crate::error::Error;
use crate::event_logger::{EventLogger, NoopEventLogger};
use crate::observability;
use crate::types::{ChannelId, RawEvent, RawMessage, TeamId, Timestamp};

/// What applying one event did to the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A new entry was inserted at the head.
    Inserted,
    /// The entry already existed; the event was ignored.
    Duplicate,
    /// An existing entry's content was replaced in place.
    Edited,
    /// An existing entry was removed.
    Deleted,
    /// The edit/delete target was not in the log; nothing changed.
    Stale,
    /// A reserved transition (reply or reaction); nothing changed.
    Reserved,
}

/// The ordered, mutable log of displayable messages.
///
/// One log backs one UI surface and may aggregate events from many
/// sessions. Ordering is most recent first. The invariant held across
/// every transition: at most one entry per `(channel_id, timestamp)`
/// pair, and no entry that did not arrive as a new message (edits and
/// deletes for unknown targets never create orphans).
pub struct MessageLog {
    messages: Vec<DisplayMessage>,
    logger: Arc<dyn EventLogger>,
}

impl MessageLog {
    /// Creates an empty log with no observer.
    pub fn new() -> Self {
        MessageLog {
            messages: Vec::new(),
            logger: Arc::new(NoopEventLogger),
        }
    }

    /// Creates an empty log that reports activity to `logger`.
    pub fn with_logger(logger: Arc<dyn EventLogger>) -> Self {
        MessageLog {
            messages: Vec::new(),
            logger,
        }
    }

    /// Applies one classified event to the log.
    ///
    /// Synchronous by design: there is no await point between looking a
    /// target up and mutating it, so a transition can never observe a
    /// half-applied peer.
    pub fn apply(&mut self, event: RawEvent) -> Outcome {
        observability::EVENTS_RECEIVED.click();
        self.logger.log_event(&event);

        let outcome = match &event {
            RawEvent::NewMessage(new) => {
                if self.position(&new.channel_id, new.timestamp).is_some() {
                    observability::DUPLICATE_INSERTS.click();
                    Outcome::Duplicate
                } else {
                    observability::EVENTS_INSERTED.click();
                    self.messages.insert(0, DisplayMessage::from(new.clone()));
                    Outcome::Inserted
                }
            }
            RawEvent::MessageChanged(change) => {
                match self.position(&change.channel_id, change.target.timestamp) {
                    Some(index) => {
                        observability::EVENTS_EDITED.click();
                        self.messages[index].apply_edit(change.target.clone());
                        Outcome::Edited
                    }
                    None => {
                        observability::STALE_TARGETS.click();
                        Outcome::Stale
                    }
                }
            }
            RawEvent::MessageDeleted(delete) => {
                match self.position(&delete.channel_id, delete.deleted_timestamp) {
                    Some(index) => {
                        observability::EVENTS_DELETED.click();
                        self.messages.remove(index);
                        Outcome::Deleted
                    }
                    None => {
                        observability::STALE_TARGETS.click();
                        Outcome::Stale
                    }
                }
            }
            // Thread-aware insertion and reaction aggregation are
            // reserved transitions: acknowledged, never applied.
            RawEvent::MessageReplied(_)
            | RawEvent::ReactionAdded(_)
            | RawEvent::ReactionRemoved(_) => {
                observability::RESERVED_EVENTS.click();
                Outcome::Reserved
            }
        };

        self.logger.log_outcome(&event, outcome);
        outcome
    }

    /// Classifies and applies a raw wire envelope delivered by a session
    /// connected to `team_id`.
    ///
    /// Malformed envelopes are dropped, counted, and reported to the
    /// logger; they are never an error to the caller. Returns the
    /// outcome, or `None` if the event was dropped or ignored.
    pub fn ingest(&mut self, raw: &str, team_id: TeamId) -> Option<Outcome> {
        let envelope: RawMessage = match serde_json::from_str(raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                observability::MALFORMED_DROPPED.click();
                self.logger
                    .log_drop(&Error::malformed_event(err.to_string()), raw);
                return None;
            }
        };
        match envelope.classify(team_id) {
            Ok(Some(event)) => Some(self.apply(event)),
            Ok(None) => {
                observability::IGNORED_SUBTYPES.click();
                None
            }
            Err(err) => {
                observability::MALFORMED_DROPPED.click();
                self.logger.log_drop(&err, raw);
                None
            }
        }
    }

    /// The messages, most recent first.
    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    /// Looks up the entry for `(channel, timestamp)`.
    pub fn get(&self, channel: &ChannelId, timestamp: Timestamp) -> Option<&DisplayMessage> {
        self.position(channel, timestamp).map(|i| &self.messages[i])
    }

    /// The number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the log holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn position(&self, channel: &ChannelId, timestamp: Timestamp) -> Option<usize> {
        self.messages
            .iter()
            .position(|m| m.timestamp == timestamp && &m.channel_id == channel)
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        MessageLog::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MessageChanged, MessageDeleted, MessageEdit, NewMessage};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn new_message(channel: &str, timestamp: &str, text: &str) -> RawEvent {
        RawEvent::NewMessage(NewMessage {
            channel_id: ChannelId::new(channel),
            team_id: TeamId::new("T1"),
            timestamp: ts(timestamp),
            user: None,
            text: text.to_string(),
            attachments: Vec::new(),
        })
    }

    fn changed(channel: &str, target: &str, text: &str) -> RawEvent {
        RawEvent::MessageChanged(MessageChanged {
            channel_id: ChannelId::new(channel),
            team_id: TeamId::new("T1"),
            timestamp: ts("999.000000"),
            target: MessageEdit {
                timestamp: ts(target),
                text: text.to_string(),
                attachments: Vec::new(),
            },
        })
    }

    fn deleted(channel: &str, target: &str) -> RawEvent {
        RawEvent::MessageDeleted(MessageDeleted {
            channel_id: ChannelId::new(channel),
            team_id: TeamId::new("T1"),
            timestamp: ts("999.000000"),
            deleted_timestamp: ts(target),
        })
    }

    #[test]
    fn inserts_are_idempotent() {
        let mut log = MessageLog::new();
        assert_eq!(log.apply(new_message("C1", "100.000000", "hi")), Outcome::Inserted);
        assert_eq!(
            log.apply(new_message("C1", "100.000000", "hi")),
            Outcome::Duplicate
        );
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn ordering_is_most_recent_first() {
        let mut log = MessageLog::new();
        log.apply(new_message("C1", "100.000001", "t1"));
        log.apply(new_message("C1", "100.000002", "t2"));
        log.apply(new_message("C1", "100.000003", "t3"));
        let texts: Vec<&str> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn edit_replaces_in_place_and_flags() {
        let mut log = MessageLog::new();
        log.apply(new_message("C1", "100.000000", "original"));
        assert_eq!(log.apply(changed("C1", "100.000000", "edited")), Outcome::Edited);
        let msg = log.get(&ChannelId::new("C1"), ts("100.000000")).unwrap();
        assert_eq!(msg.text, "edited");
        assert!(msg.edited);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn delete_removes_the_target() {
        let mut log = MessageLog::new();
        log.apply(new_message("C1", "100.000000", "gone soon"));
        assert_eq!(log.apply(deleted("C1", "100.000000")), Outcome::Deleted);
        assert!(log.is_empty());
    }

    #[test]
    fn stale_edit_and_delete_are_no_ops() {
        let mut log = MessageLog::new();
        assert_eq!(log.apply(changed("C1", "999.000001", "ghost")), Outcome::Stale);
        assert_eq!(log.apply(deleted("C1", "999.000001")), Outcome::Stale);
        assert!(log.is_empty());
    }

    #[test]
    fn identity_is_disambiguated_by_channel() {
        let mut log = MessageLog::new();
        log.apply(new_message("C1", "100.000000", "in c1"));
        log.apply(new_message("C2", "100.000000", "in c2"));
        assert_eq!(log.len(), 2);

        // Deleting in C2 must not touch the C1 entry.
        log.apply(deleted("C2", "100.000000"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].text, "in c1");
    }

    #[test]
    fn reserved_transitions_leave_the_log_unchanged() {
        use crate::types::{MessageReplied, ReactionEvent};
        let mut log = MessageLog::new();
        log.apply(new_message("C1", "100.000000", "root"));

        let reply = RawEvent::MessageReplied(MessageReplied {
            channel_id: ChannelId::new("C1"),
            team_id: TeamId::new("T1"),
            timestamp: ts("101.000000"),
            parent_timestamp: ts("100.000000"),
        });
        assert_eq!(log.apply(reply), Outcome::Reserved);

        let reaction = RawEvent::ReactionAdded(ReactionEvent {
            name: "tada".to_string(),
            channel_id: ChannelId::new("C1"),
            team_id: TeamId::new("T1"),
            timestamp: ts("100.000000"),
        });
        assert_eq!(log.apply(reaction), Outcome::Reserved);
        assert_eq!(log.len(), 1);
        assert!(log.messages()[0].reactions.is_empty());
    }

    #[test]
    fn reaction_for_absent_target_does_not_corrupt() {
        use crate::types::ReactionEvent;
        let mut log = MessageLog::new();
        let reaction = RawEvent::ReactionRemoved(ReactionEvent {
            name: "tada".to_string(),
            channel_id: ChannelId::new("C1"),
            team_id: TeamId::new("T1"),
            timestamp: ts("404.000000"),
        });
        assert_eq!(log.apply(reaction), Outcome::Reserved);
        assert!(log.is_empty());
    }

    #[test]
    fn ingest_drops_malformed_without_error() {
        let mut log = MessageLog::new();
        assert_eq!(log.ingest("not json at all", TeamId::new("T1")), None);
        assert_eq!(
            log.ingest(
                r#"{"subtype":"message_changed","channel":"C1","ts":"1.000000"}"#,
                TeamId::new("T1")
            ),
            None
        );
        assert!(log.is_empty());
    }

    #[test]
    fn ingest_drops_overflow_sized_timestamps() {
        let mut log = MessageLog::new();
        assert_eq!(
            log.ingest(
                r#"{"channel":"C1","text":"hi","ts":"10000000000000.000000"}"#,
                TeamId::new("T1")
            ),
            None
        );
        assert!(log.is_empty());
    }

    #[test]
    fn logger_observes_outcomes_and_drops() {
        use std::sync::Mutex;

        #[derive(Default)]
        struct Recording {
            outcomes: Mutex<Vec<Outcome>>,
            drops: Mutex<Vec<String>>,
        }

        impl EventLogger for Recording {
            fn log_outcome(&self, _event: &RawEvent, outcome: Outcome) {
                self.outcomes.lock().unwrap().push(outcome);
            }
            fn log_drop(&self, _error: &Error, raw: &str) {
                self.drops.lock().unwrap().push(raw.to_string());
            }
        }

        let recording = Arc::new(Recording::default());
        let mut log = MessageLog::with_logger(recording.clone());
        log.apply(new_message("C1", "100.000000", "hi"));
        log.apply(new_message("C1", "100.000000", "hi"));
        let _ = log.ingest("garbage", TeamId::new("T1"));

        assert_eq!(
            *recording.outcomes.lock().unwrap(),
            vec![Outcome::Inserted, Outcome::Duplicate]
        );
        assert_eq!(*recording.drops.lock().unwrap(), vec!["garbage".to_string()]);
    }

    #[test]
    fn ingest_applies_well_formed_events() {
        let mut log = MessageLog::new();
        assert_eq!(
            log.ingest(
                r#"{"channel":"C1","text":"hello","ts":"100.000000","user":"U1"}"#,
                TeamId::new("T1")
            ),
            Some(Outcome::Inserted)
        );
        assert_eq!(log.len(), 1);
    }
}
