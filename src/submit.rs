//! The outbound submit flow.
//!
//! A [`DraftSlot`] is the single mutable slot holding the in-progress,
//! not-yet-sent outgoing message's routing target. Starting a new
//! compose or reply silently discards a prior unsent draft; that is
//! specified behavior, and [`DraftSlot::has_open_draft`] exists so
//! callers can warn before discarding.

use crate::client::{PostMessageAck, SlackClient};
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{ChannelId, TeamId, Timestamp};

/// Where an outgoing message goes.
///
/// `Closed` is an explicit state, not a null: "no active draft" is
/// testable and impossible to confuse with a half-built target.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionContext {
    /// No draft is open.
    Closed,
    /// Composing a new top-level message.
    Compose {
        /// Target channel.
        channel_id: ChannelId,
        /// Team that owns the channel.
        team_id: TeamId,
        /// Channel name, carried for display alongside the input.
        channel_name: String,
    },
    /// Composing a threaded reply.
    Reply {
        /// Target channel.
        channel_id: ChannelId,
        /// Team that owns the channel.
        team_id: TeamId,
        /// Channel name, carried for display alongside the input.
        channel_name: String,
        /// Thread root the reply attaches to.
        parent_timestamp: Timestamp,
    },
}

impl SubmissionContext {
    /// Returns true unless the context is `Closed`.
    pub fn is_open(&self) -> bool {
        !matches!(self, SubmissionContext::Closed)
    }
}

/// The single compose/reply slot, last writer wins.
#[derive(Clone, Debug)]
pub struct DraftSlot {
    context: SubmissionContext,
}

impl DraftSlot {
    /// Creates a closed slot.
    pub fn new() -> Self {
        DraftSlot {
            context: SubmissionContext::Closed,
        }
    }

    /// Opens a compose draft, replacing any prior draft.
    pub fn begin_compose(
        &mut self,
        channel_id: ChannelId,
        team_id: TeamId,
        channel_name: impl Into<String>,
    ) {
        self.replace(SubmissionContext::Compose {
            channel_id,
            team_id,
            channel_name: channel_name.into(),
        });
    }

    /// Opens a reply draft, replacing any prior draft.
    pub fn begin_reply(
        &mut self,
        channel_id: ChannelId,
        team_id: TeamId,
        channel_name: impl Into<String>,
        parent_timestamp: Timestamp,
    ) {
        self.replace(SubmissionContext::Reply {
            channel_id,
            team_id,
            channel_name: channel_name.into(),
            parent_timestamp,
        });
    }

    /// Returns true if a draft is open; check before `begin_*` to warn
    /// the user about discarding.
    pub fn has_open_draft(&self) -> bool {
        self.context.is_open()
    }

    /// The current routing target.
    pub fn context(&self) -> &SubmissionContext {
        &self.context
    }

    /// Closes the slot without sending.
    pub fn cancel(&mut self) {
        self.context = SubmissionContext::Closed;
    }

    /// Sends `text` to the open draft's target.
    ///
    /// On success the slot closes. On failure it stays open so the
    /// caller may retry or surface the error; the returned error wraps
    /// the transport/platform cause.
    pub async fn submit(&mut self, client: &SlackClient, text: &str) -> Result<PostMessageAck> {
        observability::SUBMISSIONS.click();
        let (channel_id, thread_ts) = match &self.context {
            SubmissionContext::Closed => {
                return Err(Error::submission("no open draft", None));
            }
            SubmissionContext::Compose { channel_id, .. } => (channel_id.clone(), None),
            SubmissionContext::Reply {
                channel_id,
                parent_timestamp,
                ..
            } => (channel_id.clone(), Some(*parent_timestamp)),
        };

        match client.post_message(&channel_id, text, thread_ts).await {
            Ok(ack) => {
                self.context = SubmissionContext::Closed;
                Ok(ack)
            }
            Err(err) => {
                observability::SUBMISSION_FAILURES.click();
                Err(Error::submission("post_message failed", Some(err)))
            }
        }
    }

    fn replace(&mut self, context: SubmissionContext) {
        if self.context.is_open() {
            observability::DRAFTS_DISCARDED.click();
        }
        self.context = context;
    }
}

impl Default for DraftSlot {
    fn default() -> Self {
        DraftSlot::new()
    }
}
