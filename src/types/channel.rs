use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, UserId};

/// A public or private channel record from the session's directory.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    /// Platform identifier.
    pub id: ChannelId,
    /// Channel name without the leading `#`.
    pub name: String,
    /// Members, as user ids.
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Whether the channel has been archived.
    #[serde(default)]
    pub is_archived: bool,
    /// Whether this record is a channel (as opposed to a group or DM).
    #[serde(default)]
    pub is_channel: bool,
    /// Whether the authenticated user is a member.
    #[serde(default)]
    pub is_member: bool,
}

impl Channel {
    /// Creates a channel record with the given id and name.
    pub fn new(id: impl Into<ChannelId>, name: impl Into<String>) -> Self {
        Channel {
            id: id.into(),
            name: name.into(),
            is_channel: true,
            ..Default::default()
        }
    }
}
