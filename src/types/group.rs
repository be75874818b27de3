use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, UserId};

/// A private group record from the session's directory.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Group {
    /// Platform identifier.
    pub id: ChannelId,
    /// Group name.
    pub name: String,
    /// Members, as user ids.
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Whether the group has been archived.
    #[serde(default)]
    pub is_archived: bool,
    /// Whether this record is a group.
    #[serde(default)]
    pub is_group: bool,
    /// Whether this group is a multi-party DM.
    #[serde(default)]
    pub is_mpim: bool,
    /// Whether the group is open in the client.
    #[serde(default)]
    pub is_open: bool,
}
