use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, UserId};

/// A direct-message conversation record from the session's directory.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Dm {
    /// Platform identifier.
    pub id: ChannelId,
    /// The counterpart user.
    pub user: UserId,
    /// Whether this record is a DM.
    #[serde(default)]
    pub is_im: bool,
    /// Whether the conversation is open in the client.
    #[serde(default)]
    pub is_open: bool,
}
