use serde::{Deserialize, Serialize};

use crate::types::{TeamId, UserId};

/// A user record from the session's directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Platform identifier.
    pub id: UserId,
    /// Display name, used when rewriting `<@U...>` mentions.
    pub name: String,
    /// The team this user belongs to.
    pub team_id: TeamId,
}

impl User {
    /// Creates a user record.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, team_id: impl Into<TeamId>) -> Self {
        User {
            id: id.into(),
            name: name.into(),
            team_id: team_id.into(),
        }
    }
}
