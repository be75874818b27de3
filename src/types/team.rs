use serde::{Deserialize, Serialize};

use crate::types::TeamId;

/// A team/workspace record from the session's directory.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Team {
    /// Platform identifier.
    pub id: TeamId,
    /// Human-readable team name.
    pub name: String,
    /// Subdomain the team lives under.
    #[serde(default)]
    pub domain: String,
}
