//! Read-only directory lookups for reference resolution.
//!
//! Each session owns a directory mapping user/channel/group/DM
//! identifiers to display metadata. The parsing pipeline borrows it
//! per call and never stores it; nothing in the engine writes to it.

use std::collections::HashMap;

use crate::types::{Channel, ChannelId, Dm, Group, Team, TeamId, User, UserId};

/// Read-only lookup service resolving platform identifiers to display
/// metadata.
///
/// Unknown identifiers resolve to `None`; callers fall back to showing
/// the raw identifier rather than failing.
pub trait DataStore: Send + Sync {
    /// Looks up a user by id.
    fn user_by_id(&self, id: &UserId) -> Option<&User>;

    /// Looks up a user by display name.
    fn user_by_name(&self, name: &str) -> Option<&User>;

    /// Looks up a channel by id.
    fn channel_by_id(&self, id: &ChannelId) -> Option<&Channel>;

    /// Looks up a channel by name.
    fn channel_by_name(&self, name: &str) -> Option<&Channel>;

    /// Looks up a private group by id.
    fn group_by_id(&self, id: &ChannelId) -> Option<&Group>;

    /// Looks up a DM conversation by id.
    fn dm_by_id(&self, id: &ChannelId) -> Option<&Dm>;

    /// Looks up a team by id.
    fn team_by_id(&self, id: &TeamId) -> Option<&Team>;
}

/// An in-memory [`DataStore`], populated once when a session connects.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    users: HashMap<UserId, User>,
    channels: HashMap<ChannelId, Channel>,
    groups: HashMap<ChannelId, Group>,
    dms: HashMap<ChannelId, Dm>,
    teams: HashMap<TeamId, Team>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Directory::default()
    }

    /// Adds a user record.
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Adds a channel record.
    pub fn insert_channel(&mut self, channel: Channel) {
        self.channels.insert(channel.id.clone(), channel);
    }

    /// Adds a private group record.
    pub fn insert_group(&mut self, group: Group) {
        self.groups.insert(group.id.clone(), group);
    }

    /// Adds a DM conversation record.
    pub fn insert_dm(&mut self, dm: Dm) {
        self.dms.insert(dm.id.clone(), dm);
    }

    /// Adds a team record.
    pub fn insert_team(&mut self, team: Team) {
        self.teams.insert(team.id.clone(), team);
    }
}

impl DataStore for Directory {
    fn user_by_id(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    fn user_by_name(&self, name: &str) -> Option<&User> {
        self.users.values().find(|u| u.name == name)
    }

    fn channel_by_id(&self, id: &ChannelId) -> Option<&Channel> {
        self.channels.get(id)
    }

    fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        self.channels.values().find(|c| c.name == name)
    }

    fn group_by_id(&self, id: &ChannelId) -> Option<&Group> {
        self.groups.get(id)
    }

    fn dm_by_id(&self, id: &ChannelId) -> Option<&Dm> {
        self.dms.get(id)
    }

    fn team_by_id(&self, id: &TeamId) -> Option<&Team> {
        self.teams.get(id)
    }
}
