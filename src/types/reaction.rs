use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, TeamId, Timestamp};

/// A reaction being added to or removed from a message.
///
/// The timestamp identifies the reacted-to message, not the reaction
/// event itself.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReactionEvent {
    /// Emoji name, without colons.
    pub name: String,
    /// Channel of the target message.
    pub channel_id: ChannelId,
    /// Team the event originated from.
    pub team_id: TeamId,
    /// Timestamp of the target message.
    pub timestamp: Timestamp,
}

/// Wire form of a reaction event as delivered on the real-time stream.
///
/// The platform nests the target under `item`.
#[derive(Clone, Debug, Deserialize)]
pub struct RawReaction {
    /// Emoji name, without colons.
    pub reaction: String,
    /// The reacted-to item.
    pub item: ReactionItem,
}

/// The target of a reaction, always a message for this engine.
#[derive(Clone, Debug, Deserialize)]
pub struct ReactionItem {
    /// Channel of the target message.
    pub channel: ChannelId,
    /// Timestamp of the target message.
    pub ts: Timestamp,
}

impl RawReaction {
    /// Flattens the wire form into a [`ReactionEvent`] for the team the
    /// delivering session is connected to.
    pub fn into_event(self, team_id: TeamId) -> ReactionEvent {
        ReactionEvent {
            name: self.reaction,
            channel_id: self.item.channel,
            team_id,
            timestamp: self.item.ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_reaction_flattens() {
        let json = r#"{"reaction":"thumbsup","item":{"type":"message","channel":"C1","ts":"100.000001"}}"#;
        let raw: RawReaction = serde_json::from_str(json).unwrap();
        let event = raw.into_event(TeamId::new("T1"));
        assert_eq!(event.name, "thumbsup");
        assert_eq!(event.channel_id, ChannelId::new("C1"));
        assert_eq!(event.timestamp, Timestamp::parse("100.000001").unwrap());
    }
}
