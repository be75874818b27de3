// Public modules
pub mod attachment;
pub mod channel;
pub mod dm;
pub mod group;
pub mod id;
pub mod raw_event;
pub mod reaction;
pub mod team;
pub mod timestamp;
pub mod user;

// Re-exports
pub use attachment::Attachment;
pub use channel::Channel;
pub use dm::Dm;
pub use group::Group;
pub use id::{ChannelId, TeamId, UserId};
pub use raw_event::{
    MessageChanged, MessageDeleted, MessageEdit, MessageReplied, NestedMessage, NewMessage,
    RawEvent, RawMessage,
};
pub use reaction::{RawReaction, ReactionEvent, ReactionItem};
pub use team::Team;
pub use timestamp::Timestamp;
pub use user::User;
