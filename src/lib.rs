// Public modules
pub mod aggregator;
pub mod client;
pub mod data_store;
pub mod display;
pub mod emoji;
pub mod error;
pub mod event_logger;
pub mod log;
pub mod observability;
pub mod parser;
pub mod session;
pub mod submit;
pub mod types;

// Re-exports
pub use aggregator::{SessionAggregator, ShutdownHandle};
pub use client::{PostMessageAck, SlackClient};
pub use data_store::{DataStore, Directory};
pub use display::{DisplayMessage, ReactionSummary};
pub use emoji::EmojiCatalog;
pub use error::{Error, Result};
pub use event_logger::{EventLogger, NoopEventLogger};
pub use log::{MessageLog, Outcome};
pub use parser::{ComposedParser, EmojiParser, LinkParser, NewLineParser, TextParser};
pub use session::{ChatSession, EventStream};
pub use submit::{DraftSlot, SubmissionContext};
pub use types::*;
