//! The per-team session collaborator contract.

use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;

use crate::data_store::DataStore;
use crate::emoji::EmojiCatalog;
use crate::error::Result;
use crate::types::{RawEvent, TeamId};

/// An unbounded, real-time stream of classified events.
///
/// Non-restartable: once taken from a session it yields events for as
/// long as the session is active and then ends.
pub type EventStream = Pin<Box<dyn Stream<Item = RawEvent> + Send>>;

/// One authenticated real-time connection to a single team.
///
/// The engine does not manage connections itself; implementations own
/// connect/reconnect/authentication and deliver already-classified
/// events. A session also owns the team's read-only [`DataStore`] and
/// emoji catalog, which the aggregator uses to build that session's
/// parsing pipeline.
#[async_trait::async_trait]
pub trait ChatSession: Send {
    /// The team this session is connected to.
    fn team_id(&self) -> TeamId;

    /// Begins event delivery.
    async fn start(&mut self) -> Result<()>;

    /// Halts event delivery. Already-applied mutations are not rolled
    /// back, and in-flight events may still arrive on taken streams.
    async fn stop(&mut self) -> Result<()>;

    /// Takes the message event stream (new/changed/deleted/replied).
    fn messages(&mut self) -> EventStream;

    /// Takes the reaction-added event stream.
    fn reaction_added(&mut self) -> EventStream;

    /// Takes the reaction-removed event stream.
    fn reaction_removed(&mut self) -> EventStream;

    /// The team's directory, shared read-only.
    fn data_store(&self) -> Arc<dyn DataStore>;

    /// The team's emoji catalog, fetched at connect time.
    fn emoji_catalog(&self) -> Arc<EmojiCatalog>;
}
