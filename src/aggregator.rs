//! Fan-in of session event streams into one message log.
//!
//! The aggregator owns its sessions' lifecycles: all start on
//! activation, all stop on teardown. Each session gets its own parsing
//! pipeline (emoji catalogs are session-scoped), built once at start
//! and discarded at stop. Events are applied to the shared log in
//! delivery order; per-channel ordering from a single session is
//! preserved, but nothing reorders events across sessions.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::{SelectAll, select_all};
use tokio::sync::watch;

use crate::data_store::DataStore;
use crate::display::DisplayMessage;
use crate::error::Result;
use crate::log::MessageLog;
use crate::parser::ComposedParser;
use crate::session::{ChatSession, EventStream};
use crate::types::TeamId;

/// A session's rendering context, built at aggregator start.
struct SessionPipeline {
    parser: ComposedParser,
    store: Arc<dyn DataStore>,
}

/// Signals a running aggregator to wind down.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Requests shutdown. Idempotent.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// The top-level orchestrator: N sessions in, one log out.
pub struct SessionAggregator {
    sessions: Vec<Box<dyn ChatSession>>,
    pipelines: HashMap<TeamId, SessionPipeline>,
    merged: Option<SelectAll<EventStream>>,
    log: MessageLog,
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl SessionAggregator {
    /// Creates an aggregator around an (initially empty) log.
    pub fn new(log: MessageLog) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        SessionAggregator {
            sessions: Vec::new(),
            pipelines: HashMap::new(),
            merged: None,
            log,
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    /// Adds a session before the aggregator starts.
    pub fn add_session(&mut self, session: Box<dyn ChatSession>) {
        self.sessions.push(session);
    }

    /// A handle that stops a running aggregator from elsewhere.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: Arc::clone(&self.shutdown_tx),
        }
    }

    /// Starts every session and builds its pipeline.
    ///
    /// One `ComposedParser` per session, keyed by team: emoji catalogs
    /// are session-scoped, so pipelines are never shared across teams.
    pub async fn start(&mut self) -> Result<()> {
        let mut streams = Vec::with_capacity(self.sessions.len() * 3);
        for session in &mut self.sessions {
            session.start().await?;
            self.pipelines.insert(
                session.team_id(),
                SessionPipeline {
                    parser: ComposedParser::for_session(session.emoji_catalog()),
                    store: session.data_store(),
                },
            );
            streams.push(session.messages());
            streams.push(session.reaction_added());
            streams.push(session.reaction_removed());
        }
        self.merged = Some(select_all(streams));
        Ok(())
    }

    /// Drives the fan-in loop.
    ///
    /// Applies each delivered event to the log until every stream ends
    /// or shutdown is requested. Each application is synchronous: there
    /// is no await point between matching a target and mutating it, so
    /// no event ever observes a half-applied transition.
    pub async fn process_events(&mut self) {
        // Take the stream so applying events can borrow the log.
        let Some(mut merged) = self.merged.take() else {
            return;
        };
        let mut shutdown_rx = self.shutdown_rx.clone();
        loop {
            // Checked at the top so a shutdown requested before the
            // loop started is not missed.
            if *shutdown_rx.borrow() {
                break;
            }
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                event = merged.next() => {
                    match event {
                        Some(event) => {
                            self.log.apply(event);
                        }
                        None => break,
                    }
                }
            }
        }
        self.merged = Some(merged);
    }

    /// Stops every session and discards the pipelines.
    ///
    /// Halts delivery only; applied mutations stay.
    pub async fn stop(&mut self) -> Result<()> {
        self.merged = None;
        for session in &mut self.sessions {
            session.stop().await?;
        }
        self.pipelines.clear();
        Ok(())
    }

    /// Full lifecycle: start, drain events, stop.
    pub async fn run(&mut self) -> Result<()> {
        self.start().await?;
        self.process_events().await;
        self.stop().await
    }

    /// The reconciled log.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// The reconciled log, for direct mutation in tests and tooling.
    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    /// Renders a message's display text through the pipeline of the
    /// session it arrived from.
    ///
    /// Returns `None` when the message's team has no active pipeline
    /// (before [`start`](Self::start) or after [`stop`](Self::stop)).
    pub fn rendered_text(&self, message: &DisplayMessage) -> Option<String> {
        let pipeline = self.pipelines.get(&message.team_id)?;
        Some(message.rendered_text(&pipeline.parser, pipeline.store.as_ref()))
    }
}
