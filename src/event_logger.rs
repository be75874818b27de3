//! Logging trait for reconciliation observability.
//!
//! This module provides the [`EventLogger`] trait that allows users to
//! capture every event flowing into the [`MessageLog`](crate::MessageLog),
//! the outcome each one produced, and the malformed events that were
//! dropped. This is the engine's observability channel: bad input is
//! never an error to the caller, but it is always visible here.

use crate::error::Error;
use crate::log::Outcome;
use crate::types::RawEvent;

/// A trait for observing reconciliation activity.
///
/// All methods have no-op defaults so implementors can hook only what
/// they care about.
///
/// # Example
///
/// ```rust,ignore
/// use slackline::{EventLogger, Outcome, RawEvent};
///
/// struct StderrLogger;
///
/// impl EventLogger for StderrLogger {
///     fn log_outcome(&self, event: &RawEvent, outcome: Outcome) {
///         eprintln!("{} -> {:?}", event.kind(), outcome);
///     }
/// }
/// ```
pub trait EventLogger: Send + Sync {
    /// Called for every classified event before it is applied.
    fn log_event(&self, _event: &RawEvent) {}

    /// Called with the outcome each applied event produced.
    fn log_outcome(&self, _event: &RawEvent, _outcome: Outcome) {}

    /// Called when an event is dropped instead of applied.
    ///
    /// `raw` is the offending payload as it arrived, for debugging.
    fn log_drop(&self, _error: &Error, _raw: &str) {}
}

/// The default logger: observes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventLogger;

impl EventLogger for NoopEventLogger {}
