//! The composable text-parsing pipeline.
//!
//! Raw platform markup becomes display text by flowing through an
//! ordered sequence of single-responsibility transformers. Order is
//! part of the contract: stages consume the prior stage's output, so
//! callers must supply parsers in dependency order. The canonical
//! pipeline runs newline normalization before emoji substitution
//! because an emoji token split by a stray carriage return only
//! reassembles into a matchable token after normalization.
//!
//! Every stage is pure and total: unresolvable references pass through
//! unchanged, and no stage ever fails or drops a message.

mod emoji;
mod link;
mod newline;

pub use emoji::EmojiParser;
pub use link::LinkParser;
pub use newline::NewLineParser;

use std::sync::Arc;

use crate::data_store::DataStore;
use crate::emoji::EmojiCatalog;
use crate::observability;

/// A single text transformation.
///
/// Implementations must be pure: no side effects, no mutation of the
/// input or the data store, identical output for identical input.
pub trait TextParser: Send + Sync {
    /// Transforms `text`, resolving references against `store`.
    fn parse(&self, text: &str, store: &dyn DataStore) -> String;
}

/// An ordered pipeline of [`TextParser`]s.
///
/// Applies its parsers strictly in the order supplied at construction,
/// each stage consuming the previous stage's output. Itself a
/// `TextParser`, so pipelines nest.
pub struct ComposedParser {
    parsers: Vec<Box<dyn TextParser>>,
}

impl ComposedParser {
    /// Creates a pipeline from parsers in dependency order.
    pub fn new(parsers: Vec<Box<dyn TextParser>>) -> Self {
        ComposedParser { parsers }
    }

    /// The canonical display pipeline for one session: links, then
    /// newline normalization, then that session's emoji.
    pub fn for_session(catalog: Arc<EmojiCatalog>) -> Self {
        ComposedParser::new(vec![
            Box::new(LinkParser::new()),
            Box::new(NewLineParser),
            Box::new(EmojiParser::new(catalog)),
        ])
    }
}

impl TextParser for ComposedParser {
    fn parse(&self, text: &str, store: &dyn DataStore) -> String {
        observability::PARSER_PASSES.click();
        let mut text = text.to_string();
        for parser in &self.parsers {
            text = parser.parse(&text, store);
        }
        text
    }
}
