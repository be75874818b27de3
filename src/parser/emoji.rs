use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::data_store::DataStore;
use crate::emoji::EmojiCatalog;
use crate::observability;
use crate::parser::TextParser;

static EMOJI_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z0-9_+'-]+):").expect("emoji token regex"));

/// Substitutes `:name:` tokens with their rendering from a session's
/// emoji catalog.
///
/// Session-scoped: each session has its own custom emoji, so one
/// `EmojiParser` is constructed per session and never shared across
/// them. Unknown names pass through unchanged.
pub struct EmojiParser {
    catalog: Arc<EmojiCatalog>,
}

impl EmojiParser {
    /// Creates a parser over one session's catalog.
    pub fn new(catalog: Arc<EmojiCatalog>) -> Self {
        EmojiParser { catalog }
    }
}

impl TextParser for EmojiParser {
    fn parse(&self, text: &str, _store: &dyn DataStore) -> String {
        EMOJI_TOKEN
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let name = &caps[1];
                match self.catalog.resolve(name) {
                    Some(rendering) => rendering.to_string(),
                    None => {
                        observability::UNRESOLVED_REFERENCES.click();
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_store::Directory;

    fn parser() -> EmojiParser {
        EmojiParser::new(Arc::new(EmojiCatalog::with_builtins()))
    }

    #[test]
    fn known_tokens_are_substituted() {
        let store = Directory::new();
        assert_eq!(
            parser().parse("nice work :tada:", &store),
            "nice work \u{1f389}"
        );
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let store = Directory::new();
        assert_eq!(
            parser().parse("what is :floofycat:?", &store),
            "what is :floofycat:?"
        );
    }

    #[test]
    fn adjacent_tokens_each_resolve() {
        let store = Directory::new();
        assert_eq!(
            parser().parse(":smile::tada:", &store),
            "\u{1f604}\u{1f389}"
        );
    }

    #[test]
    fn times_are_left_alone() {
        let store = Directory::new();
        assert_eq!(parser().parse("12:30: lunch", &store), "12:30: lunch");
    }
}
