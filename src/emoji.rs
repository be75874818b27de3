//! Session-scoped emoji catalog.
//!
//! Each session fetches its team's custom emoji list once at startup and
//! merges it over a small builtin table of standard glyphs. Custom
//! entries may alias other entries (`"alias:thumbsup"`), so resolution
//! chases aliases to a bounded depth.

use std::collections::HashMap;

/// How many alias hops to follow before giving up.
///
/// Platform emoji lists have been observed with alias cycles; resolution
/// must terminate on them.
const MAX_ALIAS_DEPTH: usize = 8;

const ALIAS_PREFIX: &str = "alias:";

/// Standard emoji every team has, name to glyph.
const BUILTINS: &[(&str, &str)] = &[
    ("smile", "\u{1f604}"),
    ("joy", "\u{1f602}"),
    ("heart", "\u{2764}\u{fe0f}"),
    ("thumbsup", "\u{1f44d}"),
    ("+1", "\u{1f44d}"),
    ("thumbsdown", "\u{1f44e}"),
    ("-1", "\u{1f44e}"),
    ("tada", "\u{1f389}"),
    ("wave", "\u{1f44b}"),
    ("eyes", "\u{1f440}"),
    ("fire", "\u{1f525}"),
    ("rocket", "\u{1f680}"),
    ("thinking_face", "\u{1f914}"),
    ("white_check_mark", "\u{2705}"),
    ("x", "\u{274c}"),
];

/// A mapping from emoji names to their rendered form.
///
/// The rendered form is either a glyph (builtin emoji) or an image URL
/// (team custom emoji); the engine substitutes it verbatim.
#[derive(Clone, Debug, Default)]
pub struct EmojiCatalog {
    entries: HashMap<String, String>,
}

impl EmojiCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        EmojiCatalog::default()
    }

    /// Creates a catalog holding only the standard builtin glyphs.
    pub fn with_builtins() -> Self {
        let mut catalog = EmojiCatalog::new();
        for (name, glyph) in BUILTINS {
            catalog.entries.insert((*name).to_string(), (*glyph).to_string());
        }
        catalog
    }

    /// Merges a team's custom emoji list (as returned by the platform's
    /// emoji listing) over this catalog. Custom entries shadow builtins
    /// of the same name.
    pub fn extend(&mut self, custom: HashMap<String, String>) {
        self.entries.extend(custom);
    }

    /// Adds or replaces a single entry.
    pub fn insert(&mut self, name: impl Into<String>, rendering: impl Into<String>) {
        self.entries.insert(name.into(), rendering.into());
    }

    /// Resolves an emoji name to its rendered form, chasing aliases.
    ///
    /// Returns `None` for unknown names and unresolvable alias chains;
    /// the caller leaves the original token unchanged.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let mut current = name;
        for _ in 0..MAX_ALIAS_DEPTH {
            let rendering = self.entries.get(current)?;
            match rendering.strip_prefix(ALIAS_PREFIX) {
                Some(target) => current = target,
                None => return Some(rendering),
            }
        }
        None
    }

    /// Returns all names starting with `prefix`, sorted, for completion.
    pub fn candidates(&self, prefix: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .keys()
            .filter(|name| name.starts_with(prefix))
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// The number of entries in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_resolve() {
        let catalog = EmojiCatalog::with_builtins();
        assert_eq!(catalog.resolve("smile"), Some("\u{1f604}"));
        assert_eq!(catalog.resolve("+1"), Some("\u{1f44d}"));
        assert_eq!(catalog.resolve("does_not_exist"), None);
    }

    #[test]
    fn custom_entries_shadow_builtins() {
        let mut catalog = EmojiCatalog::with_builtins();
        let mut custom = HashMap::new();
        custom.insert(
            "smile".to_string(),
            "https://emoji.example.com/smile.png".to_string(),
        );
        catalog.extend(custom);
        assert_eq!(
            catalog.resolve("smile"),
            Some("https://emoji.example.com/smile.png")
        );
    }

    #[test]
    fn aliases_chase_to_target() {
        let mut catalog = EmojiCatalog::with_builtins();
        catalog.insert("yes", "alias:thumbsup");
        assert_eq!(catalog.resolve("yes"), Some("\u{1f44d}"));
    }

    #[test]
    fn alias_cycles_terminate() {
        let mut catalog = EmojiCatalog::new();
        catalog.insert("a", "alias:b");
        catalog.insert("b", "alias:a");
        assert_eq!(catalog.resolve("a"), None);
    }

    #[test]
    fn candidates_are_sorted_prefix_matches() {
        let catalog = EmojiCatalog::with_builtins();
        let hits = catalog.candidates("thumbs");
        assert_eq!(hits, vec!["thumbsdown", "thumbsup"]);
    }
}
