use std::sync::LazyLock;

use regex::Regex;

use crate::data_store::DataStore;
use crate::observability;
use crate::parser::TextParser;
use crate::types::{ChannelId, UserId};

static MARKUP_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^<>]+)>").expect("markup span regex"));

/// Rewrites platform link markup into safe, readable text.
///
/// The platform wraps every reference in angle brackets: URLs as
/// `<url>` or `<url|label>`, user mentions as `<@U...>`, channel
/// references as `<#C...|name>`, and broadcast keywords as
/// `<!everyone>`. User and channel references resolve through the
/// session's [`DataStore`]; anything unresolvable keeps its raw
/// identifier rather than disappearing. HTML entities the platform
/// escapes (`&lt;`, `&gt;`, `&amp;`) are unescaped last.
pub struct LinkParser;

impl LinkParser {
    /// Creates a link parser.
    pub fn new() -> Self {
        LinkParser
    }

    fn rewrite_span(body: &str, store: &dyn DataStore) -> String {
        if let Some(mention) = body.strip_prefix('@') {
            let (id, label) = split_label(mention);
            let id = UserId::new(id);
            return match store.user_by_id(&id) {
                Some(user) => format!("@{}", user.name),
                None => {
                    observability::UNRESOLVED_REFERENCES.click();
                    match label {
                        Some(label) => format!("@{label}"),
                        None => format!("@{id}"),
                    }
                }
            };
        }
        if let Some(channel) = body.strip_prefix('#') {
            let (id, label) = split_label(channel);
            if let Some(label) = label {
                return format!("#{label}");
            }
            let id = ChannelId::new(id);
            return match store.channel_by_id(&id) {
                Some(channel) => format!("#{}", channel.name),
                None => {
                    observability::UNRESOLVED_REFERENCES.click();
                    format!("#{id}")
                }
            };
        }
        if let Some(keyword) = body.strip_prefix('!') {
            let (keyword, label) = split_label(keyword);
            return format!("@{}", label.unwrap_or(keyword));
        }
        // Everything else is a link.
        let (url, label) = split_label(body);
        match label {
            Some(label) if label != url => format!("{label} ({url})"),
            _ => url.to_string(),
        }
    }
}

impl Default for LinkParser {
    fn default() -> Self {
        LinkParser::new()
    }
}

impl TextParser for LinkParser {
    fn parse(&self, text: &str, store: &dyn DataStore) -> String {
        let rewritten = MARKUP_SPAN.replace_all(text, |caps: &regex::Captures<'_>| {
            LinkParser::rewrite_span(&caps[1], store)
        });
        rewritten
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }
}

/// Splits `body|label` markup into its parts.
fn split_label(body: &str) -> (&str, Option<&str>) {
    match body.split_once('|') {
        Some((head, label)) => (head, Some(label)),
        None => (body, None),
    }
}
