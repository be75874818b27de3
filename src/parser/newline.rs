use crate::data_store::DataStore;
use crate::parser::TextParser;

/// Normalizes raw newline encodings to display-safe line breaks.
///
/// `\r\n` becomes `\n`; a lone `\r` is a soft-wrap artifact some
/// clients emit mid-token and is stripped entirely. Runs before
/// [`EmojiParser`](crate::parser::EmojiParser) in the canonical
/// pipeline so wrapped emoji tokens reassemble before matching.
pub struct NewLineParser;

impl TextParser for NewLineParser {
    fn parse(&self, text: &str, _store: &dyn DataStore) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\r' {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                    out.push('\n');
                }
                // lone \r: dropped
            } else {
                out.push(c);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_store::Directory;

    #[test]
    fn crlf_becomes_lf() {
        let store = Directory::new();
        assert_eq!(NewLineParser.parse("a\r\nb", &store), "a\nb");
    }

    #[test]
    fn lone_cr_is_stripped() {
        let store = Directory::new();
        assert_eq!(NewLineParser.parse("a\rb", &store), "ab");
    }

    #[test]
    fn lf_passes_through() {
        let store = Directory::new();
        assert_eq!(NewLineParser.parse("a\nb\n", &store), "a\nb\n");
    }
}
