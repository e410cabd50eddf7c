//! # Link Detection Module
//!
//! Splits free text (recipe descriptions usually carry the source URL) into
//! plain and link spans, so links can be rendered as such.
//!
//! Recognised links start with `http://`, `https://` or `www.` and run up to
//! the next whitespace; trailing sentence punctuation is left outside the link.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

const LINK_PATTERN: &str = r#"(?i)\b(?:https?://|www\.)[^\s<>"]+"#;

lazy_static! {
    static ref LINK_REGEX: Regex = Regex::new(LINK_PATTERN).expect("Link pattern should be valid");
}

/// A span of text, either plain or a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSpan {
    Plain(String),
    Link { text: String, href: String },
}

impl TextSpan {
    pub fn text(&self) -> &str {
        match self {
            TextSpan::Plain(text) => text,
            TextSpan::Link { text, .. } => text,
        }
    }
}

/// Drop trailing punctuation from a raw link match
///
/// A closing parenthesis stays when it balances one inside the link, as in
/// `https://en.wikipedia.org/wiki/Roux_(cooking)`.
fn trim_link_end(link: &str) -> &str {
    let mut link = link;
    loop {
        match link.chars().last() {
            Some('.' | ',' | ';' | ':' | '!' | '?') => {}
            Some(')') if link.matches('(').count() < link.matches(')').count() => {}
            _ => return link,
        }
        link = &link[..link.len() - 1];
    }
}

/// Split `text` into plain and link spans, in order
///
/// Concatenating the span texts reproduces `text`. Links starting with `www.`
/// get an `https://` href.
///
/// # Examples
///
/// ```rust
/// use recipes::linkify::{link_segments, TextSpan};
///
/// let spans = link_segments("From https://example.com/soup.");
/// assert_eq!(spans[1].text(), "https://example.com/soup");
/// assert_eq!(spans[2], TextSpan::Plain(".".to_string()));
/// ```
pub fn link_segments(text: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for found in LINK_REGEX.find_iter(text) {
        let link = trim_link_end(found.as_str());
        let end = found.start() + link.len();

        if found.start() > last {
            spans.push(TextSpan::Plain(text[last..found.start()].to_string()));
        }

        let href = if link.to_lowercase().starts_with("www.") {
            format!("https://{link}")
        } else {
            link.to_string()
        };
        trace!("Found link '{}'", link);
        spans.push(TextSpan::Link {
            text: link.to_string(),
            href,
        });
        last = end;
    }

    if last < text.len() || spans.is_empty() {
        spans.push(TextSpan::Plain(text[last..].to_string()));
    }
    spans
}

/// Check whether `text` contains a link
pub fn has_links(text: &str) -> bool {
    LINK_REGEX.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(spans: &[TextSpan]) -> String {
        spans.iter().map(TextSpan::text).collect()
    }

    #[test]
    fn test_plain_text_single_span() {
        assert_eq!(
            link_segments("Grandma's recipe"),
            vec![TextSpan::Plain("Grandma's recipe".to_string())]
        );
        assert_eq!(link_segments(""), vec![TextSpan::Plain(String::new())]);
        assert!(!has_links("no links here"));
    }

    #[test]
    fn test_links_and_punctuation() {
        let text = "See www.example.com/chili, or https://cook.example.org/a?b=1.";
        let spans = link_segments(text);

        assert_eq!(
            spans,
            vec![
                TextSpan::Plain("See ".to_string()),
                TextSpan::Link {
                    text: "www.example.com/chili".to_string(),
                    href: "https://www.example.com/chili".to_string(),
                },
                TextSpan::Plain(", or ".to_string()),
                TextSpan::Link {
                    text: "https://cook.example.org/a?b=1".to_string(),
                    href: "https://cook.example.org/a?b=1".to_string(),
                },
                TextSpan::Plain(".".to_string()),
            ]
        );
        assert_eq!(joined(&spans), text);
    }

    #[test]
    fn test_parentheses_inside_link_kept() {
        let text = "Start with a roux (https://en.wikipedia.org/wiki/Roux_(cooking)).";
        let spans = link_segments(text);

        assert_eq!(spans[1].text(), "https://en.wikipedia.org/wiki/Roux_(cooking)");
        assert_eq!(spans[2], TextSpan::Plain(").".to_string()));
        assert_eq!(joined(&spans), text);

        // unbalanced closing parenthesis belongs to the sentence
        let spans = link_segments("(see www.example.com)");
        assert_eq!(spans[1].text(), "www.example.com");
        assert_eq!(spans[2], TextSpan::Plain(")".to_string()));
    }

    #[test]
    fn test_link_at_start() {
        let spans = link_segments("http://a.example is the source");
        assert_eq!(spans[0].text(), "http://a.example");
        assert_eq!(joined(&spans), "http://a.example is the source");
    }
}
