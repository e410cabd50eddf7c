//! # Step Segmentation Module
//!
//! Splits a step's text into alternating plain-text and keyword segments so the
//! presentation layer can render keywords as hover targets.
//!
//! Splitting is a naive recursive string split: the text is split on the first
//! keyword, every piece is split on the second keyword, and so on. Keywords are
//! processed longest first so that "sea salt" is cut out before "salt" gets a
//! chance to split it. Every occurrence of a keyword becomes a segment, not only
//! the first one.
//!
//! ```rust
//! use recipes::keyword_matcher::KeywordIndex;
//! use recipes::recipe_model::Ingredient;
//! use recipes::segmentation::resolve_matches;
//!
//! let ingredients = vec![
//!     Ingredient::new("salt").with_keyword("salt"),
//!     Ingredient::new("sea salt").with_keyword("sea salt"),
//! ];
//! let index = KeywordIndex::from_ingredients(&ingredients);
//! let segments = resolve_matches("Add sea salt to taste", &index);
//!
//! assert_eq!(segments.len(), 3);
//! assert_eq!(segments[1].text, "sea salt");
//! assert_eq!(segments[1].owner, Some(1));
//! ```

use log::{debug, trace};
use std::collections::HashSet;

use crate::keyword_matcher::KeywordIndex;

/// A piece of step text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The text of the piece, exactly as in the step
    pub text: String,
    /// Whether the piece is a keyword
    pub is_keyword: bool,
    /// Ingredient owning the keyword; `None` for plain text or unknown keywords
    pub owner: Option<usize>,
    /// Whether the keyword is the authoritative match in this step
    pub authoritative: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_keyword: false,
            owner: None,
            authoritative: false,
        }
    }
}

/// Segment `step_text` on the keywords of `index`
///
/// Concatenating the returned segment texts always reproduces `step_text`.
/// Empty text or an empty index yields a single plain segment.
pub fn resolve_matches(step_text: &str, index: &KeywordIndex) -> Vec<Segment> {
    if step_text.is_empty() || index.is_empty() {
        return vec![Segment::plain(step_text)];
    }

    let keywords = index.longest_first();
    let mut pieces = Vec::new();
    split_recursive(step_text, &keywords, &mut pieces);

    let authoritative: HashSet<String> = index
        .authoritative_matches(step_text)
        .into_iter()
        .map(|m| m.keyword)
        .collect();

    let segments: Vec<Segment> = pieces
        .into_iter()
        .map(|(text, is_keyword)| {
            if !is_keyword {
                return Segment::plain(text);
            }
            Segment {
                text: text.to_string(),
                is_keyword: true,
                owner: index.owner_of(text),
                authoritative: authoritative.contains(text),
            }
        })
        .collect();

    debug!(
        "Segmented step into {} pieces ({} keywords)",
        segments.len(),
        segments.iter().filter(|s| s.is_keyword).count()
    );
    segments
}

/// Segment `step_text` on a bare keyword list; no segment has an owner
pub fn resolve_keyword_list<S: AsRef<str>>(step_text: &str, keywords: &[S]) -> Vec<Segment> {
    resolve_matches(step_text, &KeywordIndex::from_keywords(keywords))
}

fn split_recursive<'a>(phrase: &'a str, keywords: &[&'a str], out: &mut Vec<(&'a str, bool)>) {
    let Some((keyword, rest)) = keywords.split_first() else {
        if !phrase.is_empty() {
            out.push((phrase, false));
        }
        return;
    };

    let mut parts = phrase.split(*keyword);
    if let Some(first) = parts.next() {
        split_recursive(first, rest, out);
    }
    for part in parts {
        trace!("Split out keyword '{}'", keyword);
        out.push((*keyword, true));
        split_recursive(part, rest, out);
    }
}

/// Join segment texts back together
pub fn concat_segments(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::Ingredient;

    fn texts(segments: &[Segment]) -> Vec<(&str, bool)> {
        segments.iter().map(|s| (s.text.as_str(), s.is_keyword)).collect()
    }

    #[test]
    fn test_empty_inputs_return_single_plain_segment() {
        let index = KeywordIndex::from_keywords(&["oil"]);
        assert_eq!(texts(&resolve_matches("", &index)), vec![("", false)]);

        let empty = KeywordIndex::default();
        assert_eq!(
            texts(&resolve_matches("Heat the pan", &empty)),
            vec![("Heat the pan", false)]
        );
    }

    #[test]
    fn test_longest_keyword_split_first() {
        let segments = resolve_keyword_list("Add sea salt, then salt again", &["salt", "sea salt"]);
        assert_eq!(
            texts(&segments),
            vec![
                ("Add ", false),
                ("sea salt", true),
                (", then ", false),
                ("salt", true),
                (" again", false),
            ]
        );
    }

    #[test]
    fn test_every_occurrence_is_split() {
        let segments = resolve_keyword_list("oil and oil", &["oil"]);
        assert_eq!(
            texts(&segments),
            vec![("oil", true), (" and ", false), ("oil", true)]
        );
    }

    #[test]
    fn test_owner_and_authority() {
        let ingredients = vec![
            Ingredient::new("1 tsp salt").with_keyword("salt"),
            Ingredient::new("a pinch of sea salt").with_keyword("sea salt"),
        ];
        let index = KeywordIndex::from_ingredients(&ingredients);
        let segments = resolve_matches("Salt is fine; sea salt is better; salt", &index);

        let keywords: Vec<(&str, Option<usize>, bool)> = segments
            .iter()
            .filter(|s| s.is_keyword)
            .map(|s| (s.text.as_str(), s.owner, s.authoritative))
            .collect();

        // first "salt" occurrence lies inside "sea salt", so "salt" is suppressed
        assert_eq!(
            keywords,
            vec![("sea salt", Some(1), true), ("salt", Some(0), false)]
        );
    }

    #[test]
    fn test_round_trip() {
        let text = "Whisk eggs with the egg yolk, then fold in the egg whites";
        let segments = resolve_keyword_list(text, &["egg", "eggs", "egg yolk"]);
        assert_eq!(concat_segments(&segments), text);
    }
}
