//! # Keyword Matcher Module
//!
//! This module links ingredients to the recipe steps that use them. Every
//! ingredient declares keywords (e.g. "onion" for "2 onions, diced") and each
//! keyword is looked up as a plain, case-sensitive substring of the step text.
//!
//! ## Features
//!
//! - First-occurrence lookup: only the first occurrence of a keyword in a step counts
//! - Overlap resolution: when keyword occurrences overlap, the longer keyword wins
//!   ("sea salt" beats "salt" in "Add sea salt")
//! - Deterministic tie-break for equal-length overlaps (see [`TieBreak`])
//! - Owner lookup from keyword back to the declaring ingredient
//!
//! Offsets are byte offsets into the step text; keyword lengths are compared in
//! characters.

use log::{debug, trace};
use std::collections::HashSet;
use std::str::FromStr;

use crate::errors::RecipeError;
use crate::recipe_model::Ingredient;

/// Half-open byte range `[start, end)` of a keyword occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRange {
    pub start: usize,
    pub end: usize,
}

/// An authoritative keyword occurrence inside a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    /// The matched keyword
    pub keyword: String,
    /// Index of the ingredient declaring the keyword, if known
    pub owner: Option<usize>,
    /// The starting byte position in the text
    pub start_pos: usize,
    /// The ending byte position in the text (exclusive)
    pub end_pos: usize,
}

/// How two distinct keywords of equal length that overlap are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The keyword declared first (ingredient order, then keyword order) wins
    #[default]
    EarliestDeclared,
    /// Neither suppresses the other; both count as authoritative
    KeepBoth,
}

impl FromStr for TieBreak {
    type Err = RecipeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "earliest" | "earliest-declared" => Ok(TieBreak::EarliestDeclared),
            "keep-both" | "both" => Ok(TieBreak::KeepBoth),
            other => Err(RecipeError::InvalidConfig(format!(
                "unknown keyword tie-break '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
struct KeywordEntry {
    keyword: String,
    owner: Option<usize>,
    length: usize,
}

/// The keyword set of one recipe, in declaration order
///
/// Empty keywords are dropped and a keyword declared by several ingredients is
/// kept once, owned by the first ingredient declaring it.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    entries: Vec<KeywordEntry>,
    tie_break: TieBreak,
}

/// Find the first occurrence of `keyword` in `text`
///
/// Returns `None` for an empty keyword.
///
/// # Examples
///
/// ```rust
/// use recipes::keyword_matcher::{find_keyword, KeywordRange};
///
/// assert_eq!(find_keyword("Add the oil", "oil"), Some(KeywordRange { start: 8, end: 11 }));
/// assert_eq!(find_keyword("Add the oil", "salt"), None);
/// ```
pub fn find_keyword(text: &str, keyword: &str) -> Option<KeywordRange> {
    if keyword.is_empty() {
        return None;
    }
    text.find(keyword).map(|start| KeywordRange {
        start,
        end: start + keyword.len(),
    })
}

/// Check whether two keyword ranges overlap
///
/// Ranges overlap when one contains the other's start or end point, or one
/// fully contains the other. Ranges that merely touch do not overlap.
pub fn ranges_overlap(a: KeywordRange, b: KeywordRange) -> bool {
    (a.start >= b.start && a.start < b.end)
        || (a.end > b.start && a.end <= b.end)
        || (a.start <= b.start && a.end >= b.end)
}

/// Check whether `keyword` is the authoritative match at its first occurrence
///
/// `all_keywords` is the flattened keyword list of the active recipe; its
/// order is the declaration order used for tie-breaking.
///
/// # Examples
///
/// ```rust
/// use recipes::keyword_matcher::is_authoritative_match;
///
/// let keywords = ["salt", "sea salt"];
/// assert!(is_authoritative_match("Add sea salt to taste", "sea salt", &keywords));
/// assert!(!is_authoritative_match("Add sea salt to taste", "salt", &keywords));
/// ```
pub fn is_authoritative_match<S: AsRef<str>>(
    step_text: &str,
    keyword: &str,
    all_keywords: &[S],
) -> bool {
    KeywordIndex::from_keywords(all_keywords).is_authoritative_match(step_text, keyword)
}

impl KeywordIndex {
    /// Build the index from a recipe's ingredients
    pub fn from_ingredients(ingredients: &[Ingredient]) -> Self {
        let mut index = Self::default();
        for (owner, ingredient) in ingredients.iter().enumerate() {
            for keyword in &ingredient.keywords {
                index.push(keyword, Some(owner));
            }
        }
        debug!(
            "Built keyword index with {} keywords from {} ingredients",
            index.entries.len(),
            ingredients.len()
        );
        index
    }

    /// Build an index from bare keywords; no keyword has an owner
    pub fn from_keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        let mut index = Self::default();
        for keyword in keywords {
            index.push(keyword.as_ref(), None);
        }
        index
    }

    /// Use a different tie-break for equal-length overlaps
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    fn push(&mut self, keyword: &str, owner: Option<usize>) {
        if keyword.is_empty() {
            trace!("Skipping empty keyword");
            return;
        }
        if self.entries.iter().any(|entry| entry.keyword == keyword) {
            trace!("Keyword '{}' already declared, keeping first owner", keyword);
            return;
        }
        self.entries.push(KeywordEntry {
            keyword: keyword.to_string(),
            owner,
            length: keyword.chars().count(),
        });
    }

    /// The tie-break in effect
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Number of distinct keywords
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the recipe declares no usable keyword
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keywords in declaration order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.keyword.as_str())
    }

    /// Keywords ordered longest first; equal lengths keep declaration order
    pub fn longest_first(&self) -> Vec<&str> {
        let mut entries: Vec<&KeywordEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.length.cmp(&a.length));
        entries.into_iter().map(|entry| entry.keyword.as_str()).collect()
    }

    /// Check whether the keyword is part of this index
    pub fn contains(&self, keyword: &str) -> bool {
        self.position(keyword).is_some()
    }

    /// Index of the ingredient owning `keyword`
    ///
    /// Returns `None` when no ingredient declares the keyword; callers must
    /// treat that as "no tooltip" rather than an error.
    pub fn owner_of(&self, keyword: &str) -> Option<usize> {
        self.position(keyword)
            .and_then(|position| self.entries[position].owner)
    }

    fn position(&self, keyword: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.keyword == keyword)
    }

    /// Check whether `keyword` is the authoritative match at its first occurrence in `text`
    ///
    /// An occurrence is suppressed when another keyword present in the text
    /// overlaps it and is strictly longer. Equal-length overlaps follow the
    /// index's [`TieBreak`]. A keyword missing from the text is never
    /// authoritative.
    pub fn is_authoritative_match(&self, text: &str, keyword: &str) -> bool {
        let Some(range) = find_keyword(text, keyword) else {
            return false;
        };
        let ranges: Vec<Option<KeywordRange>> = self
            .entries
            .iter()
            .map(|entry| find_keyword(text, &entry.keyword))
            .collect();
        let declared = self.position(keyword);
        let authoritative =
            !self.is_suppressed(keyword, keyword.chars().count(), declared, range, &ranges);

        trace!(
            "Keyword '{}' in '{}' authoritative={}",
            keyword,
            text,
            authoritative
        );
        authoritative
    }

    fn is_suppressed(
        &self,
        keyword: &str,
        length: usize,
        declared: Option<usize>,
        range: KeywordRange,
        ranges: &[Option<KeywordRange>],
    ) -> bool {
        self.entries
            .iter()
            .zip(ranges)
            .enumerate()
            .any(|(position, (other, other_range))| {
                let Some(other_range) = other_range else {
                    return false;
                };
                if other.keyword == keyword || !ranges_overlap(range, *other_range) {
                    return false;
                }
                if other.length != length {
                    return other.length > length;
                }
                // Keywords outside the index rank after every declared one
                match self.tie_break {
                    TieBreak::EarliestDeclared => declared.map_or(true, |d| position < d),
                    TieBreak::KeepBoth => false,
                }
            })
    }

    /// All authoritative keyword occurrences in `text`, ordered by position
    pub fn authoritative_matches(&self, text: &str) -> Vec<KeywordMatch> {
        let ranges: Vec<Option<KeywordRange>> = self
            .entries
            .iter()
            .map(|entry| find_keyword(text, &entry.keyword))
            .collect();

        let mut matches: Vec<KeywordMatch> = self
            .entries
            .iter()
            .zip(&ranges)
            .enumerate()
            .filter_map(|(position, (entry, range))| {
                let range = (*range)?;
                if self.is_suppressed(&entry.keyword, entry.length, Some(position), range, &ranges) {
                    trace!("Keyword '{}' suppressed at {}", entry.keyword, range.start);
                    return None;
                }
                Some(KeywordMatch {
                    keyword: entry.keyword.clone(),
                    owner: entry.owner,
                    start_pos: range.start,
                    end_pos: range.end,
                })
            })
            .collect();

        matches.sort_by_key(|m| m.start_pos);
        debug!("Found {} authoritative keyword matches", matches.len());
        matches
    }

    /// Check whether any keyword of `keywords` is authoritative in `text`
    pub fn any_authoritative<S: AsRef<str>>(&self, text: &str, keywords: &[S]) -> bool {
        let authoritative: HashSet<String> = self
            .authoritative_matches(text)
            .into_iter()
            .map(|m| m.keyword)
            .collect();
        keywords.iter().any(|keyword| {
            let keyword = keyword.as_ref();
            if self.contains(keyword) {
                authoritative.contains(keyword)
            } else {
                self.is_authoritative_match(text, keyword)
            }
        })
    }
}
