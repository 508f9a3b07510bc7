//! Whole-token literal matching

use crate::domain::{MaskwiseError, Result};
use regex::{NoExpand, Regex};
use regex_syntax::is_word_character;
use std::borrow::Cow;
use std::ops::Range;

/// Matches one entity literal as a whole token
///
/// The literal is escaped, so regex metacharacters match themselves. A word
/// boundary is required only on edges where the literal itself starts or ends
/// with a word character; `\b` next to punctuation would otherwise demand a
/// word character outside the match. Word characters are the regex engine's
/// own Unicode `\w` set, so the added `\b` can always be satisfied.
#[derive(Debug, Clone)]
pub struct SpanMatcher {
    literal: String,
    regex: Regex,
}

impl SpanMatcher {
    /// Compile a matcher for `literal`
    pub fn new(literal: &str) -> Result<Self> {
        let (first, last) = match (literal.chars().next(), literal.chars().last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(MaskwiseError::Validation(
                    "Entity text must not be empty".to_string(),
                ))
            }
        };

        let mut pattern = String::with_capacity(literal.len() + 8);
        if is_word_character(first) {
            pattern.push_str(r"\b");
        }
        pattern.push_str(&regex::escape(literal));
        if is_word_character(last) {
            pattern.push_str(r"\b");
        }

        Ok(Self {
            literal: literal.to_string(),
            regex: Regex::new(&pattern)?,
        })
    }

    /// The literal being matched
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Check for at least one whole-token occurrence
    pub fn is_match(&self, document: &str) -> bool {
        self.regex.is_match(document)
    }

    /// Byte ranges of every whole-token occurrence, left to right
    pub fn find_all(&self, document: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(document).map(|m| m.range()).collect()
    }

    /// Replace every occurrence with `replacement`, taken verbatim
    pub fn replace_all<'a>(&self, document: &'a str, replacement: &str) -> Cow<'a, str> {
        self.regex.replace_all(document, NoExpand(replacement))
    }
}

/// Byte ranges of every whole-token occurrence of `literal` in `document`
pub fn find_spans(document: &str, literal: &str) -> Result<Vec<Range<usize>>> {
    Ok(SpanMatcher::new(literal)?.find_all(document))
}
