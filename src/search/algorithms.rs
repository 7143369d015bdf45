//! Containment matchers used to test a normalized query against field text
use crate::cli::MatchStrategy;
use crate::error::{ClsearchError, Result};
use crate::search::SearchConfig;
use memchr::memmem::Finder;
use regex::{Regex, RegexBuilder};

/// Trait for containment matchers
pub trait Matcher: Send + Sync {
    fn is_match(&self, haystack: &str) -> bool;
    fn name(&self) -> &'static str;

    /// Number of haystacks containing the needle
    fn count_matches(&self, haystacks: &[String]) -> usize {
        haystacks.iter().filter(|h| self.is_match(h)).count()
    }
}

/// SIMD substring search using memchr
pub struct LiteralMatcher {
    finder: Finder<'static>,
}

impl LiteralMatcher {
    pub fn new(needle: &str) -> Self {
        Self {
            finder: Finder::new(needle.as_bytes()).into_owned(),
        }
    }
}

impl Matcher for LiteralMatcher {
    fn is_match(&self, haystack: &str) -> bool {
        if self.finder.needle().is_empty() {
            return false;
        }
        self.finder.find(haystack.as_bytes()).is_some()
    }

    fn name(&self) -> &'static str {
        "Literal"
    }
}

/// Regex search over an escaped needle, so every character is literal
pub struct RegexMatcher {
    pattern: Regex,
}

impl RegexMatcher {
    pub fn new(needle: &str, size_limit: usize) -> Result<Self> {
        let pattern = RegexBuilder::new(&regex::escape(needle))
            .size_limit(size_limit)
            .build()?;
        Ok(Self { pattern })
    }
}

impl Matcher for RegexMatcher {
    fn is_match(&self, haystack: &str) -> bool {
        !haystack.is_empty() && self.pattern.is_match(haystack)
    }

    fn name(&self) -> &'static str {
        "Regex"
    }
}

/// Build the configured matcher for a normalized query.
///
/// Fails for queries longer than `max_query_len` characters and when the
/// regex strategy cannot compile within its size limit.
pub fn create_matcher(config: &SearchConfig, needle: &str) -> Result<Box<dyn Matcher>> {
    let length = needle.chars().count();
    if length > config.max_query_len {
        return Err(ClsearchError::QueryTooLong {
            length,
            limit: config.max_query_len,
        });
    }

    match config.strategy {
        MatchStrategy::Literal => Ok(Box::new(LiteralMatcher::new(needle))),
        MatchStrategy::Regex => Ok(Box::new(RegexMatcher::new(
            needle,
            config.regex_size_limit,
        )?)),
    }
}
