// src/core/matcher.rs
use regex::{Regex, RegexBuilder};

/// Case-insensitive "contains any keyword" test.
///
/// Every keyword is escaped and joined into one alternation, so keyword text is
/// always matched literally. Empty keywords are dropped since an empty literal
/// would match every hashtag.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    pattern: Option<Regex>,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(AsRef::as_ref)
            .filter(|keyword| !keyword.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// True when there is nothing to match against.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text))
    }
}
