//! Safe compilation of user-supplied search patterns.
//!
//! Search input is treated as a regular expression but never trusted: a
//! pattern must parse, and must then clear a timing probe against a
//! synthetic input before it is accepted. The probe is a heuristic: the
//! `regex` engine evaluates in linear time, so the guard mostly protects
//! against pathological host configurations and future engine swaps, but
//! any pattern that trips it is refused all the same.

use std::{
    ops::Range,
    time::{Duration, Instant},
};

use regex::{Regex, RegexBuilder};

/// The number of characters in the synthetic probe input.
pub const PROBE_LENGTH: usize = 100;

/// The character the probe input repeats.
pub const PROBE_CHAR: char = 'a';

/// How long the probe evaluation may take before the pattern is rejected.
pub const PROBE_TIME_LIMIT: Duration = Duration::from_millis(100);

/// The reasons a search pattern can be refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    ///
    /// The wrapped text is the engine's own description of the problem,
    /// suitable for showing next to the search box.
    #[error("{0}")]
    Syntax(String),

    /// The pattern parsed but took too long against the probe input.
    #[error("Search pattern is too complex")]
    TooComplex,
}

/// A compiled, probe-cleared search pattern.
///
/// Matching through the `regex` crate keeps no cursor or other state on the
/// pattern value, so a matcher behaves identically regardless of prior use
/// and can be shared freely between filtering and highlighting.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    regex: Regex,
}

impl SearchMatcher {
    /// Whether the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The source pattern as the user entered it.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// The non-overlapping match ranges in `text`, left to right.
    ///
    /// Byte ranges into `text`, as produced by a global find-all scan.
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.regex
            .find_iter(text)
            .map(|found| found.range())
            .collect()
    }
}

/// Compile a user-supplied search pattern.
///
/// Empty or whitespace-only input means "no filter" and yields `Ok(None)`
/// rather than an error. Case-insensitivity is applied as an engine flag,
/// never by rewriting the pattern text.
///
/// # Errors
/// Returns [PatternError::Syntax] when the pattern does not parse, and
/// [PatternError::TooComplex] when matching it against [PROBE_LENGTH]
/// repeated [PROBE_CHAR]s takes longer than [PROBE_TIME_LIMIT].
pub fn compile_pattern(
    pattern: &str,
    case_sensitive: bool,
) -> Result<Option<SearchMatcher>, PatternError> {
    if pattern.trim().is_empty() {
        return Ok(None);
    }

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|error| PatternError::Syntax(error.to_string()))?;

    let probe: String = std::iter::repeat(PROBE_CHAR).take(PROBE_LENGTH).collect();
    let started = Instant::now();
    let _ = regex.is_match(&probe);

    if started.elapsed() > PROBE_TIME_LIMIT {
        tracing::warn!("rejecting slow search pattern: {pattern}");
        return Err(PatternError::TooComplex);
    }

    Ok(Some(SearchMatcher { regex }))
}
