//! Sequence-number inference from listing filenames.
//!
//! Filenames on the listing mix sequence numbers with dates and version
//! numbers (`246JourneyDataExtract...`, `01aJourneyDataExtract...`,
//! `usage-stats-2024-99.csv`). The inference is an ordered table of rules;
//! the first rule that yields a number wins. Each rule is a plain function so
//! it can be exercised on its own.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Default upper bound for the bounded digit-run rule.
pub const DEFAULT_UPPER_BOUND: u64 = 1000;

/// Leading digit run immediately followed by a letter (e.g. `246a-...`).
#[allow(clippy::expect_used)]
static LEADING_DIGITS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)[A-Za-z]").expect("leading digits regex is valid") // Static pattern, safe to panic
});

/// Any maximal ASCII digit run.
#[allow(clippy::expect_used)]
static DIGIT_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run regex is valid")); // Static pattern, safe to panic

/// A single named inference rule.
///
/// `apply` receives the filename and the accepted value window and returns
/// the sequence number if the rule recognises one.
#[derive(Debug, Clone, Copy)]
pub struct SequenceRule {
    /// Short identifier used in trace output.
    pub name: &'static str,
    /// The rule body.
    pub apply: fn(&str, &RangeInclusive<u64>) -> Option<u64>,
}

/// Rule 1: a filename starting with digits followed by a letter.
///
/// The window is ignored; the leading run is trusted as-is.
#[must_use]
pub fn leading_digits_before_letter(filename: &str, _window: &RangeInclusive<u64>) -> Option<u64> {
    let captures = LEADING_DIGITS_PATTERN.captures(filename)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Rule 2: the first digit run whose value falls inside `window`.
#[must_use]
pub fn first_bounded_digit_run(filename: &str, window: &RangeInclusive<u64>) -> Option<u64> {
    DIGIT_RUN_PATTERN
        .find_iter(filename)
        .filter_map(|run| run.as_str().parse::<u64>().ok())
        .find(|value| window.contains(value))
}

/// Built-in rules in evaluation order.
pub const DEFAULT_RULES: [SequenceRule; 2] = [
    SequenceRule {
        name: "leading-digits-before-letter",
        apply: leading_digits_before_letter,
    },
    SequenceRule {
        name: "first-bounded-digit-run",
        apply: first_bounded_digit_run,
    },
];

/// Ordered rule chain plus the accepted window for bounded rules.
#[derive(Debug, Clone)]
pub struct SequenceInference {
    rules: Vec<SequenceRule>,
    window: RangeInclusive<u64>,
}

impl Default for SequenceInference {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceInference {
    /// Creates the default rule chain with an upper bound of [`DEFAULT_UPPER_BOUND`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_upper_bound(DEFAULT_UPPER_BOUND)
    }

    /// Creates the default rule chain accepting digit runs in `1..=upper_bound`.
    #[must_use]
    pub fn with_upper_bound(upper_bound: u64) -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
            window: 1..=upper_bound,
        }
    }

    /// Creates an inference with a custom rule chain.
    #[must_use]
    pub fn with_rules(rules: Vec<SequenceRule>, upper_bound: u64) -> Self {
        Self {
            rules,
            window: 1..=upper_bound,
        }
    }

    /// Returns the upper bound applied by bounded rules.
    #[must_use]
    pub fn upper_bound(&self) -> u64 {
        *self.window.end()
    }

    /// Infers the sequence number for `filename`, or `None` if no rule matches.
    #[must_use]
    pub fn infer(&self, filename: &str) -> Option<u64> {
        self.rules.iter().find_map(|rule| {
            let value = (rule.apply)(filename, &self.window)?;
            trace!(filename, rule = rule.name, value, "sequence number inferred");
            Some(value)
        })
    }
}
