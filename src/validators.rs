//! Debit card validation
//!
//! A candidate is valid when it passes, in order: a coarse numeric-shape
//! check, exponential normalization, the 16-digit structural pattern,
//! separator stripping and the consecutive-repeated-digit limit.

use std::borrow::Cow;
use std::fmt;

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::decimal::expand_exponential;

/// Longest run of one repeated digit a card may contain.
pub const DEFAULT_MAX_REPEAT_RUN: usize = 3;

// Sign, digits with stray hyphens/spaces, optional point, optional exponent.
static NUMERIC_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9\- ]+\.?[.0-9\-]*|\.[0-9\-]+)(?:[eE][+-]?[0-9\-]+)?$")
        .expect("numeric shape pattern compiles")
});

// Same shape, but the exponent sign is mandatory (`e+`/`e-`).
static EXPONENTIAL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9\- ]+\.?[.0-9\-]*|\.[0-9\-]+)[eE][+-][0-9\-]+$")
        .expect("exponential shape pattern compiles")
});

// 16 digits, or four groups of four joined by single hyphens; leads with 4, 5 or 6.
static CARD_STRUCTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[4-6][0-9]{15}|[4-6][0-9]{3}(?:-[0-9]{4}){3})$")
        .expect("card structure pattern compiles")
});

static DEFAULT_VALIDATOR: Lazy<DebitCardValidator> = Lazy::new(DebitCardValidator::default);

/// One entry of the separator strip table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SeparatorRule {
    pub find: String,
    #[serde(default)]
    pub replace: String,
}

impl SeparatorRule {
    /// A rule that deletes every occurrence of `find`.
    pub fn strip(find: impl Into<String>) -> Self {
        SeparatorRule {
            find: find.into(),
            replace: String::new(),
        }
    }
}

/// The stage at which a candidate was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotNumeric,
    Unrepresentable,
    BadStructure,
    RepeatedDigits { run: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotNumeric => write!(f, "not numeric"),
            Rejection::Unrepresentable => write!(f, "exponential form has no exact decimal expansion"),
            Rejection::BadStructure => write!(f, "does not match the card structure"),
            Rejection::RepeatedDigits { run } => write!(f, "digit repeated {} times in a row", run),
        }
    }
}

/// Validates debit card numbers against a strip table and a repeat limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebitCardValidator {
    separators: Vec<SeparatorRule>,
    max_repeat_run: usize,
}

impl Default for DebitCardValidator {
    fn default() -> Self {
        DebitCardValidator {
            separators: vec![SeparatorRule::strip("-")],
            max_repeat_run: DEFAULT_MAX_REPEAT_RUN,
        }
    }
}

impl DebitCardValidator {
    pub fn new(separators: Vec<SeparatorRule>, max_repeat_run: usize) -> Self {
        DebitCardValidator {
            separators,
            max_repeat_run,
        }
    }

    pub fn separators(&self) -> &[SeparatorRule] {
        &self.separators
    }

    pub fn max_repeat_run(&self) -> usize {
        self.max_repeat_run
    }

    /// Returns `true` if `candidate` is a valid debit card number.
    pub fn is_valid(&self, candidate: &str) -> bool {
        match self.check(candidate) {
            Ok(_) => true,
            Err(reason) => {
                // Never log the candidate itself: it may be a real card number.
                trace!("Debit card candidate rejected: {}", reason);
                false
            }
        }
    }

    /// Runs every stage and returns the separator-free digits on success.
    pub fn check(&self, candidate: &str) -> Result<String, Rejection> {
        if !NUMERIC_SHAPE.is_match(candidate) {
            return Err(Rejection::NotNumeric);
        }

        let number = normalize(candidate).ok_or(Rejection::Unrepresentable)?;
        if !CARD_STRUCTURE.is_match(&number) {
            return Err(Rejection::BadStructure);
        }

        let digits = self.strip_separators(&number);
        let run = longest_run(&digits);
        if run > self.max_repeat_run {
            return Err(Rejection::RepeatedDigits { run });
        }

        Ok(digits)
    }

    fn strip_separators(&self, number: &str) -> String {
        self.separators
            .iter()
            .fold(number.to_string(), |acc, rule| acc.replace(&rule.find, &rule.replace))
    }
}

/// Validate a debit card number with the default strip table and repeat limit.
pub fn is_valid_debit_card(candidate: &str) -> bool {
    DEFAULT_VALIDATOR.is_valid(candidate)
}

/// Expands exponential candidates (`4.1e+15`) into plain digits.
///
/// Anything without an explicitly signed exponent is returned untouched.
/// `None` means the exponential form could not be expanded exactly.
pub fn normalize(candidate: &str) -> Option<Cow<'_, str>> {
    if EXPONENTIAL_SHAPE.is_match(candidate) {
        expand_exponential(candidate).map(Cow::Owned)
    } else {
        Some(Cow::Borrowed(candidate))
    }
}

/// Length of the longest run of one repeated character.
pub fn longest_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;

    for c in text.chars() {
        if previous == Some(c) {
            current += 1;
        } else {
            previous = Some(c);
            current = 1;
        }
        longest = longest.max(current);
    }

    longest
}
