//! debitcheck
//!
//! Validates debit card numbers and filters row-like records down to the
//! ones whose card field is valid. A card is 16 digits (optionally written
//! as four hyphenated groups), starts with 4, 5 or 6, and never repeats a
//! digit four or more times in a row. Exponential spreadsheet exports such
//! as `4.123456789012345e+15` are expanded exactly before checking.
//!
//! ```
//! use debitcheck::{filter_valid_records, is_valid_debit_card, FieldValue, Record};
//! use std::collections::HashSet;
//!
//! assert!(is_valid_debit_card("5123-4567-8901-2345"));
//! assert!(!is_valid_debit_card("4000000000000000"));
//!
//! let mut row = Record::new();
//! row.insert("debitcard".to_string(), FieldValue::from("4123456789012345"));
//! let fields: HashSet<String> = ["debitcard".to_string()].into_iter().collect();
//! assert_eq!(filter_valid_records(&[row], &fields).len(), 1);
//! ```
//!
//! Building with the `python` feature exposes the same checks as a Python
//! extension module.

pub mod config;
pub mod decimal;
pub mod errors;
pub mod filter;
pub mod record;
pub mod validators;

#[cfg(feature = "python")]
mod python;

pub use config::CardCheckConfig;
pub use errors::DebitCheckError;
pub use filter::{filter_valid_records, RecordFilter, DEFAULT_TARGET_FIELD};
pub use record::{FieldValue, Record};
pub use validators::{
    is_valid_debit_card, DebitCardValidator, Rejection, SeparatorRule, DEFAULT_MAX_REPEAT_RUN,
};
