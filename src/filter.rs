//! Keeps only the records whose debit card field validates.
//!
//! A record is retained when **any** of its target fields holds a valid card.
//! Retained records are cloned unmodified and keep their original order.

use std::collections::HashSet;

use log::{debug, info};
use rayon::prelude::*;

use crate::config::CardCheckConfig;
use crate::errors::Result;
use crate::record::Record;
use crate::validators::DebitCardValidator;

/// Field validated when no configuration says otherwise.
pub const DEFAULT_TARGET_FIELD: &str = "debitcard";

#[derive(Debug, Clone)]
pub struct RecordFilter {
    validator: DebitCardValidator,
    target_fields: HashSet<String>,
}

impl Default for RecordFilter {
    fn default() -> Self {
        RecordFilter::new(DebitCardValidator::default(), [DEFAULT_TARGET_FIELD])
    }
}

impl RecordFilter {
    pub fn new<I, S>(validator: DebitCardValidator, target_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecordFilter {
            validator,
            target_fields: target_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a filter from a validated configuration.
    pub fn from_config(config: &CardCheckConfig) -> Result<Self> {
        config.validate()?;
        Ok(RecordFilter::new(
            config.validator(),
            config.target_fields.iter().cloned(),
        ))
    }

    pub fn validator(&self) -> &DebitCardValidator {
        &self.validator
    }

    pub fn target_fields(&self) -> &HashSet<String> {
        &self.target_fields
    }

    /// `true` if any target field present in `record` holds a valid card.
    pub fn retains(&self, record: &Record) -> bool {
        record
            .iter()
            .filter(|(key, _)| self.target_fields.contains(key.as_str()))
            .any(|(_, value)| self.validator.is_valid(&value.as_text()))
    }

    /// Single sequential pass.
    pub fn filter(&self, records: &[Record]) -> Vec<Record> {
        let retained: Vec<Record> = records
            .iter()
            .enumerate()
            .filter(|(index, record)| self.keep(*index, record))
            .map(|(_, record)| record.clone())
            .collect();

        info!("Retained {} of {} records with a valid debit card.", retained.len(), records.len());
        retained
    }

    /// Parallel pass over `records`. Output order matches [`RecordFilter::filter`].
    pub fn par_filter(&self, records: &[Record]) -> Vec<Record> {
        let retained: Vec<Record> = records
            .par_iter()
            .enumerate()
            .filter(|(index, record)| self.keep(*index, record))
            .map(|(_, record)| record.clone())
            .collect();

        info!("Retained {} of {} records with a valid debit card.", retained.len(), records.len());
        retained
    }

    fn keep(&self, index: usize, record: &Record) -> bool {
        let keep = self.retains(record);
        if !keep {
            debug!("Dropping record #{}: no valid debit card in {:?}.", index, self.target_fields);
        }
        keep
    }
}

/// Filters `records` down to those with a valid card in any of `target_fields`.
pub fn filter_valid_records(records: &[Record], target_fields: &HashSet<String>) -> Vec<Record> {
    RecordFilter::new(DebitCardValidator::default(), target_fields.iter().cloned()).filter(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use indexmap::indexmap;

    fn row(card: &str, name: &str) -> Record {
        indexmap! {
            "debitcard".to_string() => FieldValue::from(card),
            "name".to_string() => FieldValue::from(name),
        }
    }

    #[test]
    fn test_filter_drops_invalid() {
        let records = vec![row("4123456789012345", "A"), row("bad", "B")];
        let filtered = RecordFilter::default().filter(&records);
        assert_eq!(filtered, vec![row("4123456789012345", "A")]);
    }

    #[test]
    fn test_missing_target_field_is_dropped() {
        let mut record = Record::new();
        record.insert("name".to_string(), FieldValue::from("C"));
        assert!(!RecordFilter::default().retains(&record));
    }

    #[test]
    fn test_any_target_field_is_enough() {
        let filter = RecordFilter::new(DebitCardValidator::default(), ["primary", "backup"]);
        let record: Record = indexmap! {
            "primary".to_string() => FieldValue::from("0000"),
            "backup".to_string() => FieldValue::from("6123-4567-8901-2345"),
        };
        assert!(filter.retains(&record));
    }

    #[test]
    fn test_non_target_fields_ignored() {
        let filter = RecordFilter::default();
        let record: Record = indexmap! {
            "debitcard".to_string() => FieldValue::from("bad"),
            "other".to_string() => FieldValue::from("4123456789012345"),
        };
        assert!(!filter.retains(&record));
    }
}
