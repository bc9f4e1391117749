// tests/filter_tests.rs
use std::collections::HashSet;

use anyhow::Result;
use indexmap::indexmap;
use test_log::test;

use debitcheck::{
    filter_valid_records, CardCheckConfig, DebitCardValidator, FieldValue, Record, RecordFilter,
};

fn row(card: &str, name: &str) -> Record {
    indexmap! {
        "debitcard".to_string() => FieldValue::from(card),
        "name".to_string() => FieldValue::from(name),
    }
}

fn names(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r["name"].to_string()).collect()
}

fn debitcard_field() -> HashSet<String> {
    ["debitcard".to_string()].into_iter().collect()
}

// Heap's algorithm.
fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    fn generate<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        generate(k - 1, items, out);
        for i in 0..k - 1 {
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
            generate(k - 1, items, out);
        }
    }

    let mut items = items.to_vec();
    let mut out = Vec::new();
    generate(items.len(), &mut items, &mut out);
    out
}

#[test]
fn test_filter_reference_case() {
    let records = vec![row("4123456789012345", "A"), row("bad", "B")];
    let filtered = filter_valid_records(&records, &debitcard_field());

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0], row("4123456789012345", "A"));
    let keys: Vec<&str> = filtered[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["debitcard", "name"]);
}

#[test]
fn test_field_order_is_preserved() {
    let record: Record = indexmap! {
        "name".to_string() => FieldValue::from("Z"),
        "debitcard".to_string() => FieldValue::from("6123-4567-8901-2345"),
        "amount".to_string() => FieldValue::from(12.5),
    };
    let filtered = filter_valid_records(&[record.clone()], &debitcard_field());

    assert_eq!(filtered.len(), 1);
    assert!(filtered[0].iter().eq(record.iter()));
}

#[test]
fn test_input_is_not_mutated() {
    let records = vec![row("bad", "A"), row("4123456789012345", "B")];
    let before = records.clone();
    let _ = filter_valid_records(&records, &debitcard_field());
    assert_eq!(records, before);
}

#[test]
fn test_record_order_for_all_permutations() {
    let mixed = vec![
        row("4123456789012345", "valid-1"),
        row("4000000000000000", "invalid-1"),
        row("5123-4567-8901-2345", "valid-2"),
        row("5123_4567_8901_2345", "invalid-2"),
        row("4.123456789012345e+15", "valid-3"),
    ];
    let filter = RecordFilter::default();

    for permutation in permutations(&mixed) {
        let expected: Vec<String> = names(&permutation)
            .into_iter()
            .filter(|name| name.starts_with("valid"))
            .collect();

        assert_eq!(names(&filter.filter(&permutation)), expected);
        assert_eq!(names(&filter.par_filter(&permutation)), expected);
    }
}

#[test]
fn test_par_filter_matches_filter_on_large_input() {
    let records: Vec<Record> = (0..2_000)
        .map(|i| {
            let card = if i % 3 == 0 { "4123456789012345" } else { "4111111111111111" };
            row(card, &i.to_string())
        })
        .collect();
    let filter = RecordFilter::default();

    let sequential = filter.filter(&records);
    let parallel = filter.par_filter(&records);
    assert_eq!(sequential.len(), 667);
    assert_eq!(names(&sequential), names(&parallel));
}

#[test]
fn test_empty_input_and_empty_targets() {
    assert!(filter_valid_records(&[], &debitcard_field()).is_empty());

    let records = vec![row("4123456789012345", "A")];
    assert!(filter_valid_records(&records, &HashSet::new()).is_empty());
}

#[test]
fn test_any_target_field_retains_record() {
    let fields: HashSet<String> = ["debitcard", "backup_card"].iter().map(|s| s.to_string()).collect();
    let records = vec![
        indexmap! {
            "debitcard".to_string() => FieldValue::from("bad"),
            "backup_card".to_string() => FieldValue::from("5123456789012345"),
            "name".to_string() => FieldValue::from("kept"),
        },
        indexmap! {
            "debitcard".to_string() => FieldValue::from("bad"),
            "backup_card".to_string() => FieldValue::from("also bad"),
            "name".to_string() => FieldValue::from("dropped"),
        },
    ];

    assert_eq!(names(&filter_valid_records(&records, &fields)), vec!["kept"]);
}

#[test]
fn test_numeric_values_are_coerced() {
    let records = vec![
        indexmap! {
            "debitcard".to_string() => FieldValue::from(4123456789012345_i64),
            "name".to_string() => FieldValue::from("int"),
        },
        indexmap! {
            "debitcard".to_string() => FieldValue::from(5123456789012345.0),
            "name".to_string() => FieldValue::from("float"),
        },
        indexmap! {
            "debitcard".to_string() => FieldValue::from(4000000000000000_i64),
            "name".to_string() => FieldValue::from("repeats"),
        },
    ];

    assert_eq!(names(&filter_valid_records(&records, &debitcard_field())), vec!["int", "float"]);
}

#[test]
fn test_records_from_json() -> Result<()> {
    let json = r#"[
        {"name": "A", "debitcard": 4123456789012345},
        {"name": "B", "debitcard": "4.123456789012345e+15"},
        {"name": "C", "debitcard": "4123 4567 8901 2345"},
        {"name": "D"}
    ]"#;
    let records: Vec<Record> = serde_json::from_str(json)?;
    let filtered = filter_valid_records(&records, &debitcard_field());

    assert_eq!(names(&filtered), vec!["A", "B"]);
    let keys: Vec<&str> = filtered[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "debitcard"]);
    Ok(())
}

#[test]
fn test_filter_from_config() -> Result<()> {
    let config = CardCheckConfig::from_yaml_str(
        r#"
target_fields: [card]
separators:
  - find: "-"
    replace: ""
  - find: " "
    replace: ""
max_repeat_run: 3
"#,
    )?;
    let filter = RecordFilter::from_config(&config)?;
    assert_eq!(filter.validator(), &DebitCardValidator::new(config.separators.clone(), 3));

    let records = vec![
        indexmap! { "card".to_string() => FieldValue::from("5123-4567-8901-2345") },
        indexmap! { "debitcard".to_string() => FieldValue::from("5123-4567-8901-2345") },
    ];
    assert_eq!(filter.filter(&records).len(), 1);
    Ok(())
}

#[test]
fn test_filter_from_invalid_config() {
    let config = CardCheckConfig {
        target_fields: Vec::new(),
        ..CardCheckConfig::default()
    };
    assert!(RecordFilter::from_config(&config).is_err());
}
