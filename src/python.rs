//! Python bindings, built with the `python` feature.
//!
//! Rows stay Python dicts: values are coerced with `str()` and the original
//! dict objects are handed back, so callers keep their own row types.

use std::collections::HashSet;

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::filter::DEFAULT_TARGET_FIELD;
use crate::validators;

#[pymodule]
fn debitcheck(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(is_valid_debit_card, m)?)?;
    m.add_function(wrap_pyfunction!(filter_valid_rows, m)?)?;
    m.add_function(wrap_pyfunction!(is_native_available, m)?)?;
    Ok(())
}

/// Validate a debit card number
#[pyfunction]
fn is_valid_debit_card(py: Python<'_>, candidate: &str) -> bool {
    py.allow_threads(|| validators::is_valid_debit_card(candidate))
}

/// Keep the rows whose target fields hold a valid debit card
#[pyfunction]
#[pyo3(signature = (rows, fields = None))]
fn filter_valid_rows<'py>(
    rows: Vec<Bound<'py, PyDict>>,
    fields: Option<Vec<String>>,
) -> PyResult<Vec<Bound<'py, PyDict>>> {
    let fields: HashSet<String> = fields
        .unwrap_or_else(|| vec![DEFAULT_TARGET_FIELD.to_string()])
        .into_iter()
        .collect();

    let mut retained = Vec::with_capacity(rows.len());
    for row in rows {
        let mut valid = false;
        for (key, value) in row.iter() {
            if !fields.contains(key.str()?.to_cow()?.as_ref()) {
                continue;
            }
            if validators::is_valid_debit_card(&value.str()?.to_cow()?) {
                valid = true;
                break;
            }
        }
        if valid {
            retained.push(row);
        }
    }
    Ok(retained)
}

/// Check if native extension is working
#[pyfunction]
fn is_native_available() -> bool {
    true
}
