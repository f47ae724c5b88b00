//! Per-row and per-batch validation results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::humanize;

/// Error messages for one row, keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for one attribute (empty if it passed).
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({}).", humanize(&field), err.code),
                };
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

/// Validation outcome for a whole batch, keyed by row position.
///
/// Only rows that failed have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchErrors(BTreeMap<usize, FieldErrors>);

impl BatchErrors {
    pub fn insert(&mut self, index: usize, errors: FieldErrors) {
        if !errors.is_empty() {
            self.0.insert(index, errors);
        }
    }

    /// `true` when every row passed.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_row(&self, index: usize) -> Option<&FieldErrors> {
        self.0.get(&index)
    }

    pub fn invalid_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
