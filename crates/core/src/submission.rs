//! Submitted form rows.
//!
//! Browsers post repeating sections as flat urlencoded pairs such as
//! `ChecklistItem[0][name]=Gauze&ChecklistItem[0][id]=12`. This module groups
//! those pairs into one [`SubmittedRow`] per index, in index order.

use std::collections::BTreeMap;

use serde_json::{Number, Value};

use crate::error::CoreError;
use crate::model::ID_ATTRIBUTE;

/// One submitted form row: attribute name -> raw string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedRow(BTreeMap<String, String>);

impl SubmittedRow {
    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.0.insert(attribute.into(), value.into());
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).map(String::as_str)
    }

    /// The submitted identifier, if present and not blank.
    pub fn id_value(&self) -> Option<&str> {
        self.get(ID_ATTRIBUTE)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a row from a JSON object. Scalars are stringified the way a
    /// browser would submit them; `null` becomes an empty string.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let Value::Object(map) = value else {
            return Err(CoreError::Validation(
                "each row must be a JSON object".to_string(),
            ));
        };
        map.iter()
            .map(|(key, value)| json_scalar(key, value).map(|scalar| (key.clone(), scalar)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmittedRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn json_scalar(key: &str, value: &Value) -> Result<String, CoreError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(number_text(n)),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) | Value::Object(_) => Err(CoreError::Validation(format!(
            "attribute '{key}' must be a scalar value"
        ))),
    }
}

/// Largest float magnitude below which every integer is exact (2^53).
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Integral floats (`10.0`) render as integers so they still parse as ids.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT_INT => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// What the request carried for this form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Plain page load; nothing to reconcile.
    Absent,
    /// A POST. The rows may be empty when the user removed every row.
    Posted(Vec<SubmittedRow>),
}

impl Submission {
    /// Group urlencoded `(key, value)` pairs belonging to `form_name`.
    pub fn from_form_pairs(form_name: &str, pairs: &[(String, String)]) -> Self {
        Submission::Posted(parse_form_rows(form_name, pairs))
    }

    pub fn from_json_rows(rows: &[Value]) -> Result<Self, CoreError> {
        let rows = rows
            .iter()
            .map(SubmittedRow::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Submission::Posted(rows))
    }

    /// Submitted rows, empty for [`Submission::Absent`].
    pub fn rows(&self) -> &[SubmittedRow] {
        match self {
            Submission::Absent => &[],
            Submission::Posted(rows) => rows,
        }
    }
}

/// Collect the rows submitted under `form_name`, ordered by row index.
///
/// Pairs for other forms and malformed keys are skipped. Gaps in the index
/// sequence collapse, so the result is always positional `0..n`.
pub fn parse_form_rows(form_name: &str, pairs: &[(String, String)]) -> Vec<SubmittedRow> {
    let mut rows: BTreeMap<usize, SubmittedRow> = BTreeMap::new();
    for (key, value) in pairs {
        if let Some((index, attribute)) = split_row_key(form_name, key) {
            rows.entry(index).or_default().insert(attribute, value.as_str());
        }
    }
    rows.into_values().collect()
}

/// Split `Form[3][name]` into `(3, "name")`.
fn split_row_key<'a>(form_name: &str, key: &'a str) -> Option<(usize, &'a str)> {
    let rest = key.strip_prefix(form_name)?.strip_prefix('[')?;
    let (index, rest) = rest.split_once(']')?;
    let index = index.parse().ok()?;
    let attribute = rest.strip_prefix('[')?.strip_suffix(']')?;
    if attribute.is_empty() || attribute.contains(['[', ']']) {
        return None;
    }
    Some((index, attribute))
}
