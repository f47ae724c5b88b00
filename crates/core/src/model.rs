//! Capability traits a row type implements to take part in multi-row forms.
//!
//! A concrete row (e.g. a checklist item) implements the four capabilities
//! and automatically becomes a [`RowModel`]:
//!
//! - [`Identifiable`]: exposes its optional primary key.
//! - [`Loadable`]: names its form scope and lets submitted strings be
//!   assigned to its safe attributes.
//! - [`Validatable`]: checks its own rules (blanket impl for
//!   `validator::Validate`).
//! - [`Persistable`]: knows which parent scope it belongs to.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use crate::submission::SubmittedRow;
use crate::validation::FieldErrors;

/// Name of the identifier attribute inside a submitted row.
pub const ID_ATTRIBUTE: &str = "id";

/// A row with an optional identity. `None` means "not saved yet".
pub trait Identifiable {
    type Id: Copy + Eq + Hash + FromStr + Display + Debug + Send + Sync + 'static;

    fn id(&self) -> Option<Self::Id>;
}

/// A row whose attributes can be rendered and assigned from form strings.
pub trait Loadable {
    /// Prefix under which this row's inputs are submitted (`Form[0][attr]`).
    fn form_name() -> &'static str;

    /// Attributes that may be rendered and mass-assigned. Never includes
    /// the identifier.
    fn safe_attributes() -> &'static [&'static str];

    /// Current value of an attribute as it should appear in an input.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Assign a submitted value. Returns `false` for unknown attributes.
    fn set_attribute(&mut self, name: &str, value: &str) -> bool;

    /// Human readable label for an attribute.
    fn attribute_label(name: &str) -> String {
        humanize(name)
    }

    /// Assign every safe attribute present in `row`. Anything else in the
    /// row, including `id`, is ignored.
    ///
    /// Returns `true` if at least one attribute was assigned.
    fn load(&mut self, row: &SubmittedRow) -> bool {
        let mut loaded = false;
        for name in Self::safe_attributes() {
            if let Some(value) = row.get(name) {
                loaded |= self.set_attribute(name, value);
            }
        }
        loaded
    }
}

/// A row that can check its own validation rules.
pub trait Validatable {
    fn validate_row(&self) -> Result<(), FieldErrors>;
}

impl<T: validator::Validate> Validatable for T {
    fn validate_row(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(FieldErrors::from)
    }
}

/// A row stored under a parent scope (the filter used to load it).
pub trait Persistable: Identifiable {
    type Scope: Clone + Debug + Send + Sync + 'static;

    /// A blank, unsaved row already attached to `scope`.
    fn in_scope(scope: &Self::Scope) -> Self;

    fn matches_scope(&self, scope: &Self::Scope) -> bool;

    /// Record the identity assigned by the store on insert.
    fn set_id(&mut self, id: Self::Id);
}

/// Everything the reconciliation and save workflow need from a row type.
pub trait RowModel:
    Identifiable + Loadable + Validatable + Persistable + Default + Clone + Debug + Send + Sync + 'static
{
}

impl<T> RowModel for T where
    T: Identifiable
        + Loadable
        + Validatable
        + Persistable
        + Default
        + Clone
        + Debug
        + Send
        + Sync
        + 'static
{
}

/// Turn `snake_case` attribute names into labels (`checklist_id` ->
/// `Checklist ID`).
pub fn humanize(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            if word.eq_ignore_ascii_case("id") {
                return "ID".to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::DummyRow;

    #[test]
    fn humanize_splits_and_capitalizes() {
        assert_eq!(humanize("name"), "Name");
        assert_eq!(humanize("checklist_id"), "Checklist ID");
        assert_eq!(humanize("due__date"), "Due Date");
    }

    #[test]
    fn load_assigns_only_safe_attributes() {
        let mut row = DummyRow::default();
        let submitted: SubmittedRow = [("id", "99"), ("name", "Gauze"), ("scope", "7")]
            .into_iter()
            .collect();

        assert!(row.load(&submitted));
        assert_eq!(row.name, "Gauze");
        assert_eq!(row.id, None);
        assert_eq!(row.scope, 0);
    }

    #[test]
    fn load_reports_nothing_assigned() {
        let mut row = DummyRow::default();
        let submitted: SubmittedRow = [("unknown", "x")].into_iter().collect();
        assert!(!row.load(&submitted));
    }
}
