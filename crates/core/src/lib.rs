//! Core building blocks for multi-row forms.
//!
//! Everything here is free of HTTP and SQL: capability traits for row
//! models, form payload parsing, reconciliation of submitted rows against
//! stored rows, bulk load / validation, and the save workflow that ties them
//! together through the [`store::RowStore`] seam.

pub mod error;
pub mod flash;
pub mod model;
pub mod reconcile;
pub mod store;
pub mod submission;
pub mod types;
pub mod validation;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_support;
