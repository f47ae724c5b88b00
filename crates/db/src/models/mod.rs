//! Domain model structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the row-model capability impls that let it take
//! part in multi-row forms.

pub mod checklist_item;
