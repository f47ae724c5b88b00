//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod checklist_item_repo;

pub use checklist_item_repo::ChecklistItemRepo;
