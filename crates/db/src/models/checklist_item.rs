//! Checklist item entity: the child row edited through the multi-row form.

use serde::Serialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use rowset_core::model::{Identifiable, Loadable, Persistable};
use rowset_core::types::{DbId, Timestamp};

/// A row from the `checklist_items` table.
///
/// `id` and the timestamps are `None` until the row is first saved.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Validate)]
pub struct ChecklistItem {
    pub id: Option<DbId>,
    pub checklist_id: DbId,
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "Name must be at most 200 characters.")
    )]
    pub name: String,
    #[validate(length(max = 2000, message = "Note must be at most 2000 characters."))]
    pub note: String,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Name cannot be blank.".into());
        return Err(err);
    }
    Ok(())
}

impl Identifiable for ChecklistItem {
    type Id = DbId;

    fn id(&self) -> Option<DbId> {
        self.id
    }
}

impl Loadable for ChecklistItem {
    fn form_name() -> &'static str {
        "ChecklistItem"
    }

    fn safe_attributes() -> &'static [&'static str] {
        &["name", "note"]
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.map(|id| id.to_string()).unwrap_or_default()),
            "name" => Some(self.name.clone()),
            "note" => Some(self.note.clone()),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        match name {
            "name" => self.name = value.to_string(),
            "note" => self.note = value.to_string(),
            _ => return false,
        }
        true
    }
}

impl Persistable for ChecklistItem {
    /// Parent checklist id.
    type Scope = DbId;

    fn in_scope(checklist_id: &DbId) -> Self {
        Self {
            checklist_id: *checklist_id,
            ..Self::default()
        }
    }

    fn matches_scope(&self, checklist_id: &DbId) -> bool {
        self.checklist_id == *checklist_id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = Some(id);
    }
}
