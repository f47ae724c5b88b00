//! Row type shared by the unit tests in this crate.

use validator::Validate;

use crate::model::{Identifiable, Loadable, Persistable};
use crate::types::DbId;

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct DummyRow {
    pub id: Option<DbId>,
    pub scope: DbId,
    #[validate(length(min = 1, message = "Name cannot be blank."))]
    pub name: String,
    /// Where this instance came from; not an attribute. Lets tests tell a
    /// reused instance from a fresh one.
    pub origin: &'static str,
}

impl DummyRow {
    pub fn stored(id: DbId, scope: DbId, name: &str) -> Self {
        Self {
            id: Some(id),
            scope,
            name: name.to_string(),
            origin: "store",
        }
    }
}

impl Identifiable for DummyRow {
    type Id = DbId;

    fn id(&self) -> Option<DbId> {
        self.id
    }
}

impl Loadable for DummyRow {
    fn form_name() -> &'static str {
        "DummyRow"
    }

    fn safe_attributes() -> &'static [&'static str] {
        &["name"]
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        match name {
            "name" => {
                self.name = value.to_string();
                true
            }
            _ => false,
        }
    }
}

impl Persistable for DummyRow {
    type Scope = DbId;

    fn in_scope(scope: &DbId) -> Self {
        Self {
            scope: *scope,
            ..Self::default()
        }
    }

    fn matches_scope(&self, scope: &DbId) -> bool {
        self.scope == *scope
    }

    fn set_id(&mut self, id: DbId) {
        self.id = Some(id);
    }
}
