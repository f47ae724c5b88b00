//! [`RowStore`] implementation backed by Postgres.

use async_trait::async_trait;
use rowset_core::error::CoreError;
use rowset_core::store::RowStore;
use rowset_core::types::DbId;

use crate::models::checklist_item::ChecklistItem;
use crate::repositories::ChecklistItemRepo;
use crate::DbPool;

/// Checklist items stored in the `checklist_items` table.
#[derive(Clone)]
pub struct PgChecklistItemStore {
    pool: DbPool,
}

impl PgChecklistItemStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RowStore<ChecklistItem> for PgChecklistItemStore {
    async fn find_all(&self, checklist_id: &DbId) -> Result<Vec<ChecklistItem>, CoreError> {
        ChecklistItemRepo::list_by_checklist(&self.pool, *checklist_id)
            .await
            .map_err(CoreError::storage)
    }

    async fn delete_all(&self, ids: &[DbId]) -> Result<u64, CoreError> {
        ChecklistItemRepo::delete_by_ids(&self.pool, ids)
            .await
            .map_err(CoreError::storage)
    }

    async fn save(&self, row: &mut ChecklistItem) -> Result<(), CoreError> {
        let stored = match row.id {
            None => ChecklistItemRepo::create(&self.pool, row)
                .await
                .map_err(CoreError::storage)?,
            Some(id) => ChecklistItemRepo::update(&self.pool, id, row)
                .await
                .map_err(CoreError::storage)?
                .ok_or(CoreError::NotFound {
                    entity: "ChecklistItem",
                    id,
                })?,
        };
        *row = stored;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(CoreError::storage)
    }
}
