//! Repository for the `checklist_items` table.

use sqlx::PgPool;
use rowset_core::types::DbId;

use crate::models::checklist_item::ChecklistItem;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, checklist_id, name, note, created_at, updated_at";

/// Provides CRUD operations for checklist items.
pub struct ChecklistItemRepo;

impl ChecklistItemRepo {
    /// All items of one checklist, oldest first.
    pub async fn list_by_checklist(
        pool: &PgPool,
        checklist_id: DbId,
    ) -> Result<Vec<ChecklistItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM checklist_items WHERE checklist_id = $1 ORDER BY id");
        sqlx::query_as::<_, ChecklistItem>(&query)
            .bind(checklist_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new item, returning the created row. Any `id` on `input` is
    /// ignored.
    pub async fn create(pool: &PgPool, input: &ChecklistItem) -> Result<ChecklistItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO checklist_items (checklist_id, name, note) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChecklistItem>(&query)
            .bind(input.checklist_id)
            .bind(&input.name)
            .bind(&input.note)
            .fetch_one(pool)
            .await
    }

    /// Overwrite an item's attributes.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ChecklistItem,
    ) -> Result<Option<ChecklistItem>, sqlx::Error> {
        let query = format!(
            "UPDATE checklist_items SET \
                checklist_id = $2, \
                name = $3, \
                note = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChecklistItem>(&query)
            .bind(id)
            .bind(input.checklist_id)
            .bind(&input.name)
            .bind(&input.note)
            .fetch_optional(pool)
            .await
    }

    /// Delete every item whose id is in `ids`. Returns the number removed.
    pub async fn delete_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM checklist_items WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
