//! Persistence capability used by the save workflow.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::model::{Identifiable, RowModel};
use crate::types::DbId;

/// Find / delete / save operations for one row type.
///
/// `rowset-db` implements this on Postgres; [`MemoryStore`] keeps rows in
/// process for tests and local runs.
#[async_trait]
pub trait RowStore<M: RowModel>: Send + Sync {
    /// Every stored row belonging to `scope`, in id order.
    async fn find_all(&self, scope: &M::Scope) -> Result<Vec<M>, CoreError>;

    /// Delete rows by id. Returns the number of rows removed.
    async fn delete_all(&self, ids: &[M::Id]) -> Result<u64, CoreError>;

    /// Insert the row when it has no id (assigning one), update it otherwise.
    async fn save(&self, row: &mut M) -> Result<(), CoreError>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// In-process [`RowStore`] keyed by sequential ids starting at 1.
pub struct MemoryStore<M> {
    table: Mutex<MemoryTable<M>>,
}

struct MemoryTable<M> {
    rows: BTreeMap<DbId, M>,
    next_id: DbId,
}

impl<M> Default for MemoryStore<M> {
    fn default() -> Self {
        Self {
            table: Mutex::new(MemoryTable {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<M> MemoryStore<M>
where
    M: RowModel + Identifiable<Id = DbId>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `rows`. Rows without an id get the next free one.
    pub fn with_rows(rows: Vec<M>) -> Self {
        let mut table = MemoryTable {
            rows: BTreeMap::new(),
            next_id: 1,
        };
        for mut row in rows {
            let id = match row.id() {
                Some(id) => id,
                None => {
                    let id = table.next_id;
                    row.set_id(id);
                    id
                }
            };
            table.next_id = table.next_id.max(id + 1);
            table.rows.insert(id, row);
        }
        Self {
            table: Mutex::new(table),
        }
    }

    /// Copy of every stored row, in id order.
    pub async fn snapshot(&self) -> Vec<M> {
        self.table.lock().await.rows.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }
}

#[async_trait]
impl<M> RowStore<M> for MemoryStore<M>
where
    M: RowModel + Identifiable<Id = DbId>,
{
    async fn find_all(&self, scope: &M::Scope) -> Result<Vec<M>, CoreError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .values()
            .filter(|row| row.matches_scope(scope))
            .cloned()
            .collect())
    }

    async fn delete_all(&self, ids: &[M::Id]) -> Result<u64, CoreError> {
        let mut table = self.table.lock().await;
        let removed = ids
            .iter()
            .filter(|id| table.rows.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }

    async fn save(&self, row: &mut M) -> Result<(), CoreError> {
        let mut table = self.table.lock().await;
        match row.id() {
            Some(id) => match table.rows.get_mut(&id) {
                Some(stored) => *stored = row.clone(),
                None => {
                    return Err(CoreError::NotFound {
                        entity: M::form_name(),
                        id,
                    })
                }
            },
            None => {
                let id = table.next_id;
                table.next_id += 1;
                row.set_id(id);
                table.rows.insert(id, row.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Persistable;
    use crate::test_support::DummyRow;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn find_all_filters_by_scope() {
        let store = MemoryStore::with_rows(vec![
            DummyRow::stored(1, 7, "a"),
            DummyRow::stored(2, 8, "b"),
            DummyRow::stored(3, 7, "c"),
        ]);

        let rows = store.find_all(&7).await.unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![Some(1), Some(3)]);
    }

    #[tokio::test]
    async fn save_inserts_then_updates() {
        let store = MemoryStore::with_rows(vec![DummyRow::stored(4, 1, "seed")]);

        let mut row = DummyRow::in_scope(&1);
        row.name = "new".to_string();
        store.save(&mut row).await.unwrap();
        assert_eq!(row.id, Some(5));

        row.name = "renamed".to_string();
        store.save(&mut row).await.unwrap();
        let rows = store.snapshot().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "renamed");
    }

    #[tokio::test]
    async fn save_of_vanished_row_is_not_found() {
        let store = MemoryStore::<DummyRow>::new();
        let mut row = DummyRow::stored(9, 1, "ghost");
        assert_matches!(
            store.save(&mut row).await,
            Err(CoreError::NotFound { id: 9, .. })
        );
    }

    #[tokio::test]
    async fn delete_all_counts_removed_rows() {
        let store = MemoryStore::with_rows(vec![
            DummyRow::stored(1, 1, "a"),
            DummyRow::stored(2, 1, "b"),
        ]);
        assert_eq!(store.delete_all(&[2, 3]).await.unwrap(), 1);
        assert_eq!(store.len().await, 1);
    }
}
