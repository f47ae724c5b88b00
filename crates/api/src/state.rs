use std::sync::Arc;

use rowset_core::store::RowStore;
use rowset_db::models::checklist_item::ChecklistItem;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Checklist item storage (Postgres in production, in-memory otherwise).
    pub items: Arc<dyn RowStore<ChecklistItem>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
