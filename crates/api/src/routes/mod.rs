pub mod checklist_items;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /checklists/{checklist_id}/items     list, save batch
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/checklists", checklist_items::api_router())
}
