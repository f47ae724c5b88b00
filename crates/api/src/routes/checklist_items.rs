use axum::routing::get;
use axum::Router;

use crate::handlers::checklist_items;
use crate::state::AppState;

/// HTML form routes, mounted at `/checklists`.
///
/// ```text
/// GET  /{checklist_id}/items    render form
/// POST /{checklist_id}/items    save rows
/// ```
pub fn form_router() -> Router<AppState> {
    Router::new().route(
        "/{checklist_id}/items",
        get(checklist_items::show_form).post(checklist_items::submit_form),
    )
}

/// JSON routes, mounted at `/api/v1/checklists`.
///
/// ```text
/// GET  /{checklist_id}/items    list stored items
/// POST /{checklist_id}/items    save batch
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new().route(
        "/{checklist_id}/items",
        get(checklist_items::list_items).post(checklist_items::save_items),
    )
}
