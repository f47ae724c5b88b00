//! Handlers for editing the items of a checklist as one batch.
//!
//! The HTML pair (`show_form` / `submit_form`) follows post/redirect/get:
//! a valid submission redirects back to the form with a flash message, an
//! invalid one re-renders the submitted rows with their errors. The JSON
//! pair exposes the same workflow under `/api/v1`.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;
use rowset_core::flash::Flash;
use rowset_core::model::Loadable;
use rowset_core::submission::Submission;
use rowset_core::types::DbId;
use rowset_core::validation::BatchErrors;
use rowset_core::workflow::{MultiRowWorkflow, SaveHooks, WorkflowOutcome};
use rowset_db::models::checklist_item::ChecklistItem;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::flash::{set_flash, take_flash};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::multi_row::{render_multi_row_form, FormPage};

const FORM_TITLE: &str = "Checklist items";

fn form_action(checklist_id: DbId) -> String {
    format!("/checklists/{checklist_id}/items")
}

/// Every saved row belongs to the checklist in the URL, whatever was posted.
fn stamp_checklist(checklist_id: DbId) -> SaveHooks<ChecklistItem> {
    SaveHooks::new().before_save(move |item: &mut ChecklistItem| item.checklist_id = checklist_id)
}

fn render_page(
    checklist_id: DbId,
    rows: &[ChecklistItem],
    errors: &BatchErrors,
    flash: Option<&Flash>,
) -> Html<String> {
    let action = form_action(checklist_id);
    Html(render_multi_row_form(&FormPage {
        title: FORM_TITLE,
        action: &action,
        rows,
        errors,
        flash,
    }))
}

// ---------------------------------------------------------------------------
// HTML form
// ---------------------------------------------------------------------------

/// GET /checklists/{checklist_id}/items
///
/// Render the stored items, or one blank row when there are none. Shows and
/// clears any pending flash message.
pub async fn show_form(
    State(state): State<AppState>,
    Path(checklist_id): Path<DbId>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let (jar, flash) = take_flash(jar);
    let rows = MultiRowWorkflow::new(state.items.as_ref())
        .current_rows(&checklist_id)
        .await?;

    let page = render_page(checklist_id, &rows, &BatchErrors::default(), flash.as_ref());
    Ok((jar, page))
}

/// POST /checklists/{checklist_id}/items
///
/// Reconcile the posted rows with the stored ones and save them. Responds
/// with a 303 back to the form on success, or the re-rendered form (200)
/// when any row is invalid.
pub async fn submit_form(
    State(state): State<AppState>,
    Path(checklist_id): Path<DbId>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let submission = Submission::from_form_pairs(ChecklistItem::form_name(), &pairs);

    let outcome = MultiRowWorkflow::new(state.items.as_ref())
        .run(&checklist_id, submission, &stamp_checklist(checklist_id))
        .await?;

    match outcome {
        WorkflowOutcome::Persisted { flash, .. } => {
            let jar = set_flash(jar, &flash, state.config.secure_cookies);
            Ok((jar, Redirect::to(&form_action(checklist_id))).into_response())
        }
        WorkflowOutcome::Display { rows, errors } => {
            tracing::debug!(checklist_id, invalid = errors.len(), "Re-rendering checklist form");
            Ok(render_page(checklist_id, &rows, &errors, None).into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// JSON API
// ---------------------------------------------------------------------------

/// Request body for a batch save.
#[derive(Debug, Deserialize)]
pub struct SaveBatchRequest {
    /// Each row is a flat object of attribute values, e.g.
    /// `{"id": 3, "name": "Scalpel"}`.
    #[serde(default)]
    pub rows: Vec<serde_json::Value>,
}

/// Response body for a successful batch save.
#[derive(Debug, Serialize)]
pub struct SaveBatchResponse {
    pub rows: Vec<ChecklistItem>,
    pub deleted: u64,
    pub message: String,
}

/// GET /api/v1/checklists/{checklist_id}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path(checklist_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let items = state.items.find_all(&checklist_id).await?;

    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/checklists/{checklist_id}/items
///
/// Same workflow as the HTML form. Invalid batches return 422 with errors
/// keyed by row position.
pub async fn save_items(
    State(state): State<AppState>,
    Path(checklist_id): Path<DbId>,
    Json(input): Json<SaveBatchRequest>,
) -> AppResult<impl IntoResponse> {
    let submission = Submission::from_json_rows(&input.rows)?;

    let outcome = MultiRowWorkflow::new(state.items.as_ref())
        .run(&checklist_id, submission, &stamp_checklist(checklist_id))
        .await?;

    match outcome {
        WorkflowOutcome::Persisted {
            rows,
            deleted,
            flash,
        } => Ok(Json(DataResponse {
            data: SaveBatchResponse {
                rows,
                deleted,
                message: flash.message,
            },
        })),
        WorkflowOutcome::Display { errors, .. } => Err(AppError::RowValidation(errors)),
    }
}
