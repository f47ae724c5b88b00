//! Integration tests for the server-rendered checklist item form.

mod common;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use common::{
    body_text, build_empty_app, build_test_app, get, get_with_cookie, post_form, set_cookie_pair,
    stored_item,
};
use rowset_core::store::MemoryStore;
use rowset_db::models::checklist_item::ChecklistItem;

const FORM_URL: &str = "/checklists/1/items";

fn seeded(rows: Vec<ChecklistItem>) -> Arc<MemoryStore<ChecklistItem>> {
    Arc::new(MemoryStore::with_rows(rows))
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_empty_checklist_renders_one_blank_row() {
    let response = get(build_empty_app(), FORM_URL).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="ChecklistItem[0][name]" value="""#));
    assert!(html.contains(r#"name="ChecklistItem[0][id]" value="""#));
    assert!(!html.contains(r#"name="ChecklistItem[1][name]""#));
    assert!(html.contains(r#"action="/checklists/1/items""#));
}

#[tokio::test]
async fn test_stored_items_of_the_checklist_are_rendered_in_order() {
    let store = seeded(vec![
        stored_item(1, 1, "Scalpel"),
        stored_item(2, 2, "Other checklist"),
        stored_item(3, 1, "Forceps"),
    ]);
    let html = body_text(get(build_test_app(store), FORM_URL).await).await;

    assert!(html.contains(r#"name="ChecklistItem[0][name]" value="Scalpel""#));
    assert!(html.contains(r#"name="ChecklistItem[0][id]" value="1""#));
    assert!(html.contains(r#"name="ChecklistItem[1][name]" value="Forceps""#));
    assert!(html.contains(r#"name="ChecklistItem[1][id]" value="3""#));
    assert!(!html.contains("Other checklist"));
}

#[tokio::test]
async fn test_non_numeric_checklist_id_is_rejected() {
    let response = get(build_empty_app(), "/checklists/abc/items").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_valid_submission_redirects_with_flash_and_persists() {
    let store = seeded(Vec::new());
    let app = build_test_app(Arc::clone(&store));

    let response = post_form(
        app,
        FORM_URL,
        &[
            ("ChecklistItem[0][id]", ""),
            ("ChecklistItem[0][name]", "Scalpel"),
            ("ChecklistItem[1][id]", ""),
            ("ChecklistItem[1][name]", "Forceps"),
            ("ChecklistItem[1][note]", "sterile pack"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], FORM_URL);
    let cookie = set_cookie_pair(&response).expect("flash cookie must be set");
    assert!(cookie.starts_with("rowset_flash="));

    let rows = store.snapshot().await;
    let saved: Vec<_> = rows
        .iter()
        .map(|r| (r.id, r.checklist_id, r.name.as_str(), r.note.as_str()))
        .collect();
    assert_eq!(
        saved,
        vec![
            (Some(1), 1, "Scalpel", ""),
            (Some(2), 1, "Forceps", "sterile pack"),
        ]
    );
}

#[tokio::test]
async fn test_flash_is_shown_once_after_redirect() {
    let store = seeded(Vec::new());
    let app = build_test_app(store);

    let response = post_form(
        app.clone(),
        FORM_URL,
        &[("ChecklistItem[0][name]", "Scalpel")],
    )
    .await;
    let cookie = set_cookie_pair(&response).unwrap();

    let response = get_with_cookie(app.clone(), FORM_URL, &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let removal = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(removal.starts_with("rowset_flash="));
    assert!(removal.contains("Max-Age=0"));
    let html = body_text(response).await;
    assert!(html.contains("Records saved successfully."));
    assert!(html.contains(r#"value="Scalpel""#));

    let html = body_text(get(app, FORM_URL).await).await;
    assert!(!html.contains("Records saved successfully."));
}

#[tokio::test]
async fn test_invalid_row_rerenders_form_and_saves_nothing() {
    let store = seeded(Vec::new());
    let app = build_test_app(Arc::clone(&store));

    let response = post_form(
        app,
        FORM_URL,
        &[
            ("ChecklistItem[0][id]", ""),
            ("ChecklistItem[0][name]", "Valido"),
            ("ChecklistItem[1][id]", ""),
            ("ChecklistItem[1][name]", ""),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let html = body_text(response).await;
    assert!(html.contains(r#"name="ChecklistItem[0][name]" value="Valido""#));
    assert!(html.contains(r#"class="form-control is-invalid" id="checklistitem-1-name""#));
    assert!(html.contains("Name cannot be blank."));
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_submission_updates_inserts_and_deletes_rows() {
    let store = seeded(vec![stored_item(10, 1, "A"), stored_item(20, 1, "B")]);
    let app = build_test_app(Arc::clone(&store));

    let response = post_form(
        app,
        FORM_URL,
        &[
            ("ChecklistItem[0][id]", "10"),
            ("ChecklistItem[0][name]", "A2"),
            ("ChecklistItem[1][id]", ""),
            ("ChecklistItem[1][name]", "C"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let rows = store.snapshot().await;
    let saved: Vec<_> = rows.iter().map(|r| (r.id, r.name.as_str())).collect();
    assert_eq!(saved, vec![(Some(10), "A2"), (Some(21), "C")]);
}

#[tokio::test]
async fn test_foreign_id_is_saved_as_new_row_in_this_checklist() {
    let store = seeded(vec![stored_item(5, 2, "Not yours")]);
    let app = build_test_app(Arc::clone(&store));

    post_form(
        app,
        FORM_URL,
        &[("ChecklistItem[0][id]", "5"), ("ChecklistItem[0][name]", "Hijack")],
    )
    .await;

    let rows = store.snapshot().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Not yours");
    assert_eq!((rows[1].id, rows[1].checklist_id), (Some(6), 1));
}

#[tokio::test]
async fn test_fields_outside_the_form_scope_are_ignored() {
    let store = seeded(Vec::new());
    let app = build_test_app(Arc::clone(&store));

    post_form(
        app,
        FORM_URL,
        &[
            ("ChecklistItem[0][name]", "Scalpel"),
            ("ChecklistItem[0][checklist_id]", "99"),
            ("Other[0][name]", "ignored"),
            ("_csrf", "token"),
        ],
    )
    .await;

    let rows = store.snapshot().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].checklist_id, 1);
}

#[tokio::test]
async fn test_removing_every_row_deletes_the_stored_items() {
    let store = seeded(vec![stored_item(1, 1, "A"), stored_item(2, 1, "B")]);
    let app = build_test_app(Arc::clone(&store));

    let response = post_form(app, FORM_URL, &[]).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_invalid_submission_reports_that_removed_rows_are_gone() {
    let store = seeded(vec![stored_item(1, 1, "keep"), stored_item(2, 1, "drop")]);
    let app = build_test_app(Arc::clone(&store));

    let response = post_form(
        app,
        FORM_URL,
        &[("ChecklistItem[0][id]", "1"), ("ChecklistItem[0][name]", "")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Changes were not saved; removed rows were already deleted."));

    let rows = store.snapshot().await;
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].id, rows[0].name.as_str()), (Some(1), "keep"));
}
