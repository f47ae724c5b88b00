//! Multi-row tabular form.
//!
//! One table row per instance, one text input per safe attribute, a hidden
//! id field and a remove button. A blank `<template>` row backs the "Add
//! row" button; the inline script renumbers every row after an add or a
//! remove so indices stay contiguous from zero on submit.

use std::fmt::Write;

use rowset_core::flash::{Flash, FlashLevel};
use rowset_core::model::{Loadable, ID_ATTRIBUTE};
use rowset_core::validation::{BatchErrors, FieldErrors};

use super::html_escape;

/// Index placeholder used in the template row.
pub const INDEX_PLACEHOLDER: &str = "__index__";

/// Everything needed to render one multi-row form page.
pub struct FormPage<'a, M> {
    pub title: &'a str,
    /// URL the form posts back to.
    pub action: &'a str,
    pub rows: &'a [M],
    pub errors: &'a BatchErrors,
    pub flash: Option<&'a Flash>,
}

/// Render a complete HTML document for `page`.
pub fn render_multi_row_form<M: Loadable + Default>(page: &FormPage<'_, M>) -> String {
    let title = html_escape(page.title);
    let action = html_escape(page.action);

    let mut header = String::new();
    for attribute in M::safe_attributes() {
        let _ = write!(header, "<th>{}</th>", html_escape(&M::attribute_label(attribute)));
    }

    let mut body = String::new();
    for (index, row) in page.rows.iter().enumerate() {
        body.push_str(&render_row(&index.to_string(), row, page.errors.for_row(index)));
    }

    let template_row = render_row(INDEX_PLACEHOLDER, &M::default(), None);

    let flash = page.flash.map(render_flash).unwrap_or_default();

    let summary = if page.errors.is_valid() {
        String::new()
    } else {
        render_flash(&Flash::error(format!(
            "{} row(s) need attention. Changes were not saved; removed rows were already deleted.",
            page.errors.len()
        )))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLES}</style>
</head>
<body>
<main class="multi-row-form">
<h1>{title}</h1>
{flash}{summary}
<form method="post" action="{action}">
<table class="table" id="multi-row-table">
<thead><tr>{header}<th></th></tr></thead>
<tbody>
{body}</tbody>
</table>
<template id="multi-row-template">{template_row}</template>
<div class="actions">
<button type="button" id="add-row">Add row</button>
<button type="submit" class="primary">Save</button>
</div>
</form>
</main>
<script>{SCRIPT}</script>
</body>
</html>"#
    )
}

fn render_flash(flash: &Flash) -> String {
    let role = match flash.level {
        FlashLevel::Success => "status",
        FlashLevel::Error => "alert",
    };
    format!(
        r#"<div class="alert alert-{level}" role="{role}">{message}</div>"#,
        level = flash.level.as_str(),
        message = html_escape(&flash.message),
    )
}

fn render_row<M: Loadable>(index: &str, row: &M, errors: Option<&FieldErrors>) -> String {
    let form = M::form_name();
    let prefix = form.to_ascii_lowercase();

    let mut cells = String::new();
    for attribute in M::safe_attributes() {
        let value = row.attribute(attribute).unwrap_or_default();
        let message = errors.and_then(|e| e.first(attribute));
        let label = html_escape(&M::attribute_label(attribute));
        let class = if message.is_some() {
            "form-control is-invalid"
        } else {
            "form-control"
        };

        let _ = write!(
            cells,
            r#"<td><input type="text" class="{class}" id="{prefix}-{index}-{attribute}" name="{form}[{index}][{attribute}]" value="{value}" aria-label="{label}">"#,
            value = html_escape(&value),
        );
        if let Some(message) = message {
            let _ = write!(cells, r#"<div class="invalid-feedback">{}</div>"#, html_escape(message));
        }
        cells.push_str("</td>");
    }

    let id = row.attribute(ID_ATTRIBUTE).unwrap_or_default();
    format!(
        r#"<tr class="multi-row-item">{cells}<td><input type="hidden" name="{form}[{index}][{ID_ATTRIBUTE}]" value="{id}"><button type="button" class="remove-row" aria-label="Remove row">&times;</button></td></tr>
"#,
        id = html_escape(&id),
    )
}

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #1f2933; }
.multi-row-form { max-width: 960px; }
.table { width: 100%; border-collapse: collapse; margin-bottom: 1rem; }
.table th { text-align: left; padding: 0.5rem; border-bottom: 2px solid #cbd2d9; }
.table td { padding: 0.5rem; vertical-align: top; border-bottom: 1px solid #e4e7eb; }
.form-control { width: 100%; padding: 0.375rem; border: 1px solid #9aa5b1; border-radius: 4px; }
.form-control.is-invalid { border-color: #d64545; }
.invalid-feedback { color: #d64545; font-size: 0.875rem; margin-top: 0.25rem; }
.alert { padding: 0.75rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
.alert-success { background: #e3f9e5; color: #0e5814; }
.alert-error { background: #ffe3e3; color: #8a041a; }
.actions { display: flex; gap: 0.5rem; }
button { padding: 0.5rem 1rem; border-radius: 4px; border: 1px solid #9aa5b1; background: #fff; cursor: pointer; }
button.primary { background: #2186eb; border-color: #2186eb; color: #fff; }
.remove-row { color: #d64545; }
"#;

const SCRIPT: &str = r#"
(function () {
  var body = document.getElementById('multi-row-table').tBodies[0];
  var template = document.getElementById('multi-row-template');

  function renumber() {
    Array.prototype.forEach.call(body.rows, function (row, index) {
      row.querySelectorAll('[name]').forEach(function (el) {
        el.name = el.name.replace(/\[(\d+|__index__)\]/, '[' + index + ']');
      });
      row.querySelectorAll('[id]').forEach(function (el) {
        el.id = el.id.replace(/-(\d+|__index__)-/, '-' + index + '-');
      });
    });
  }

  document.getElementById('add-row').addEventListener('click', function () {
    var row = template.content.firstElementChild.cloneNode(true);
    row.querySelectorAll('input').forEach(function (el) { el.value = ''; });
    body.appendChild(row);
    renumber();
  });

  body.addEventListener('click', function (event) {
    var button = event.target.closest('.remove-row');
    if (!button) { return; }
    button.closest('tr').remove();
    renumber();
  });
})();
"#;
