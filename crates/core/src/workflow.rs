//! The multi-row save cycle.
//!
//! ```text
//! load existing -> (no submission) -> Display
//!               -> (submission)    -> reconcile -> load -> delete removed
//!                                     -> validate -> Persisted | Display(errors)
//! ```
//!
//! Rows the user removed are deleted *before* the remaining rows are
//! validated, and that deletion is not undone when validation then fails.
//! Callers that need all-or-nothing semantics must supply a store that
//! provides it.

use crate::error::CoreError;
use crate::flash::{Flash, ROWS_SAVED_MESSAGE};
use crate::model::RowModel;
use crate::reconcile::{collect_ids, create_multiple, load_multiple, removed_ids, validate_multiple};
use crate::store::RowStore;
use crate::submission::Submission;
use crate::validation::BatchErrors;

type BeforeSave<M> = Box<dyn Fn(&mut M) + Send + Sync>;
type AfterSave<M> = Box<dyn Fn(&M) + Send + Sync>;

/// Optional per-row callbacks around each save.
///
/// `before_save` typically stamps the parent foreign key; `after_save` is
/// for side effects. Each runs once per row, in row order.
pub struct SaveHooks<M> {
    before_save: Option<BeforeSave<M>>,
    after_save: Option<AfterSave<M>>,
}

impl<M> Default for SaveHooks<M> {
    fn default() -> Self {
        Self {
            before_save: None,
            after_save: None,
        }
    }
}

impl<M> SaveHooks<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_save(mut self, hook: impl Fn(&mut M) + Send + Sync + 'static) -> Self {
        self.before_save = Some(Box::new(hook));
        self
    }

    pub fn after_save(mut self, hook: impl Fn(&M) + Send + Sync + 'static) -> Self {
        self.after_save = Some(Box::new(hook));
        self
    }
}

/// Result of one pass through the workflow.
#[derive(Debug)]
pub enum WorkflowOutcome<M> {
    /// Render the form with `rows`. `errors` is empty on a plain page load.
    Display { rows: Vec<M>, errors: BatchErrors },
    /// Every row was valid and saved.
    Persisted {
        rows: Vec<M>,
        deleted: u64,
        flash: Flash,
    },
}

/// Runs the save cycle for one row type against a [`RowStore`].
pub struct MultiRowWorkflow<'a, M: RowModel> {
    store: &'a dyn RowStore<M>,
}

impl<'a, M: RowModel> MultiRowWorkflow<'a, M> {
    pub fn new(store: &'a dyn RowStore<M>) -> Self {
        Self { store }
    }

    /// Rows to show when nothing was submitted: the stored rows of `scope`,
    /// or a single blank row in that scope when there are none.
    pub async fn current_rows(&self, scope: &M::Scope) -> Result<Vec<M>, CoreError> {
        let mut rows = self.store.find_all(scope).await?;
        tracing::debug!(form = M::form_name(), scope = ?scope, count = rows.len(), "Loaded stored rows");
        if rows.is_empty() {
            rows.push(M::in_scope(scope));
        }
        Ok(rows)
    }

    pub async fn run(
        &self,
        scope: &M::Scope,
        submission: Submission,
        hooks: &SaveHooks<M>,
    ) -> Result<WorkflowOutcome<M>, CoreError> {
        let existing = self.current_rows(scope).await?;

        let submitted = match submission {
            Submission::Absent => {
                return Ok(WorkflowOutcome::Display {
                    rows: existing,
                    errors: BatchErrors::default(),
                })
            }
            Submission::Posted(rows) => rows,
        };

        let old_ids = collect_ids(&existing);
        let mut rows = create_multiple(existing, &submitted);
        load_multiple(&mut rows, &submitted);
        let new_ids = collect_ids(&rows);

        let removed = removed_ids(&old_ids, &new_ids);
        let deleted = if removed.is_empty() {
            0
        } else {
            let deleted = self.store.delete_all(&removed).await?;
            tracing::info!(form = M::form_name(), ids = ?removed, deleted, "Deleted removed rows");
            deleted
        };

        let errors = validate_multiple(&rows);
        if !errors.is_valid() {
            tracing::info!(
                form = M::form_name(),
                submitted = rows.len(),
                invalid = errors.len(),
                "Batch failed validation, nothing saved",
            );
            return Ok(WorkflowOutcome::Display { rows, errors });
        }

        for row in &mut rows {
            if let Some(hook) = &hooks.before_save {
                hook(&mut *row);
            }
            self.store.save(&mut *row).await?;
            if let Some(hook) = &hooks.after_save {
                hook(&*row);
            }
        }

        tracing::info!(form = M::form_name(), saved = rows.len(), deleted, "Batch saved");

        Ok(WorkflowOutcome::Persisted {
            rows,
            deleted,
            flash: Flash::success(ROWS_SAVED_MESSAGE),
        })
    }
}
