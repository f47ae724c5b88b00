//! Reconcile submitted rows against rows already in storage.
//!
//! The functions here decide identity and instantiation only. Nothing is
//! validated or persisted; see [`crate::workflow`] for the full save cycle.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::model::{Identifiable, Loadable, Validatable};
use crate::submission::SubmittedRow;
use crate::validation::BatchErrors;

/// Build the list of instances that the submitted rows will be loaded into.
///
/// Existing instances are indexed by their (non-empty) id. Each submitted row
/// whose id matches an indexed instance receives that instance, moved in with
/// its stored values intact; every other row gets `M::default()`. Ids that
/// match nothing (stale, foreign, unparsable) silently produce a new row.
///
/// The result has exactly one entry per submitted row. With no submitted
/// rows the result is empty, whatever `existing` holds.
///
/// When the same id is submitted more than once, the first row takes the
/// stored instance and later rows get a copy of it.
pub fn create_multiple<M>(existing: Vec<M>, submitted: &[SubmittedRow]) -> Vec<M>
where
    M: Identifiable + Default + Clone,
{
    if submitted.is_empty() {
        return Vec::new();
    }

    let mut indexed: HashMap<M::Id, M> = existing
        .into_iter()
        .filter_map(|model| model.id().map(|id| (id, model)))
        .collect();
    let mut claimed: HashMap<M::Id, usize> = HashMap::new();

    let mut models: Vec<M> = Vec::with_capacity(submitted.len());
    for row in submitted {
        let id = row
            .id_value()
            .and_then(|raw| raw.parse::<M::Id>().ok());

        let model = match id {
            Some(id) => match indexed.remove(&id) {
                Some(stored) => {
                    claimed.insert(id, models.len());
                    stored
                }
                None => match claimed.get(&id) {
                    Some(&position) => models[position].clone(),
                    None => M::default(),
                },
            },
            None => M::default(),
        };
        models.push(model);
    }
    models
}

/// Load submitted rows into `models` by position.
///
/// Returns `true` if any row assigned at least one attribute.
pub fn load_multiple<M: Loadable>(models: &mut [M], rows: &[SubmittedRow]) -> bool {
    let mut loaded = false;
    for (model, row) in models.iter_mut().zip(rows) {
        loaded |= model.load(row);
    }
    loaded
}

/// Validate every model. All rows are checked so each one carries its own
/// error state, even after an earlier failure.
pub fn validate_multiple<M: Validatable>(models: &[M]) -> BatchErrors {
    let mut errors = BatchErrors::default();
    for (index, model) in models.iter().enumerate() {
        if let Err(row_errors) = model.validate_row() {
            errors.insert(index, row_errors);
        }
    }
    errors
}

/// Ids of the models that have one.
pub fn collect_ids<M: Identifiable>(models: &[M]) -> Vec<M::Id> {
    models.iter().filter_map(|model| model.id()).collect()
}

/// Ids in `old` that are absent from `new`, in `old` order.
pub fn removed_ids<Id: Copy + Eq + Hash>(old: &[Id], new: &[Id]) -> Vec<Id> {
    let kept: HashSet<Id> = new.iter().copied().collect();
    let mut seen = HashSet::new();
    old.iter()
        .copied()
        .filter(|id| !kept.contains(id) && seen.insert(*id))
        .collect()
}
