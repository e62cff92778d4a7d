//! Resolution: selector to concrete evaluation id set.

use std::collections::HashSet;

use evalctl_state::{EvalId, EvaluationStore};
use tracing::{debug, instrument};

use super::error::EvalDeleteError;
use super::selector::Selector;
use crate::obs;

/// The ids a delete will submit, together with how they were chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionSet {
    pub selector: Selector,
    pub ids: Vec<EvalId>,
}

impl DeletionSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Resolve a selector.
///
/// - `ById` is taken as-is without a lookup; a missing record surfaces from
///   the delete call instead.
/// - `ByFilter` lists matching evaluations server-side. No matches yields an
///   empty set, not an error. Duplicates across pages are collapsed.
#[instrument(skip(store), fields(mode = selector.mode()))]
pub async fn resolve(
    store: &dyn EvaluationStore,
    selector: Selector,
) -> Result<DeletionSet, EvalDeleteError> {
    let ids = match &selector {
        Selector::ById(id) => vec![id.clone()],
        Selector::ByFilter(expr) => {
            let records = store.list_evaluations(Some(expr.as_str())).await.map_err(|e| {
                EvalDeleteError::from_api(
                    format!("Error listing evaluations matching filter {expr:?}"),
                    e,
                )
            })?;
            debug!(matched = records.len(), "Listed evaluations for filter");

            let mut seen = HashSet::new();
            records
                .into_iter()
                .map(|r| r.id)
                .filter(|id| seen.insert(id.clone()))
                .collect()
        }
    };

    obs::emit_resolved(&selector, ids.len());
    Ok(DeletionSet { selector, ids })
}
