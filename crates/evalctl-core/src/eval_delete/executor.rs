//! Deletion executor: one batch request per invocation.

use evalctl_state::EvaluationStore;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::error::EvalDeleteError;
use super::resolve::DeletionSet;
use super::selector::Selector;
use crate::obs;

/// Result of a successful delete. Returned by value; never stored on the
/// command, so repeated runs cannot see each other's counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletionOutcome {
    /// Ids submitted in the batch
    pub requested: usize,
    /// Records the server actually removed; may trail `requested` when
    /// another operator deleted some of them first
    pub deleted: u64,
}

/// Submit the whole set as a single delete.
///
/// An empty set short-circuits to zero without a request. Under a filter
/// selector, `NotFound` means every listed record vanished between list and
/// delete, and is reported as zero deletions rather than a failure.
#[instrument(skip(store, set), fields(mode = set.selector.mode(), requested = set.len()))]
pub async fn execute(
    store: &dyn EvaluationStore,
    set: &DeletionSet,
) -> Result<DeletionOutcome, EvalDeleteError> {
    if set.is_empty() {
        debug!("Nothing to delete");
        obs::emit_deleted(0, 0);
        return Ok(DeletionOutcome::default());
    }

    let deleted = match store.delete_evaluations(&set.ids).await {
        Ok(n) => n,
        Err(e) if e.is_not_found() && matches!(set.selector, Selector::ByFilter(_)) => {
            warn!(error = %e, "Filtered evaluations were already gone");
            0
        }
        Err(e) => {
            let context = match &set.selector {
                Selector::ById(id) => format!("Error deleting evaluation {id}"),
                Selector::ByFilter(expr) => {
                    format!("Error deleting evaluations matching filter {expr:?}")
                }
            };
            return Err(EvalDeleteError::from_api(context, e));
        }
    };

    obs::emit_deleted(set.len(), deleted);
    Ok(DeletionOutcome {
        requested: set.len(),
        deleted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval_delete::ErrorKind;
    use evalctl_state::fakes::MemoryCluster;
    use evalctl_state::EvalId;

    fn by_filter(ids: Vec<EvalId>) -> DeletionSet {
        DeletionSet {
            selector: Selector::ByFilter(r#"JobID == "web""#.into()),
            ids,
        }
    }

    #[tokio::test]
    async fn empty_set_makes_no_request() {
        let cluster = MemoryCluster::new();
        let outcome = execute(&cluster, &by_filter(vec![])).await.unwrap();

        assert_eq!(outcome, DeletionOutcome::default());
        assert_eq!(cluster.calls().delete_calls, 0);
    }

    #[tokio::test]
    async fn whole_set_goes_in_one_request() {
        let cluster = MemoryCluster::new();
        let ids = vec![cluster.register_job("web"), cluster.register_job("web")];

        let outcome = execute(&cluster, &by_filter(ids)).await.unwrap();
        assert_eq!(
            outcome,
            DeletionOutcome {
                requested: 2,
                deleted: 2
            }
        );
        assert_eq!(cluster.calls().delete_calls, 1);
        assert!(cluster.is_empty());
    }

    #[tokio::test]
    async fn missing_id_is_not_found_with_context() {
        let cluster = MemoryCluster::new();
        let set = DeletionSet {
            selector: Selector::ById(EvalId::from("abc")),
            ids: vec![EvalId::from("abc")],
        };

        let err = execute(&cluster, &set).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Error deleting evaluation abc: eval not found");
    }

    #[tokio::test]
    async fn vanished_filter_matches_count_as_zero() {
        let cluster = MemoryCluster::new();
        let outcome = execute(&cluster, &by_filter(vec![EvalId::from("gone")]))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DeletionOutcome {
                requested: 1,
                deleted: 0
            }
        );
    }

    #[tokio::test]
    async fn partial_concurrent_removal_reports_actual_count() {
        let cluster = MemoryCluster::new();
        let live = cluster.register_job("web");

        let outcome = execute(&cluster, &by_filter(vec![live, EvalId::from("gone")]))
            .await
            .unwrap();
        assert_eq!(outcome.requested, 2);
        assert_eq!(outcome.deleted, 1);
    }
}
