//! In-memory fakes for collaborator traits (testing only)
//!
//! Provides `MemoryCluster`, which satisfies both `SchedulerOperator` and
//! `EvaluationStore` without any network, and counts every call so tests can
//! assert which round trips an operation made.

mod filter;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api_traits::{ApiResult, EvaluationStore, SchedulerOperator};
use crate::error::ApiError;
use crate::schema::{EvalId, EvaluationRecord, SchedulerConfig};

use filter::Filter;

/// Snapshot of how many times each collaborator operation was invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub config_reads: usize,
    pub list_calls: usize,
    pub delete_calls: usize,
}

impl CallCounts {
    /// Total network round trips the operation would have made.
    pub fn total(&self) -> usize {
        self.config_reads + self.list_calls + self.delete_calls
    }
}

#[derive(Debug, Default)]
struct ClusterState {
    config: SchedulerConfig,
    // insertion order doubles as list order
    evals: Vec<EvaluationRecord>,
}

/// In-memory cluster with a scheduler config and an evaluation table.
#[derive(Debug, Default)]
pub struct MemoryCluster {
    state: Mutex<ClusterState>,
    unreachable: AtomicBool,
    config_reads: AtomicUsize,
    list_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the broker pause flag, as an operator would out of band.
    pub fn set_pause_eval_broker(&self, paused: bool) {
        let mut state = self.state.lock().unwrap();
        state.config.pause_eval_broker = paused;
        state.config.modify_index += 1;
    }

    /// Make every subsequent call fail with `ApiError::Transport`.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Insert an evaluation record verbatim.
    pub fn insert(&self, record: EvaluationRecord) -> EvalId {
        let id = record.id.clone();
        let mut state = self.state.lock().unwrap();
        state.evals.push(record);
        id
    }

    /// Simulate a job registration: enqueue one pending evaluation.
    pub fn register_job(&self, job_id: &str) -> EvalId {
        self.insert(EvaluationRecord::pending_for_job(job_id))
    }

    /// All evaluations currently held, in insertion order.
    pub fn evaluations(&self) -> Vec<EvaluationRecord> {
        self.state.lock().unwrap().evals.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().evals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn calls(&self) -> CallCounts {
        CallCounts {
            config_reads: self.config_reads.load(Ordering::SeqCst),
            list_calls: self.list_calls.load(Ordering::SeqCst),
            delete_calls: self.delete_calls.load(Ordering::SeqCst),
        }
    }

    fn check_reachable(&self) -> ApiResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(ApiError::Transport(
                "dial tcp 127.0.0.1:4646: connect: connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SchedulerOperator for MemoryCluster {
    async fn scheduler_config(&self) -> ApiResult<SchedulerConfig> {
        self.config_reads.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(self.state.lock().unwrap().config.clone())
    }
}

#[async_trait]
impl EvaluationStore for MemoryCluster {
    async fn list_evaluations(&self, filter: Option<&str>) -> ApiResult<Vec<EvaluationRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;

        let filter = match filter {
            Some(expr) => Some(Filter::parse(expr).map_err(|e| ApiError::Api {
                status: 400,
                message: format!("failed to read filter expression: {e}"),
            })?),
            None => None,
        };

        let state = self.state.lock().unwrap();
        let mut out = Vec::new();
        for record in &state.evals {
            let keep = match &filter {
                Some(f) => f.matches(&serde_json::to_value(record)?),
                None => true,
            };
            if keep {
                out.push(record.clone());
            }
        }
        Ok(out)
    }

    async fn delete_evaluations(&self, ids: &[EvalId]) -> ApiResult<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;

        if ids.is_empty() {
            return Ok(0);
        }

        let mut state = self.state.lock().unwrap();
        let before = state.evals.len();
        state.evals.retain(|e| !ids.contains(&e.id));
        let removed = (before - state.evals.len()) as u64;

        if removed == 0 {
            return Err(ApiError::NotFound {
                message: "eval not found".to_string(),
            });
        }
        Ok(removed)
    }
}
