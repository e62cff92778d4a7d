//! Collaborator trait definitions for evalctl
//!
//! These traits define the control-plane operations the command consumes:
//! - `SchedulerOperator`: scheduler configuration reads
//! - `EvaluationStore`: evaluation listing and batch deletion
//!
//! All traits are async and transport-agnostic. An in-memory fake is provided
//! for testing via the `fakes` module.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::schema::{EvalId, EvaluationRecord, SchedulerConfig};

/// Result type for control-plane operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Read access to the scheduler's operator configuration.
#[async_trait]
pub trait SchedulerOperator: Send + Sync {
    /// Fetch the current scheduler configuration. Never cached.
    async fn scheduler_config(&self) -> ApiResult<SchedulerConfig>;
}

/// Evaluation records held in the scheduler's durable state.
///
/// Guarantees:
/// - `list_evaluations(Some(expr))` applies `expr` server-side; a malformed
///   expression is rejected by the server, not the caller.
/// - `delete_evaluations(ids)` is one atomic mutation and returns how many
///   of `ids` were actually removed.
/// - Deleting an id set of which nothing exists fails with
///   `ApiError::NotFound`.
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    /// List evaluations, optionally narrowed by a filter expression.
    async fn list_evaluations(&self, filter: Option<&str>) -> ApiResult<Vec<EvaluationRecord>>;

    /// Delete the given evaluations in a single request.
    async fn delete_evaluations(&self, ids: &[EvalId]) -> ApiResult<u64>;
}
