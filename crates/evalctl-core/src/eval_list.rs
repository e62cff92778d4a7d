//! `eval list`: read-only view over the same list call deletion resolves with.

use evalctl_state::{ApiResult, EvaluationRecord, EvaluationStore};
use tracing::instrument;

/// List evaluations, optionally filtered server-side. An empty filter lists all.
#[instrument(skip(store))]
pub async fn list_evaluations(
    store: &dyn EvaluationStore,
    filter: &str,
) -> ApiResult<Vec<EvaluationRecord>> {
    let filter = Some(filter).filter(|f| !f.is_empty());
    store.list_evaluations(filter).await
}

/// Fixed-width table, one evaluation per line.
pub fn render_eval_table(records: &[EvaluationRecord]) -> String {
    if records.is_empty() {
        return "No evals found\n".to_string();
    }

    let job_width = records
        .iter()
        .map(|r| r.job_id.len())
        .max()
        .unwrap_or(0)
        .max("Job ID".len());
    let trigger_width = records
        .iter()
        .map(|r| r.triggered_by.len())
        .max()
        .unwrap_or(0)
        .max("Triggered By".len());

    let mut out = format!(
        "{:<8}  {:<8}  {:<trigger_width$}  {:<job_width$}  {}\n",
        "ID", "Priority", "Triggered By", "Job ID", "Status"
    );
    for r in records {
        out.push_str(&format!(
            "{:<8}  {:<8}  {:<trigger_width$}  {:<job_width$}  {}\n",
            r.id.short(),
            r.priority,
            r.triggered_by,
            r.job_id,
            r.status
        ));
    }
    out
}

/// Pretty-printed JSON array in wire format.
pub fn render_eval_json(records: &[EvaluationRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
