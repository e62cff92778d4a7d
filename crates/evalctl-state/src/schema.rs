//! Wire schema for the scheduler control plane
//!
//! Field names follow the control plane's JSON (PascalCase, `ID` suffixes).
//! Unknown fields are ignored on decode so newer servers stay compatible.

use serde::{Deserialize, Serialize};

/// Unique identifier of an evaluation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvalId(pub String);

impl EvalId {
    /// Generate a new random EvalId
    pub fn new() -> Self {
        EvalId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form (first 8 chars), as shown in list output.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(self.0.as_str())
    }
}

impl Default for EvalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EvalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EvalId {
    fn from(s: &str) -> Self {
        EvalId(s.to_string())
    }
}

impl From<String> for EvalId {
    fn from(s: String) -> Self {
        EvalId(s)
    }
}

/// An evaluation as returned by the list endpoint.
///
/// Only `id` matters to deletion; the remaining fields exist so filter
/// expressions and list output have something to work with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EvaluationRecord {
    #[serde(rename = "ID")]
    pub id: EvalId,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(rename = "Type", default)]
    pub eval_type: String,
    #[serde(default)]
    pub triggered_by: String,
    #[serde(rename = "JobID", default)]
    pub job_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_description: String,
    /// Unix nanoseconds
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub modify_index: u64,
}

impl EvaluationRecord {
    /// A pending evaluation as produced by a job registration.
    pub fn pending_for_job(job_id: impl Into<String>) -> Self {
        Self {
            id: EvalId::new(),
            namespace: "default".to_string(),
            priority: 50,
            eval_type: "service".to_string(),
            triggered_by: "job-register".to_string(),
            job_id: job_id.into(),
            status: "pending".to_string(),
            status_description: String::new(),
            create_time: chrono::Utc::now()
                .timestamp_nanos_opt()
                .unwrap_or_default(),
            modify_index: 0,
        }
    }
}

/// Scheduler configuration snapshot. Owned by cluster operators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchedulerConfig {
    #[serde(default)]
    pub scheduler_algorithm: String,
    #[serde(default)]
    pub memory_oversubscription_enabled: bool,
    #[serde(default)]
    pub reject_job_registration: bool,
    /// When true the evaluation broker dispatches nothing
    #[serde(default)]
    pub pause_eval_broker: bool,
    #[serde(default)]
    pub modify_index: u64,
}

/// Envelope of `GET /v1/operator/scheduler/configuration`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfigResponse {
    #[serde(rename = "SchedulerConfig", default)]
    pub scheduler_config: Option<SchedulerConfig>,
    #[serde(rename = "Index", default)]
    pub index: u64,
}

/// Body of `DELETE /v1/evaluations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalDeleteRequest {
    #[serde(rename = "EvalIDs")]
    pub eval_ids: Vec<EvalId>,
}

/// Response of `DELETE /v1/evaluations`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalDeleteResponse {
    #[serde(rename = "Count", default)]
    pub count: Option<u64>,
}
