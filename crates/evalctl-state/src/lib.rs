//! evalctl-state: cluster control-plane access for evalctl
//!
//! This crate owns every byte that crosses the wire between evalctl and the
//! scheduler's control plane. Command logic lives in `evalctl-core` and only
//! ever talks to the traits defined here.
//!
//! ## Key Components
//!
//! - `SchedulerOperator`: read the scheduler configuration (broker pause state)
//! - `EvaluationStore`: list evaluations by filter, delete evaluations in batch
//! - `HttpClusterClient`: reqwest-backed implementation of both traits
//! - `fakes::MemoryCluster`: in-memory implementation for tests

pub mod api_traits;
mod error;
pub mod fakes;
mod http;
mod schema;

pub use api_traits::{ApiResult, EvaluationStore, SchedulerOperator};
pub use error::ApiError;
pub use http::{ClusterConfig, HttpClusterClient, DEFAULT_ADDRESS, TOKEN_HEADER};
pub use schema::{
    EvalDeleteRequest, EvalDeleteResponse, EvalId, EvaluationRecord, SchedulerConfig,
    SchedulerConfigResponse,
};
