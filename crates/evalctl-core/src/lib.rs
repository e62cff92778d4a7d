//! evalctl Core Library
//!
//! Command logic for deleting evaluation records from the scheduler's
//! durable state, independent of any transport. Collaborators are reached
//! through the traits in `evalctl-state`.

pub mod eval_delete;
pub mod eval_list;
pub mod obs;
pub mod telemetry;

pub use eval_delete::{
    ensure_broker_paused, execute, resolve, success_message, verify_args_and_flags,
    DeletionOutcome, DeletionSet, ErrorKind, EvalDeleteCommand, EvalDeleteError, ExitStatus,
    Reporter, Selector,
};
pub use eval_list::{list_evaluations, render_eval_json, render_eval_table};
pub use telemetry::init_tracing;

pub use evalctl_state::{
    ApiError, ClusterConfig, EvalId, EvaluationRecord, EvaluationStore, HttpClusterClient,
    SchedulerConfig, SchedulerOperator,
};

/// evalctl version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
