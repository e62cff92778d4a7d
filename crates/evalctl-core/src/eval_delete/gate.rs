//! Safety gate: refuse to delete while the eval broker is dispatching.
//!
//! This is a read-then-act check against state other operators may change
//! at any moment. Nothing holds the broker paused between this read and the
//! later delete; the remote store provides whatever stronger guarantee exists.

use evalctl_state::{SchedulerConfig, SchedulerOperator};
use tracing::{debug, instrument};

use super::error::EvalDeleteError;
use crate::obs;

/// Read the scheduler configuration and require `pause_eval_broker`.
///
/// Always performs a fresh read; pause state is never cached across calls.
#[instrument(skip(operator))]
pub async fn ensure_broker_paused(
    operator: &dyn SchedulerOperator,
) -> Result<SchedulerConfig, EvalDeleteError> {
    let config = operator
        .scheduler_config()
        .await
        .map_err(|e| EvalDeleteError::from_api("Error querying scheduler configuration", e))?;

    debug!(modify_index = config.modify_index, "Read scheduler configuration");
    obs::emit_gate_checked(config.pause_eval_broker);

    if !config.pause_eval_broker {
        return Err(EvalDeleteError::BrokerNotPaused);
    }
    Ok(config)
}
