//! Structured observability hooks for the eval delete lifecycle.
//!
//! Every stage transition emits one `info!` event with an `event` field of
//! the form `eval_delete.<stage>`, so a JSON log stream can be grepped for a
//! single invocation's progress.

use tracing::{info, warn};

use crate::eval_delete::{ErrorKind, Selector};

/// Emit event: arguments validated into a selector.
pub fn emit_validated(selector: &Selector) {
    info!(
        event = "eval_delete.validated",
        mode = selector.mode(),
        selector = %selector
    );
}

/// Emit event: broker pause state observed.
pub fn emit_gate_checked(paused: bool) {
    info!(event = "eval_delete.gate_checked", paused = paused);
}

/// Emit event: selector resolved to a concrete id set.
pub fn emit_resolved(selector: &Selector, count: usize) {
    info!(
        event = "eval_delete.resolved",
        mode = selector.mode(),
        count = count
    );
}

/// Emit event: batch delete finished.
pub fn emit_deleted(requested: usize, deleted: u64) {
    info!(
        event = "eval_delete.deleted",
        requested = requested,
        deleted = deleted
    );
}

/// Emit event: invocation ended in failure.
pub fn emit_failed(kind: ErrorKind, error: &str) {
    warn!(event = "eval_delete.failed", kind = ?kind, error = %error);
}
