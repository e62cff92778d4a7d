//! `eval delete`: remove evaluation records from the scheduler's state.
//!
//! An invocation moves through
//! `Start → Validated → BrokerChecked → Resolved → Deleted → Reported`,
//! and any stage may end it in `Failed`. Stages run strictly in sequence.
//!
//! # Module layout
//!
//! - [`selector`] — `Selector`, `verify_args_and_flags`
//! - [`gate`] — `ensure_broker_paused`
//! - [`resolve`] — `resolve`, `DeletionSet`
//! - [`executor`] — `execute`, `DeletionOutcome`
//! - [`reporter`] — `Reporter`, `ExitStatus`, `success_message`
//! - [`error`] — `EvalDeleteError`, `ErrorKind`

pub mod error;
pub mod executor;
pub mod gate;
pub mod reporter;
pub mod resolve;
pub mod selector;

use std::io::Write;

use evalctl_state::{EvaluationStore, SchedulerOperator};
use tracing::instrument;

use crate::obs;

pub use error::{ErrorKind, EvalDeleteError};
pub use executor::{execute, DeletionOutcome};
pub use gate::ensure_broker_paused;
pub use reporter::{success_message, ExitStatus, Reporter};
pub use resolve::{resolve, DeletionSet};
pub use selector::{verify_args_and_flags, Selector};

/// The `eval delete` command bound to a cluster.
///
/// Holds no per-run state; the same command may be run any number of times.
pub struct EvalDeleteCommand<'a, C> {
    cluster: &'a C,
}

impl<'a, C> EvalDeleteCommand<'a, C>
where
    C: SchedulerOperator + EvaluationStore,
{
    pub fn new(cluster: &'a C) -> Self {
        Self { cluster }
    }

    /// Run every stage and return the outcome.
    ///
    /// `args` are the raw positional arguments; `filter` is the raw flag
    /// value, empty when the flag was not given.
    #[instrument(name = "eval_delete", skip(self))]
    pub async fn run(
        &self,
        args: &[String],
        filter: &str,
    ) -> Result<DeletionOutcome, EvalDeleteError> {
        let result = self.run_stages(args, filter).await;
        if let Err(e) = &result {
            obs::emit_failed(e.kind(), &e.to_string());
        }
        result
    }

    async fn run_stages(
        &self,
        args: &[String],
        filter: &str,
    ) -> Result<DeletionOutcome, EvalDeleteError> {
        let selector = verify_args_and_flags(args, filter)?;
        obs::emit_validated(&selector);

        ensure_broker_paused(self.cluster).await?;

        let set = resolve(self.cluster, selector).await?;
        execute(self.cluster, &set).await
    }

    /// Run and report through `reporter`, returning the exit status.
    pub async fn run_and_report<O: Write, E: Write>(
        &self,
        args: &[String],
        filter: &str,
        reporter: &mut Reporter<O, E>,
    ) -> ExitStatus {
        let result = self.run(args, filter).await;
        reporter.report(&result)
    }
}
