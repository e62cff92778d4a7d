//! Reporter: render the outcome and decide the exit status.

use std::io::Write;

use super::error::EvalDeleteError;
use super::executor::DeletionOutcome;

/// Process exit status for an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Failure = 1,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// "Successfully deleted 1 evaluation" / "Successfully deleted N evaluations"
pub fn success_message(count: u64) -> String {
    let noun = if count == 1 {
        "evaluation"
    } else {
        "evaluations"
    };
    format!("Successfully deleted {count} {noun}")
}

/// Writes results to an output stream and errors to an error stream.
#[derive(Debug)]
pub struct Reporter<O, E> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn report(&mut self, result: &Result<DeletionOutcome, EvalDeleteError>) -> ExitStatus {
        let written = match result {
            Ok(outcome) => writeln!(self.out, "{}", success_message(outcome.deleted)),
            Err(e) if e.is_usage() => writeln!(
                self.err,
                "Error validating command args and flags: {e}\nRun 'evalctl eval delete --help' for usage"
            ),
            Err(e) => writeln!(self.err, "{e}"),
        };

        match (result, written) {
            (Ok(_), Ok(())) => ExitStatus::Success,
            _ => ExitStatus::Failure,
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: Result<DeletionOutcome, EvalDeleteError>) -> (ExitStatus, String, String) {
        let mut reporter = Reporter::new(Vec::new(), Vec::new());
        let status = reporter.report(&result);
        let (out, err) = reporter.into_inner();
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn singular_and_plural_phrasing() {
        assert_eq!(success_message(1), "Successfully deleted 1 evaluation");
        assert_eq!(success_message(2), "Successfully deleted 2 evaluations");
        assert_eq!(success_message(0), "Successfully deleted 0 evaluations");
    }

    #[test]
    fn success_goes_to_stdout() {
        let (status, out, err) = render(Ok(DeletionOutcome {
            requested: 3,
            deleted: 3,
        }));
        assert_eq!(status, ExitStatus::Success);
        assert_eq!(status.code(), 0);
        assert_eq!(out, "Successfully deleted 3 evaluations\n");
        assert!(err.is_empty());
    }

    #[test]
    fn usage_errors_are_prefixed() {
        let (status, out, err) = render(Err(EvalDeleteError::MissingSelector));
        assert_eq!(status, ExitStatus::Failure);
        assert!(out.is_empty());
        assert!(err.starts_with(
            "Error validating command args and flags: evaluation ID or filter flag required"
        ));
    }

    #[test]
    fn other_errors_are_verbatim() {
        let (status, _, err) = render(Err(EvalDeleteError::BrokerNotPaused));
        assert_eq!(status.code(), 1);
        assert_eq!(err, "Eval broker is not paused\n");
    }
}
