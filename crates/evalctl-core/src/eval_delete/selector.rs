//! Selector validation: positional id vs `--filter`.

use evalctl_state::EvalId;

use super::error::EvalDeleteError;

/// What the operator asked to delete. Exactly one arm survives validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    ById(EvalId),
    ByFilter(String),
}

impl Selector {
    /// Short tag used in log fields.
    pub fn mode(&self) -> &'static str {
        match self {
            Selector::ById(_) => "id",
            Selector::ByFilter(_) => "filter",
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::ById(id) => write!(f, "evaluation {id}"),
            Selector::ByFilter(expr) => write!(f, "filter {expr:?}"),
        }
    }
}

/// Turn raw positional arguments and the filter flag into a [`Selector`].
///
/// Checks (in order):
/// 1. A filter and a positional id together are rejected.
/// 2. Neither a filter nor an id is rejected.
/// 3. More than one positional id is rejected with the exact counts.
///
/// An empty `filter` means the flag was not given. The filter text itself is
/// not inspected; the server validates it.
pub fn verify_args_and_flags(args: &[String], filter: &str) -> Result<Selector, EvalDeleteError> {
    match (filter.is_empty(), args) {
        (false, [_, ..]) => Err(EvalDeleteError::ConflictingSelectors),
        (true, []) => Err(EvalDeleteError::MissingSelector),
        (true, [id]) => Ok(Selector::ById(EvalId::from(id.as_str()))),
        (true, many) => Err(EvalDeleteError::TooManyArguments {
            expected: 1,
            got: many.len(),
        }),
        (false, []) => Ok(Selector::ByFilter(filter.to_string())),
    }
}
