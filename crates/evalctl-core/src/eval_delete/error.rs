//! Error types for eval deletion.

use evalctl_state::ApiError;

/// Errors produced by `evalctl eval delete`.
///
/// The first three are usage errors and are raised before any network call.
#[derive(Debug, thiserror::Error)]
pub enum EvalDeleteError {
    #[error("evaluation ID or filter flag required")]
    ConflictingSelectors,

    #[error("evaluation ID or filter flag required")]
    MissingSelector,

    #[error("expected {expected} argument, got {got}")]
    TooManyArguments { expected: usize, got: usize },

    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: ApiError,
    },

    #[error("Eval broker is not paused")]
    BrokerNotPaused,

    #[error("{context}: {source}")]
    NotFound {
        context: String,
        #[source]
        source: ApiError,
    },

    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: ApiError,
    },
}

/// Fieldless discriminant of [`EvalDeleteError`], for logs and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConflictingSelectors,
    MissingSelector,
    TooManyArguments,
    Transport,
    BrokerNotPaused,
    NotFound,
    Store,
}

impl EvalDeleteError {
    /// Classify a collaborator error, prefixing it with what was being done.
    pub(crate) fn from_api(context: impl Into<String>, source: ApiError) -> Self {
        let context = context.into();
        match source {
            ApiError::Transport(_) | ApiError::Config(_) => {
                EvalDeleteError::Transport { context, source }
            }
            ApiError::NotFound { .. } => EvalDeleteError::NotFound { context, source },
            ApiError::Api { .. } | ApiError::Decode(_) => {
                EvalDeleteError::Store { context, source }
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalDeleteError::ConflictingSelectors => ErrorKind::ConflictingSelectors,
            EvalDeleteError::MissingSelector => ErrorKind::MissingSelector,
            EvalDeleteError::TooManyArguments { .. } => ErrorKind::TooManyArguments,
            EvalDeleteError::Transport { .. } => ErrorKind::Transport,
            EvalDeleteError::BrokerNotPaused => ErrorKind::BrokerNotPaused,
            EvalDeleteError::NotFound { .. } => ErrorKind::NotFound,
            EvalDeleteError::Store { .. } => ErrorKind::Store,
        }
    }

    /// True for errors the operator fixes by correcting the invocation.
    pub fn is_usage(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ConflictingSelectors
                | ErrorKind::MissingSelector
                | ErrorKind::TooManyArguments
        )
    }
}
