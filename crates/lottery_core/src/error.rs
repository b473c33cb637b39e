use thiserror::Error;

/// Errors raised while preparing or driving a draw session.
///
/// Every fallible operation leaves the session untouched when it returns one
/// of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("name list is empty")]
    EmptyInput,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("round {round} needs {needed} participants but only {available} remain")]
    InsufficientCandidates {
        round: usize,
        needed: usize,
        available: usize,
    },
    #[error("'{0}' is not in the participant list")]
    NameNotFound(String),
    #[error("corrupt session snapshot: {0}")]
    CorruptSnapshot(String),
    #[error("all draws are completed")]
    SessionCompleted,
    #[error("round {round} has not been drawn yet")]
    RoundNotDrawn { round: usize },
    #[error("already at the first draw")]
    NoPreviousRound,
}
