use thiserror::Error;

/// Errors reported by the scheduling core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("court {court_id} does not exist (configured courts: {court_count})")]
    InvalidCourt { court_id: usize, court_count: usize },

    /// Fewer than four free players. A normal outcome, not a hard failure;
    /// the caller should surface it as a warning.
    #[error("not enough free players to start a doubles match")]
    InsufficientPlayers,

    #[error("invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("court count must be at least 1")]
    InvalidCourtCount,
}
