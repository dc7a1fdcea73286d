use thiserror::Error;

/// Domain errors raised by the mood layer.
///
/// Storage and serialization failures travel as `anyhow::Error` instead; the
/// store absorbs those at its boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoodError {
    #[error("mood data is still loading")]
    NotReady,

    #[error("invalid mood '{0}', expected one of: great, good, neutral, bad, awful")]
    InvalidMood(String),

    #[error("invalid date key '{0}', expected YYYY-MM-DD")]
    InvalidDateKey(String),

    #[error("stored mood data is corrupted: {0}")]
    Corrupted(String),
}

pub type MoodResult<T> = std::result::Result<T, MoodError>;
