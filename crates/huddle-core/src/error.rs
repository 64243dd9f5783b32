//! Error types for the registry and grouping engine.

use thiserror::Error;

use crate::ParticipantId;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors reported by the registry and grouping engine.
///
/// All of them are terminal for the call that produced them and leave the
/// registry unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Every id below the capacity has been handed out
    #[error("max players reached (capacity {capacity})")]
    CapacityExceeded { capacity: u64 },

    /// A participant with this id is already registered
    #[error("player {0} exists")]
    DuplicateId(ParticipantId),

    /// No participant with this id
    #[error("unknown player {0}")]
    NotFound(ParticipantId),
}
