//! Registry and grouping engine paired behind the two public entry points.

use crate::{
    GroupId, GroupingEngine, Participant, ParticipantId, Position, Registry, Result,
    DEFAULT_CAPACITY, DEFAULT_THRESHOLD,
};

/// Capacity and threshold for a [`Lobby`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LobbyConfig {
    /// Maximum number of participants ever registered
    pub capacity: u64,
    /// Per-axis proximity threshold
    pub threshold: f64,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Process-wide participant state.
///
/// Construct one at startup and share it by reference (or `Arc`) with every
/// caller.
#[derive(Debug)]
pub struct Lobby {
    registry: Registry,
    engine: GroupingEngine,
}

impl Lobby {
    /// Create an empty lobby.
    pub fn new(config: LobbyConfig) -> Self {
        Self {
            registry: Registry::new(config.capacity),
            engine: GroupingEngine::new(config.threshold),
        }
    }

    /// Register a participant at a caller-supplied position.
    ///
    /// Fails with `CapacityExceeded` once every id has been issued, and with
    /// `DuplicateId` if a participant was already added under the issued id.
    pub fn register(&self, position: Position) -> Result<ParticipantId> {
        let id = self.registry.allocate_id()?;
        self.registry.add(Participant::new(id, position))?;
        Ok(id)
    }

    /// Register a participant under an id chosen by the caller.
    pub fn register_with_id(&self, id: ParticipantId, position: Position) -> Result<()> {
        self.registry.add(Participant::new(id, position))
    }

    /// Resolve and return the current group of `id`.
    pub fn query_group(&self, id: ParticipantId) -> Result<GroupId> {
        self.engine.resolve_group(&self.registry, id)
    }

    /// Copy of a stored participant.
    pub fn participant(&self, id: ParticipantId) -> Result<Participant> {
        self.registry.get(id)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The grouping engine.
    pub fn engine(&self) -> &GroupingEngine {
        &self.engine
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(LobbyConfig::default())
    }
}
