//! Participant identifiers, positions and records.

use std::fmt;

/// Unique participant identifier, issued from `[0, capacity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    /// Raw numeric value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticipantId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Group tag shared by participants considered clustered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GroupId(pub u64);

impl GroupId {
    /// Raw numeric value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every participant starts out as its own singleton group.
impl From<ParticipantId> for GroupId {
    fn from(id: ParticipantId) -> Self {
        Self(id.0)
    }
}

/// A point on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Surface origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when `other` lies strictly inside the square of half-width
    /// `threshold` centred on `self`.
    pub fn is_near(&self, other: &Self, threshold: f64) -> bool {
        crate::proximity::is_nearby(*self, *other, threshold)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A participant stored in the registry.
///
/// Values handed out by the registry are copies; the stored record's group
/// only changes through [`GroupingEngine::resolve_group`](crate::GroupingEngine::resolve_group).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub group: GroupId,
    pub position: Position,
}

impl Participant {
    /// Create a participant in its own singleton group.
    pub fn new(id: ParticipantId, position: Position) -> Self {
        Self {
            id,
            group: id.into(),
            position,
        }
    }
}
