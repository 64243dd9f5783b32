//! Huddle Core
//!
//! Participant registry and proximity grouping engine.
//!
//! # Model
//!
//! Participants sit on a bounded 2-D surface. Each one carries a group tag
//! that starts out equal to its own id. Asking for a participant's group
//! scans every other participant in ascending id order and adopts the group
//! of the first one that is nearby:
//!
//! ```text
//! nearby(a, b) = |a.x - b.x| < threshold  &&  |a.y - b.y| < threshold
//! ```
//!
//! The neighborhood is an axis-aligned square, not a disc, and both
//! comparisons are strict.
//!
//! # Grouping is local
//!
//! Resolution is a single pairwise pass with no closure step. With A near B
//! and B near C but A far from C, the groups reported for A and C depend on
//! what B's group was at the moment each was resolved. Callers re-query after
//! the registry changes; nothing is invalidated for them.
//!
//! # Concurrency
//!
//! One mutex guards the participant map together with every group tag, so a
//! resolution scans and writes atomically. Id issuance uses a separate atomic
//! counter and never touches the map lock.
//!
//! # Example
//!
//! ```
//! use huddle_core::{GroupId, Lobby, LobbyConfig, Position};
//!
//! let lobby = Lobby::new(LobbyConfig::default());
//! let a = lobby.register(Position::new(0.0, 0.0)).unwrap();
//! let b = lobby.register(Position::new(0.2, 0.2)).unwrap();
//!
//! assert_eq!(lobby.query_group(a).unwrap(), GroupId::from(b));
//! ```

mod error;
mod grouping;
mod lobby;
mod proximity;
mod registry;
mod types;

pub use error::{CoreError, Result};
pub use grouping::GroupingEngine;
pub use lobby::{Lobby, LobbyConfig};
pub use proximity::is_nearby;
pub use registry::Registry;
pub use types::{GroupId, Participant, ParticipantId, Position};

/// Default number of ids a registry hands out.
pub const DEFAULT_CAPACITY: u64 = 100;

/// Default per-axis proximity threshold, in surface units.
pub const DEFAULT_THRESHOLD: f64 = 0.5;
