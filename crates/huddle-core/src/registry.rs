//! Participant registry.
//!
//! Owns every participant for the lifetime of the process and issues ids.
//! The participant map sits behind a single mutex shared with the grouping
//! engine. Id issuance is a bounded atomic counter that is independent of
//! what the map holds.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{CoreError, Participant, ParticipantId, Result, DEFAULT_CAPACITY};

/// Concurrency-safe store of participants.
///
/// Participants are keyed in a `BTreeMap`, so any scan visits them in
/// ascending id order.
#[derive(Debug)]
pub struct Registry {
    participants: Mutex<BTreeMap<ParticipantId, Participant>>,
    next_id: AtomicU64,
    capacity: u64,
}

impl Registry {
    /// Create an empty registry that issues at most `capacity` ids.
    pub fn new(capacity: u64) -> Self {
        Self {
            participants: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(0),
            capacity,
        }
    }

    /// Maximum number of ids this registry will issue.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next_id.load(Ordering::Acquire)
    }

    /// Issue the next unused id.
    ///
    /// The counter only advances on success, so once it reaches the capacity
    /// every further call fails without side effects.
    pub fn allocate_id(&self) -> Result<ParticipantId> {
        let capacity = self.capacity;
        self.next_id
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                (next < capacity).then_some(next + 1)
            })
            .map(ParticipantId)
            .map_err(|_| CoreError::CapacityExceeded { capacity })
    }

    /// Insert a participant keyed by its id, resetting its group to its id.
    ///
    /// Ids outside `[0, capacity)` are refused so the map can never outgrow
    /// the capacity, even for caller-chosen ids.
    pub fn add(&self, mut participant: Participant) -> Result<()> {
        let id = participant.id;
        if id.value() >= self.capacity {
            return Err(CoreError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let mut participants = self.lock();
        if participants.contains_key(&id) {
            return Err(CoreError::DuplicateId(id));
        }
        participant.group = id.into();
        participants.insert(id, participant);
        Ok(())
    }

    /// Copy of the stored participant.
    pub fn get(&self, id: ParticipantId) -> Result<Participant> {
        self.lock().get(&id).copied().ok_or(CoreError::NotFound(id))
    }

    /// Whether a participant with this id exists.
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.lock().contains_key(&id)
    }

    /// Number of stored participants.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies of all participants in ascending id order.
    pub fn snapshot(&self) -> Vec<Participant> {
        self.lock().values().copied().collect()
    }

    /// Run `f` with exclusive access to the participant map.
    ///
    /// The closure must not block; it runs inside the registry's critical section.
    pub(crate) fn with_participants<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<ParticipantId, Participant>) -> R,
    ) -> R {
        f(&mut self.lock())
    }

    // Critical sections never panic mid-write, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<ParticipantId, Participant>> {
        self.participants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
