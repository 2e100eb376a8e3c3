//! Conflict-checked registry of batch schedules.

mod conflict;
mod error;
mod mutations;
mod queries;

pub use conflict::{find_conflict, has_conflict, parse_days, validate};
pub use error::ScheduleError;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::model::*;

pub type SharedResourceSlots = Arc<RwLock<ResourceSlots>>;

/// In-memory registry of batch schedules, bucketed by [`ResourceKey`].
///
/// Each bucket sits behind its own write lock, so the conflict check and the
/// commit of a new schedule happen under a single guard: two concurrent
/// registrations of overlapping slots on the same key cannot both land.
/// Durable storage is the embedding application's concern; a store there
/// should keep a uniqueness constraint as the authoritative backstop.
pub struct SlotBoard {
    /// Per-key schedule lists.
    state: DashMap<ResourceKey, SharedResourceSlots>,
    /// Reverse lookup: batch id → resource key.
    entry_index: DashMap<Ulid, ResourceKey>,
}

impl Default for SlotBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotBoard {
    pub fn new() -> Self {
        Self {
            state: DashMap::new(),
            entry_index: DashMap::new(),
        }
    }

    pub fn slots_for(&self, key: &ResourceKey) -> Option<SharedResourceSlots> {
        self.state.get(key).map(|e| e.value().clone())
    }

    pub fn key_of(&self, id: &Ulid) -> Option<ResourceKey> {
        self.entry_index.get(id).map(|e| e.value().clone())
    }

    /// Buckets are created on first use and kept for reuse; an emptied bucket
    /// stays in the map so a concurrent register never races its removal.
    fn slots_or_insert(&self, key: &ResourceKey) -> SharedResourceSlots {
        self.state
            .entry(key.clone())
            .or_insert_with(|| {
                metrics::gauge!(crate::observability::KEYS_ACTIVE).increment(1.0);
                Arc::new(RwLock::new(ResourceSlots::new(key.clone())))
            })
            .clone()
    }
}
