use tracing::debug;
use ulid::Ulid;

use crate::limits::*;
use crate::model::*;
use crate::observability;

use super::conflict::{first_conflict, validate};
use super::{ScheduleError, SlotBoard};

impl SlotBoard {
    /// Register a new batch schedule. The conflict check and the insert run
    /// under the key's write lock, so a concurrent registration of an
    /// overlapping slot is either observed or serialized behind this one.
    pub async fn register(&self, entry: ScheduleEntry) -> Result<(), ScheduleError> {
        validate(&entry)?;
        if let Some(court) = &entry.key.court
            && court.len() > MAX_COURT_LEN {
                return Err(ScheduleError::LimitExceeded("court name too long"));
            }
        if self.entry_index.contains_key(&entry.id) {
            return Err(ScheduleError::AlreadyExists(entry.id));
        }
        if self.slots_for(&entry.key).is_none() && self.state.len() >= MAX_RESOURCE_KEYS {
            return Err(ScheduleError::LimitExceeded("too many resource keys"));
        }

        let slots = self.slots_or_insert(&entry.key);
        let mut guard = slots.write().await;
        if guard.entries.len() >= MAX_ENTRIES_PER_KEY {
            return Err(ScheduleError::LimitExceeded("too many schedules on resource"));
        }

        metrics::counter!(observability::CHECKS_TOTAL).increment(1);
        if let Some(with) = first_conflict(&guard, &entry) {
            metrics::counter!(observability::CONFLICTS_TOTAL).increment(1);
            return Err(ScheduleError::Conflict {
                with,
                key: entry.key,
            });
        }

        let id = entry.id;
        let key = entry.key.clone();
        guard.insert_entry(entry);
        self.entry_index.insert(id, key);
        metrics::gauge!(observability::ENTRIES_ACTIVE).increment(1.0);
        debug!(%id, "registered batch schedule");
        Ok(())
    }

    /// Re-validate and replace an existing batch's schedule. The entry being
    /// edited is excluded from the check, so an unchanged schedule never
    /// collides with itself. When the edit moves the batch to a different
    /// resource key, both keys are locked in sorted order before checking,
    /// making the move atomic with respect to writers of either key.
    pub async fn reschedule(&self, entry: ScheduleEntry) -> Result<(), ScheduleError> {
        validate(&entry)?;
        if let Some(court) = &entry.key.court
            && court.len() > MAX_COURT_LEN {
                return Err(ScheduleError::LimitExceeded("court name too long"));
            }
        let old_key = self.key_of(&entry.id).ok_or(ScheduleError::NotFound(entry.id))?;

        if old_key == entry.key {
            let slots = self
                .slots_for(&old_key)
                .ok_or(ScheduleError::NotFound(entry.id))?;
            let mut guard = slots.write().await;

            metrics::counter!(observability::CHECKS_TOTAL).increment(1);
            if let Some(with) = first_conflict(&guard, &entry) {
                metrics::counter!(observability::CONFLICTS_TOTAL).increment(1);
                return Err(ScheduleError::Conflict {
                    with,
                    key: entry.key,
                });
            }
            if guard.remove_entry(entry.id).is_none() {
                // Withdrawn between the index lookup and taking the lock.
                return Err(ScheduleError::NotFound(entry.id));
            }
            let id = entry.id;
            guard.insert_entry(entry);
            debug!(%id, "rescheduled batch");
            return Ok(());
        }

        // Key change: acquire both write locks in sorted key order to
        // prevent deadlocks against a reschedule moving the opposite way.
        if self.slots_for(&entry.key).is_none() && self.state.len() >= MAX_RESOURCE_KEYS {
            return Err(ScheduleError::LimitExceeded("too many resource keys"));
        }
        let old_slots = self
            .slots_for(&old_key)
            .ok_or(ScheduleError::NotFound(entry.id))?;
        let new_slots = self.slots_or_insert(&entry.key);

        let (mut old_guard, mut new_guard) = if old_key < entry.key {
            let old_guard = old_slots.write().await;
            let new_guard = new_slots.write().await;
            (old_guard, new_guard)
        } else {
            let new_guard = new_slots.write().await;
            let old_guard = old_slots.write().await;
            (old_guard, new_guard)
        };

        if new_guard.entries.len() >= MAX_ENTRIES_PER_KEY {
            return Err(ScheduleError::LimitExceeded("too many schedules on resource"));
        }
        metrics::counter!(observability::CHECKS_TOTAL).increment(1);
        if let Some(with) = first_conflict(&new_guard, &entry) {
            metrics::counter!(observability::CONFLICTS_TOTAL).increment(1);
            return Err(ScheduleError::Conflict {
                with,
                key: entry.key,
            });
        }
        if old_guard.remove_entry(entry.id).is_none() {
            return Err(ScheduleError::NotFound(entry.id));
        }
        let id = entry.id;
        let key = entry.key.clone();
        new_guard.insert_entry(entry);
        self.entry_index.insert(id, key);
        debug!(%id, "rescheduled batch across resource keys");
        Ok(())
    }

    /// Remove a batch's schedule, freeing its slots. Returns the key the
    /// schedule occupied.
    pub async fn withdraw(&self, id: Ulid) -> Result<ResourceKey, ScheduleError> {
        let key = self.key_of(&id).ok_or(ScheduleError::NotFound(id))?;
        let slots = self.slots_for(&key).ok_or(ScheduleError::NotFound(id))?;
        let mut guard = slots.write().await;
        if guard.remove_entry(id).is_none() {
            return Err(ScheduleError::NotFound(id));
        }
        self.entry_index.remove(&id);
        metrics::gauge!(observability::ENTRIES_ACTIVE).decrement(1.0);
        debug!(%id, "withdrew batch schedule");
        Ok(key)
    }
}
