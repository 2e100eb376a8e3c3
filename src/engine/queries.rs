use ulid::Ulid;

use crate::model::*;

use super::SlotBoard;

impl SlotBoard {
    /// All registered schedules sharing `key` — the candidate set
    /// [`super::has_conflict`] expects for a brand-new schedule.
    pub async fn entries_for(&self, key: &ResourceKey) -> Vec<ScheduleEntry> {
        match self.slots_for(key) {
            Some(slots) => slots.read().await.entries.clone(),
            None => Vec::new(),
        }
    }

    /// Same, minus the entry identified by `exclude` — the candidate set for
    /// re-validating an edit, so the edited schedule never flags itself.
    pub async fn entries_for_excluding(&self, key: &ResourceKey, exclude: Ulid) -> Vec<ScheduleEntry> {
        let mut entries = self.entries_for(key).await;
        entries.retain(|e| e.id != exclude);
        entries
    }

    pub async fn get(&self, id: &Ulid) -> Option<ScheduleEntry> {
        let key = self.key_of(id)?;
        let slots = self.slots_for(&key)?;
        let guard = slots.read().await;
        guard.entries.iter().find(|e| e.id == *id).cloned()
    }

    pub fn contains(&self, id: &Ulid) -> bool {
        self.entry_index.contains_key(id)
    }

    pub fn entry_count(&self) -> usize {
        self.entry_index.len()
    }

    /// Resource keys currently holding at least one schedule.
    pub async fn keys(&self) -> Vec<ResourceKey> {
        let buckets: Vec<_> = self.state.iter().map(|e| e.value().clone()).collect();
        let mut keys = Vec::new();
        for bucket in buckets {
            let guard = bucket.read().await;
            if !guard.entries.is_empty() {
                keys.push(guard.key.clone());
            }
        }
        keys
    }
}
