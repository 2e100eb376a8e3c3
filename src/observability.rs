//! Metric names recorded through the `metrics` facade. Installing an
//! exporter (or not) is the embedding application's decision; without one
//! every record is a no-op.

// ── Conflict-check metrics ──────────────────────────────────────

/// Counter: conflict checks performed by registry mutations.
pub const CHECKS_TOTAL: &str = "slotboard_conflict_checks_total";

/// Counter: registrations and reschedules rejected as conflicting.
pub const CONFLICTS_TOTAL: &str = "slotboard_conflicts_total";

// ── Registry occupancy ──────────────────────────────────────────

/// Gauge: schedule entries currently registered.
pub const ENTRIES_ACTIVE: &str = "slotboard_entries_active";

/// Gauge: resource keys that have ever held an entry.
pub const KEYS_ACTIVE: &str = "slotboard_resource_keys_active";
