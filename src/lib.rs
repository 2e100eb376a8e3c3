//! Conflict detection for recurring weekly schedules.
//!
//! A batch (a recurring class or court booking) occupies a set of weekdays
//! and a half-open time-of-day window on a resource key — location, optional
//! sub-location, optional court, activity. Two batches on the same key
//! conflict when their weekday sets intersect and their windows overlap;
//! touching windows do not count.
//!
//! [`engine::has_conflict`] is the pure check over an already-fetched
//! candidate set. [`SlotBoard`] is the in-memory registry around it: it
//! buckets entries by key and serializes check-then-commit behind a per-key
//! write lock, so two concurrent registrations cannot double-book a slot.

pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;

pub use engine::{ScheduleError, SlotBoard, find_conflict, has_conflict, parse_days, validate};
pub use model::{ResourceKey, ResourceSlots, ScheduleEntry, TimeWindow, WeekdaySet};
