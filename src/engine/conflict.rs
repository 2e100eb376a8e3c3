use std::str::FromStr;

use chrono::Weekday;
use ulid::Ulid;

use crate::model::*;

use super::ScheduleError;

/// Reject schedules the overlap test is not defined for: an empty weekday
/// set, or a window that is inverted or empty. Registry mutations call this
/// before touching any state; external callers may use it to pre-validate.
pub fn validate(entry: &ScheduleEntry) -> Result<(), ScheduleError> {
    if entry.days.is_empty() {
        return Err(ScheduleError::InvalidSchedule("schedule has no weekdays"));
    }
    if entry.window.start >= entry.window.end {
        return Err(ScheduleError::InvalidSchedule(
            "window start must be before window end",
        ));
    }
    Ok(())
}

/// Two schedules collide iff their weekday sets intersect AND their windows
/// overlap. Key filtering happened before this point.
pub(crate) fn slots_collide(a: &ScheduleEntry, b: &ScheduleEntry) -> bool {
    a.days.intersects(&b.days) && a.window.overlaps(&b.window)
}

/// First entry colliding with `candidate`, by slice order. Assumes a
/// validated candidate and a key-filtered `existing` set; when re-checking an
/// edit, the caller excludes the edited entry from `existing` beforehand.
pub fn find_conflict(candidate: &ScheduleEntry, existing: &[ScheduleEntry]) -> Option<Ulid> {
    debug_assert!(
        existing.iter().all(|e| e.key == candidate.key),
        "existing entries must share the candidate's resource key"
    );
    existing
        .iter()
        .find(|e| slots_collide(candidate, e))
        .map(|e| e.id)
}

/// Does `candidate` collide with any entry in `existing`? Fails fast on a
/// malformed candidate, short-circuits on the first hit. Pure: no side
/// effects, reads only its inputs.
pub fn has_conflict(candidate: &ScheduleEntry, existing: &[ScheduleEntry]) -> Result<bool, ScheduleError> {
    validate(candidate)?;
    Ok(find_conflict(candidate, existing).is_some())
}

/// Indexed variant of [`find_conflict`] for the registry path: scans only
/// entries whose window can overlap the candidate's, and skips the
/// candidate's own id so edits never collide with themselves.
pub(crate) fn first_conflict(slots: &ResourceSlots, candidate: &ScheduleEntry) -> Option<Ulid> {
    debug_assert!(
        slots.key == candidate.key,
        "candidate checked against the wrong resource key"
    );
    slots
        .overlapping(&candidate.window)
        .find(|e| e.id != candidate.id && e.days.intersects(&candidate.days))
        .map(|e| e.id)
}

/// Canonicalize day names into a [`WeekdaySet`]. Accepts full names and
/// three-letter abbreviations, any case ("MONDAY", "monday", "Mon").
pub fn parse_days<I, S>(names: I) -> Result<WeekdaySet, ScheduleError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = WeekdaySet::EMPTY;
    for name in names {
        let name = name.as_ref();
        let day = Weekday::from_str(name.trim())
            .map_err(|_| ScheduleError::UnknownWeekday(name.to_string()))?;
        set.insert(day);
    }
    Ok(set)
}
