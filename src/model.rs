use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Half-open time-of-day window `[start, end)` within a single day.
/// No date component, no overnight wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        debug_assert!(start < end, "TimeWindow start must be before end");
        Self { start, end }
    }

    /// Standard half-open overlap: touching windows do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Set of weekdays as a 7-bit mask indexed from Monday.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn intersects(&self, other: &WeekdaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days in Monday-first order, regardless of insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS.iter().copied().filter(|d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(day_name)).finish()
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter().map(day_name))
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        let mut set = WeekdaySet::EMPTY;
        for name in &names {
            let day: Weekday = name
                .parse()
                .map_err(|_| serde::de::Error::custom(format_args!("unrecognized weekday: {name}")))?;
            set.insert(day);
        }
        Ok(set)
    }
}

/// The tuple that scopes mutual exclusion: schedules only compete with other
/// schedules on an identical key. An absent sub-location or court is its own
/// bucket, never a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub location_id: Ulid,
    pub sub_location_id: Option<Ulid>,
    /// Free-text court/resource name within the (sub)location.
    pub court: Option<String>,
    pub activity_id: Ulid,
}

impl ResourceKey {
    /// Blank or whitespace-only court names normalize to `None` so that
    /// "no court given" is a single bucket however the caller spells it.
    pub fn new(
        location_id: Ulid,
        sub_location_id: Option<Ulid>,
        court: Option<&str>,
        activity_id: Ulid,
    ) -> Self {
        let court = court
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned);
        Self {
            location_id,
            sub_location_id,
            court,
            activity_id,
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "location {}", self.location_id)?;
        if let Some(sub) = &self.sub_location_id {
            write!(f, ", sub-location {sub}")?;
        }
        if let Some(court) = &self.court {
            write!(f, ", court {court}")?;
        }
        write!(f, ", activity {}", self.activity_id)
    }
}

/// One batch's recurring weekly schedule — the unit the conflict check
/// compares. `id` identifies the batch; edits exclude it from the candidate
/// set so an entry never collides with itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Ulid,
    pub key: ResourceKey,
    pub days: WeekdaySet,
    pub window: TimeWindow,
}

impl ScheduleEntry {
    pub fn new(id: Ulid, key: ResourceKey, days: WeekdaySet, window: TimeWindow) -> Self {
        Self { id, key, days, window }
    }
}

/// All schedules registered on one resource key, sorted by window start.
#[derive(Debug, Clone)]
pub struct ResourceSlots {
    pub key: ResourceKey,
    pub entries: Vec<ScheduleEntry>,
}

impl ResourceSlots {
    pub fn new(key: ResourceKey) -> Self {
        Self {
            key,
            entries: Vec::new(),
        }
    }

    /// Insert maintaining sort order by window start.
    pub fn insert_entry(&mut self, entry: ScheduleEntry) {
        let pos = self
            .entries
            .binary_search_by_key(&entry.window.start, |e| e.window.start)
            .unwrap_or_else(|e| e);
        self.entries.insert(pos, entry);
    }

    /// Remove entry by batch id.
    pub fn remove_entry(&mut self, id: Ulid) -> Option<ScheduleEntry> {
        if let Some(pos) = self.entries.iter().position(|e| e.id == id) {
            Some(self.entries.remove(pos))
        } else {
            None
        }
    }

    /// Only entries whose window overlaps `window`. Binary search skips
    /// entries starting at or after `window.end`; the day dimension still has
    /// to be checked by the caller.
    pub fn overlapping(&self, window: &TimeWindow) -> impl Iterator<Item = &ScheduleEntry> {
        let right_bound = self
            .entries
            .partition_point(|e| e.window.start < window.end);
        let start = window.start;
        self.entries[..right_bound]
            .iter()
            .filter(move |e| e.window.end > start)
    }
}
