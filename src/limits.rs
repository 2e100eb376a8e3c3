//! Hard caps enforced by the registry. Exceeding one is a
//! `ScheduleError::LimitExceeded`, never a panic or silent truncation.

/// Max schedules registered on a single resource key.
pub const MAX_ENTRIES_PER_KEY: usize = 256;

/// Max distinct resource keys tracked by one board.
pub const MAX_RESOURCE_KEYS: usize = 4096;

/// Max length of a court name, measured after trimming.
pub const MAX_COURT_LEN: usize = 128;
