use ulid::Ulid;

use crate::model::ResourceKey;

#[derive(Debug)]
pub enum ScheduleError {
    /// Candidate failed shape validation (empty days, inverted window).
    InvalidSchedule(&'static str),
    /// A day name did not parse as a weekday.
    UnknownWeekday(String),
    /// Candidate collides with the named batch on the given resource key.
    Conflict { with: Ulid, key: ResourceKey },
    NotFound(Ulid),
    AlreadyExists(Ulid),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InvalidSchedule(msg) => write!(f, "invalid schedule: {msg}"),
            ScheduleError::UnknownWeekday(name) => write!(f, "unrecognized weekday: {name}"),
            ScheduleError::Conflict { with, key } => {
                write!(f, "slot conflicts with batch {with} ({key})")
            }
            ScheduleError::NotFound(id) => write!(f, "not found: {id}"),
            ScheduleError::AlreadyExists(id) => write!(f, "already exists: {id}"),
            ScheduleError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for ScheduleError {}
