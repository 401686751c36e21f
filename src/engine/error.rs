use chrono::{DateTime, Utc};
use ulid::Ulid;

#[derive(Debug)]
pub enum EngineError {
    /// Malformed time window: `end <= start`.
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Unknown court id on booking creation.
    ResourceNotFound(Ulid),
    /// Overlap with an existing confirmed reservation; payload is its id.
    Conflict(Ulid),
    /// Reservation id unresolvable or already cancelled.
    NotFound(Ulid),
    /// Cancel attempted by someone other than the reservation's owner.
    NotOwner(Ulid),
    /// Availability query for a class with no courts.
    ClassNotFound(String),
    /// Opaque persistence-layer failure, propagated untouched.
    Storage(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidInterval { start, end } => {
                write!(f, "invalid interval: [{start}, {end}) is empty or reversed")
            }
            EngineError::ResourceNotFound(id) => write!(f, "court not found: {id}"),
            EngineError::Conflict(id) => write!(f, "conflict with reservation: {id}"),
            EngineError::NotFound(id) => write!(f, "reservation not found: {id}"),
            EngineError::NotOwner(id) => {
                write!(f, "reservation {id} belongs to a different owner")
            }
            EngineError::ClassNotFound(class) => write!(f, "sport class not found: {class}"),
            EngineError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}
