use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::engine::EngineError;

/// Half-open time window `[start, end)`.
///
/// Construction goes through [`Interval::new`] so `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EngineError> {
        if end <= start {
            return Err(EngineError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Point containment: `t` in `[start, end)`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

/// Administrative court status. Set by catalog management, never derived
/// from bookings, and not consulted by the scheduling engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourtStatus {
    Available,
    Unavailable,
}

/// A bookable court. Read-only to the engine; the catalog owns these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub id: Ulid,
    pub name: String,
    /// Sport type grouping courts, e.g. "badminton".
    pub class: String,
    /// Ordinal within the class.
    pub number: u32,
    pub status: CourtStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

/// A confirmed claim on one court for one time window. Cancellation flips
/// the status; the record itself stays so owner history remains complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Ulid,
    pub court_id: Ulid,
    pub owner_id: Ulid,
    pub interval: Interval,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_confirmed(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }
}

/// Daily operating window discretized into fixed-width slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub open_hour: u32,
    pub close_hour: u32,
    pub slot_minutes: u32,
}

impl Default for OperatingWindow {
    /// Hourly slots from 10:00 to 22:00.
    fn default() -> Self {
        Self {
            open_hour: 10,
            close_hour: 22,
            slot_minutes: 60,
        }
    }
}

impl OperatingWindow {
    /// Ordered slot-start instants for one calendar day (UTC).
    pub fn slot_starts(&self, date: NaiveDate) -> Vec<DateTime<Utc>> {
        if self.slot_minutes == 0 || self.close_hour <= self.open_hour {
            return Vec::new();
        }
        let mut starts = Vec::new();
        let mut minute = self.open_hour * 60;
        let close = self.close_hour * 60;
        while minute < close {
            if let Some(t) = date.and_hms_opt(minute / 60, minute % 60, 0) {
                starts.push(t.and_utc());
            }
            minute += self.slot_minutes;
        }
        starts
    }
}

/// One row of an availability report: how many courts in the class are
/// still free for the slot starting at `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    /// `"HH:MM"` of the slot start.
    pub label: String,
    pub start: DateTime<Utc>,
    pub available: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
    }

    fn iv(start_h: u32, end_h: u32) -> Interval {
        Interval::new(at(start_h, 0), at(end_h, 0)).unwrap()
    }

    #[test]
    fn interval_basics() {
        let i = iv(10, 11);
        assert_eq!(i.duration(), Duration::hours(1));
        assert!(i.contains(at(10, 0)));
        assert!(i.contains(at(10, 59)));
        assert!(!i.contains(at(11, 0))); // half-open
    }

    #[test]
    fn interval_rejects_empty_or_reversed() {
        assert!(matches!(
            Interval::new(at(11, 0), at(10, 0)),
            Err(EngineError::InvalidInterval { .. })
        ));
        assert!(matches!(
            Interval::new(at(10, 0), at(10, 0)),
            Err(EngineError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn interval_overlap() {
        let a = iv(10, 11);
        let b = iv(10, 11);
        let c = iv(11, 12);
        let d = Interval::new(at(10, 30), at(11, 30)).unwrap();
        assert!(a.overlaps(&b));
        assert!(a.overlaps(&d));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn default_window_grid() {
        let window = OperatingWindow::default();
        let starts = window.slot_starts(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(starts.len(), 12);
        assert_eq!(starts[0], at(10, 0));
        assert_eq!(starts[11], at(21, 0));
    }

    #[test]
    fn half_hour_window_grid() {
        let window = OperatingWindow {
            open_hour: 9,
            close_hour: 11,
            slot_minutes: 30,
        };
        let starts = window.slot_starts(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(starts.len(), 4);
        assert_eq!(starts[1], at(9, 30));
    }

    #[test]
    fn degenerate_window_is_empty() {
        let window = OperatingWindow {
            open_hour: 22,
            close_hour: 10,
            slot_minutes: 60,
        };
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(window.slot_starts(date).is_empty());
    }

    #[test]
    fn reservation_serialization_roundtrip() {
        let r = Reservation {
            id: Ulid::new(),
            court_id: Ulid::new(),
            owner_id: Ulid::new(),
            interval: iv(14, 15),
            status: ReservationStatus::Confirmed,
            created_at: at(9, 0),
        };
        let json = serde_json::to_string(&r).unwrap();
        let decoded: Reservation = serde_json::from_str(&json).unwrap();
        assert_eq!(r, decoded);
    }
}
