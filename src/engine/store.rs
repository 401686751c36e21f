use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::model::{Interval, Reservation, ReservationStatus};

use super::EngineError;
use super::conflict::may_accept;

pub type SharedCourtLedger = Arc<RwLock<CourtLedger>>;

/// The persistence contract the scheduling engine requires. Any store that
/// keeps `insert` atomic per court (exactly one of two racing overlapping
/// inserts may succeed) and answers the queries below is conformant — an
/// in-memory structure with per-court locking, a relational table with an
/// exclusion constraint, and so on.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Atomic check-then-insert. Fails with [`EngineError::Conflict`] when
    /// the window overlaps a confirmed reservation on the same court.
    async fn insert(
        &self,
        court_id: Ulid,
        owner_id: Ulid,
        interval: Interval,
    ) -> Result<Reservation, EngineError>;

    /// Flip a confirmed reservation to cancelled. `NotFound` for unknown or
    /// already-cancelled ids (re-cancelling is not idempotent); `NotOwner`
    /// when the reservation is confirmed but belongs to someone else, in
    /// which case it is left untouched.
    async fn cancel(&self, reservation_id: Ulid, owner_id: Ulid) -> Result<(), EngineError>;

    /// Every reservation the owner ever made, confirmed and cancelled,
    /// newest start time first.
    async fn list_by_owner(&self, owner_id: Ulid) -> Result<Vec<Reservation>, EngineError>;

    /// Confirmed reservations for one court, ascending start time.
    async fn confirmed_for(&self, court_id: Ulid) -> Result<Vec<Reservation>, EngineError>;

    /// Administrative wipe: discard every reservation for every court.
    /// No conflict or ownership checks apply.
    async fn reset_all(&self) -> Result<(), EngineError>;
}

/// Per-court reservation list, kept sorted by interval start so conflict
/// checks scan only the window that can overlap.
#[derive(Debug)]
pub struct CourtLedger {
    pub court_id: Ulid,
    reservations: Vec<Reservation>,
}

impl CourtLedger {
    fn new(court_id: Ulid) -> Self {
        Self {
            court_id,
            reservations: Vec::new(),
        }
    }

    /// Insert maintaining sort order by interval start.
    fn insert_sorted(&mut self, reservation: Reservation) {
        let pos = self
            .reservations
            .binary_search_by_key(&reservation.interval.start(), |r| r.interval.start())
            .unwrap_or_else(|e| e);
        self.reservations.insert(pos, reservation);
    }

    /// Reservations whose interval overlaps the query window. Binary search
    /// skips everything starting at or after `query.end`.
    fn overlapping(&self, query: &Interval) -> impl Iterator<Item = &Reservation> {
        let right_bound = self
            .reservations
            .partition_point(|r| r.interval.start() < query.end());
        self.reservations[..right_bound]
            .iter()
            .filter(move |r| r.interval.end() > query.start())
    }

    fn get(&self, id: Ulid) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: Ulid) -> Option<&mut Reservation> {
        self.reservations.iter_mut().find(|r| r.id == id)
    }

    fn confirmed(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter().filter(|r| r.is_confirmed())
    }
}

/// In-memory [`ReservationStore`]. One `RwLock<CourtLedger>` per court
/// serializes check-then-insert on that court; different courts never
/// contend. The side indexes resolve cancel and history lookups without
/// scanning every ledger.
pub struct MemoryStore {
    courts: DashMap<Ulid, SharedCourtLedger>,
    /// Reverse lookup: reservation id → court id. Entries stay after
    /// cancellation so history lookups keep resolving.
    court_of: DashMap<Ulid, Ulid>,
    by_owner: DashMap<Ulid, Vec<Ulid>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            courts: DashMap::new(),
            court_of: DashMap::new(),
            by_owner: DashMap::new(),
        }
    }

    fn ledger(&self, court_id: Ulid) -> SharedCourtLedger {
        self.courts
            .entry(court_id)
            .or_insert_with(|| Arc::new(RwLock::new(CourtLedger::new(court_id))))
            .value()
            .clone()
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn insert(
        &self,
        court_id: Ulid,
        owner_id: Ulid,
        interval: Interval,
    ) -> Result<Reservation, EngineError> {
        let ledger = self.ledger(court_id);
        let mut guard = ledger.write().await;

        let taken: Vec<Interval> = guard
            .overlapping(&interval)
            .filter(|r| r.is_confirmed())
            .map(|r| r.interval)
            .collect();
        if !may_accept(&interval, &taken)
            && let Some(existing) = guard.overlapping(&interval).find(|r| r.is_confirmed())
        {
            return Err(EngineError::Conflict(existing.id));
        }

        let reservation = Reservation {
            id: Ulid::new(),
            court_id,
            owner_id,
            interval,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        };
        guard.insert_sorted(reservation.clone());
        self.court_of.insert(reservation.id, court_id);
        self.by_owner.entry(owner_id).or_default().push(reservation.id);
        Ok(reservation)
    }

    async fn cancel(&self, reservation_id: Ulid, owner_id: Ulid) -> Result<(), EngineError> {
        let court_id = self
            .court_of
            .get(&reservation_id)
            .map(|e| *e.value())
            .ok_or(EngineError::NotFound(reservation_id))?;
        let ledger = self
            .courts
            .get(&court_id)
            .map(|e| e.value().clone())
            .ok_or(EngineError::NotFound(reservation_id))?;
        let mut guard = ledger.write().await;

        let reservation = guard
            .get_mut(reservation_id)
            .ok_or(EngineError::NotFound(reservation_id))?;
        if reservation.status == ReservationStatus::Cancelled {
            // Cancelled entries already left the active set.
            return Err(EngineError::NotFound(reservation_id));
        }
        if reservation.owner_id != owner_id {
            return Err(EngineError::NotOwner(reservation_id));
        }
        reservation.status = ReservationStatus::Cancelled;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Ulid) -> Result<Vec<Reservation>, EngineError> {
        let ids = self
            .by_owner
            .get(&owner_id)
            .map(|e| e.value().clone())
            .unwrap_or_default();

        let mut history = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(court_id) = self.court_of.get(&id).map(|e| *e.value())
                && let Some(ledger) = self.courts.get(&court_id).map(|e| e.value().clone())
            {
                let guard = ledger.read().await;
                if let Some(r) = guard.get(id) {
                    history.push(r.clone());
                }
            }
        }
        history.sort_by(|a, b| b.interval.start().cmp(&a.interval.start()));
        Ok(history)
    }

    async fn confirmed_for(&self, court_id: Ulid) -> Result<Vec<Reservation>, EngineError> {
        let Some(ledger) = self.courts.get(&court_id).map(|e| e.value().clone()) else {
            return Ok(Vec::new());
        };
        let guard = ledger.read().await;
        Ok(guard.confirmed().cloned().collect())
    }

    async fn reset_all(&self) -> Result<(), EngineError> {
        self.courts.clear();
        self.court_of.clear();
        self.by_owner.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
    }

    fn reservation(start_h: u32, end_h: u32) -> Reservation {
        Reservation {
            id: Ulid::new(),
            court_id: Ulid::new(),
            owner_id: Ulid::new(),
            interval: Interval::new(at(start_h, 0), at(end_h, 0)).unwrap(),
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn ledger_insert_keeps_order() {
        let mut ledger = CourtLedger::new(Ulid::new());
        ledger.insert_sorted(reservation(15, 16));
        ledger.insert_sorted(reservation(10, 11));
        ledger.insert_sorted(reservation(12, 13));
        let starts: Vec<_> = ledger.reservations.iter().map(|r| r.interval.start()).collect();
        assert_eq!(starts, vec![at(10, 0), at(12, 0), at(15, 0)]);
    }

    #[test]
    fn ledger_overlapping_scan() {
        let mut ledger = CourtLedger::new(Ulid::new());
        ledger.insert_sorted(reservation(8, 9));
        ledger.insert_sorted(reservation(11, 13));
        ledger.insert_sorted(reservation(20, 21));

        let query = Interval::new(at(12, 0), at(14, 0)).unwrap();
        let hits: Vec<_> = ledger.overlapping(&query).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].interval.start(), at(11, 0));
    }

    #[test]
    fn ledger_overlapping_excludes_adjacent() {
        let mut ledger = CourtLedger::new(Ulid::new());
        ledger.insert_sorted(reservation(10, 11));

        // Windows touching either endpoint are not overlaps (half-open).
        let before = Interval::new(at(9, 0), at(10, 0)).unwrap();
        let after = Interval::new(at(11, 0), at(12, 0)).unwrap();
        assert_eq!(ledger.overlapping(&before).count(), 0);
        assert_eq!(ledger.overlapping(&after).count(), 0);
    }
}
