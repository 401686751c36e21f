use chrono::NaiveDate;
use ulid::Ulid;

use crate::model::{OperatingWindow, Reservation, SlotAvailability};

/// Build the per-slot availability grid for one class of courts on one day.
///
/// For each slot in the operating window,
/// `available = courts.len() - occupied`, where a court is occupied iff one
/// of its confirmed reservations contains the slot's start instant. A court
/// counts at most once per slot, whatever its reservations look like. Slots
/// nobody booked report full capacity.
pub fn slot_grid(
    window: &OperatingWindow,
    date: NaiveDate,
    courts: &[Ulid],
    confirmed: &[Reservation],
) -> Vec<SlotAvailability> {
    let capacity = courts.len() as u32;
    window
        .slot_starts(date)
        .into_iter()
        .map(|start| {
            let occupied = courts
                .iter()
                .filter(|court_id| {
                    confirmed
                        .iter()
                        .any(|r| r.court_id == **court_id && r.interval.contains(start))
                })
                .count() as u32;
            SlotAvailability {
                label: start.format("%H:%M").to_string(),
                start,
                available: capacity.saturating_sub(occupied),
            }
        })
        .collect()
}
