//! Reservation scheduling engine for shared sports courts: decides whether a
//! requested time window may be granted on a court, maintains the confirmed
//! reservation set, and reports per-class slot availability.

pub mod catalog;
pub mod engine;
pub mod model;
pub mod observability;
