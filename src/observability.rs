//! Metric names used on the scheduler's write paths. The library only
//! increments through the `metrics` facade; the embedding binary decides
//! whether and where to install an exporter.

/// Counter: bookings accepted.
pub const BOOKINGS_CREATED_TOTAL: &str = "courtbook_bookings_created_total";

/// Counter: booking attempts rejected with a conflict.
pub const BOOKING_CONFLICTS_TOTAL: &str = "courtbook_booking_conflicts_total";

/// Counter: bookings cancelled by their owner.
pub const BOOKINGS_CANCELLED_TOTAL: &str = "courtbook_bookings_cancelled_total";

/// Counter: administrative full resets.
pub const RESETS_TOTAL: &str = "courtbook_resets_total";
