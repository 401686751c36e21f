mod availability;
mod conflict;
mod error;
mod mutations;
mod queries;
mod store;

pub use availability::slot_grid;
pub use conflict::may_accept;
pub use error::EngineError;
pub use store::{CourtLedger, MemoryStore, ReservationStore, SharedCourtLedger};

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::model::OperatingWindow;

/// The single entry point other subsystems call: create and cancel bookings,
/// list an owner's history, and report per-class slot availability.
///
/// Collaborators arrive at construction — the store owns the reservations and
/// their atomicity guarantees, the catalog answers court lookups — so the
/// scheduler itself holds no ambient state.
pub struct Scheduler {
    store: Arc<dyn ReservationStore>,
    catalog: Arc<dyn Catalog>,
    window: OperatingWindow,
}

impl Scheduler {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        catalog: Arc<dyn Catalog>,
        window: OperatingWindow,
    ) -> Self {
        Self {
            store,
            catalog,
            window,
        }
    }

    pub fn window(&self) -> OperatingWindow {
        self.window
    }
}
