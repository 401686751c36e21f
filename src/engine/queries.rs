use chrono::NaiveDate;
use ulid::Ulid;

use crate::model::{Reservation, SlotAvailability};

use super::availability::slot_grid;
use super::{EngineError, Scheduler};

impl Scheduler {
    /// Every reservation the owner ever made, confirmed and cancelled,
    /// newest start time first.
    pub async fn list_history(&self, owner_id: Ulid) -> Result<Vec<Reservation>, EngineError> {
        self.store.list_by_owner(owner_id).await
    }

    /// Per-slot availability for a sport class on one day, one row per slot
    /// in the operating window. `ClassNotFound` when the catalog has no
    /// courts in the class.
    pub async fn availability(
        &self,
        class: &str,
        date: NaiveDate,
    ) -> Result<Vec<SlotAvailability>, EngineError> {
        let courts = self.catalog.courts_in_class(class).await?;
        if courts.is_empty() {
            return Err(EngineError::ClassNotFound(class.to_string()));
        }

        let mut confirmed = Vec::new();
        for court_id in &courts {
            confirmed.extend(self.store.confirmed_for(*court_id).await?);
        }
        Ok(slot_grid(&self.window, date, &courts, &confirmed))
    }
}
