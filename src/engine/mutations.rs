use tracing::{info, warn};
use ulid::Ulid;

use crate::model::Interval;
use crate::observability;

use super::{EngineError, Scheduler};

impl Scheduler {
    /// Book a court for a time window. The court must exist in the catalog;
    /// the store performs the conflict check and the insert under the same
    /// court lock, so the decision is never staler than the insert.
    pub async fn create_booking(
        &self,
        owner_id: Ulid,
        court_id: Ulid,
        interval: Interval,
    ) -> Result<Ulid, EngineError> {
        if !self.catalog.court_exists(court_id).await? {
            return Err(EngineError::ResourceNotFound(court_id));
        }
        match self.store.insert(court_id, owner_id, interval).await {
            Ok(reservation) => {
                metrics::counter!(observability::BOOKINGS_CREATED_TOTAL).increment(1);
                info!(
                    "booking {} created for owner {owner_id} on court {court_id}",
                    reservation.id
                );
                Ok(reservation.id)
            }
            Err(e) => {
                if matches!(e, EngineError::Conflict(_)) {
                    metrics::counter!(observability::BOOKING_CONFLICTS_TOTAL).increment(1);
                }
                Err(e)
            }
        }
    }

    /// Cancel one of the owner's reservations. Pure delegation to the store.
    pub async fn cancel_booking(
        &self,
        owner_id: Ulid,
        reservation_id: Ulid,
    ) -> Result<(), EngineError> {
        self.store.cancel(reservation_id, owner_id).await?;
        metrics::counter!(observability::BOOKINGS_CANCELLED_TOTAL).increment(1);
        info!("booking {reservation_id} cancelled by owner {owner_id}");
        Ok(())
    }

    /// Administrative wipe of every reservation. The caller authorizes;
    /// no ownership checks apply here.
    pub async fn reset_all(&self) -> Result<(), EngineError> {
        self.store.reset_all().await?;
        metrics::counter!(observability::RESETS_TOTAL).increment(1);
        warn!("all reservations discarded");
        Ok(())
    }
}
