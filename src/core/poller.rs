use crate::domain::model::CheckSnapshot;
use crate::domain::ports::AvailabilityCheck;
use crate::utils::error::Result;
use std::time::Duration;

/// Hard cap on re-issues after the first request (4 requests total).
pub const MAX_RETRIES: usize = 3;

pub struct StatusPoller<'a, A: AvailabilityCheck> {
    service: &'a A,
    interval: Duration,
}

impl<'a, A: AvailabilityCheck> StatusPoller<'a, A> {
    pub fn new(service: &'a A, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Re-issues the status request while the service reports it as still
    /// computing, carrying the latest continuation token forward. On budget
    /// exhaustion the current snapshot is returned as-is, even if it is
    /// still marked as computing.
    pub async fn poll(&self, isbn: &str, system_id: &str) -> Result<CheckSnapshot> {
        let mut snapshot = self.service.check(isbn, system_id, None).await?;
        let mut retries = 0;

        while snapshot.still_running && retries < MAX_RETRIES {
            retries += 1;
            tokio::time::sleep(self.interval).await;
            tracing::info!("🔁 {}: continue:{}", system_id, retries);

            let session = snapshot.session.take();
            snapshot = self
                .service
                .check(isbn, system_id, session.as_deref())
                .await?;
        }

        Ok(snapshot)
    }
}
