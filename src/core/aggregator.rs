use crate::core::poller::StatusPoller;
use crate::domain::model::{BranchEntry, CheckSnapshot, LoanableBranch, SystemAvailability};
use crate::domain::ports::AvailabilityCheck;
use std::collections::HashMap;
use std::time::Duration;

/// Status literal the availability service uses for a loanable copy.
pub const STATUS_AVAILABLE: &str = "貸出可";

const SYSTEM_OK: &str = "OK";
const SYSTEM_CACHE: &str = "Cache";

/// Drives branch entries through the status poller, once per distinct
/// system_id, and joins the per-branch loan status against the per-system
/// cache. The cache lives for one aggregation pass only.
pub struct Aggregator<'a, A: AvailabilityCheck> {
    poller: StatusPoller<'a, A>,
    cache: HashMap<String, Option<SystemAvailability>>,
}

impl<'a, A: AvailabilityCheck> Aggregator<'a, A> {
    pub fn new(service: &'a A, interval: Duration) -> Self {
        Self {
            poller: StatusPoller::new(service, interval),
            cache: HashMap::new(),
        }
    }

    /// Branches come back in input order. A failed or empty poll is
    /// memoized as well, so its branches are skipped without re-polling.
    pub async fn collect(&mut self, isbn: &str, branches: &[BranchEntry]) -> Vec<LoanableBranch> {
        let mut loanable = Vec::new();

        for branch in branches {
            if !self.cache.contains_key(&branch.system_id) {
                let availability = match self.poller.poll(isbn, &branch.system_id).await {
                    Ok(snapshot) => system_availability(&snapshot, isbn, &branch.system_id),
                    Err(e) => {
                        tracing::warn!("⚠️ status poll failed for {}: {}", branch.system_id, e);
                        None
                    }
                };
                self.cache.insert(branch.system_id.clone(), availability);
            }

            let Some(Some(availability)) = self.cache.get(&branch.system_id) else {
                continue;
            };

            let loanable_here = availability
                .branch_status
                .get(&branch.branch_key)
                .is_some_and(|status| status == STATUS_AVAILABLE);
            if loanable_here {
                loanable.push(LoanableBranch {
                    formal_name: branch.formal_name.clone(),
                    reserve_url: availability.reserve_url.clone(),
                });
            }
        }

        loanable
    }
}

fn system_availability(
    snapshot: &CheckSnapshot,
    isbn: &str,
    system_id: &str,
) -> Option<SystemAvailability> {
    let system = snapshot.books.get(isbn)?.get(system_id)?;

    if (system.status == SYSTEM_OK || system.status == SYSTEM_CACHE) && !system.libkey.is_empty() {
        Some(SystemAvailability {
            branch_status: system.libkey.clone(),
            reserve_url: system.reserveurl.clone(),
        })
    } else {
        None
    }
}
