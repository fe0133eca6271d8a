//! Run-scoped request budgets across provider credentials.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Outcome of an acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    Granted,
    /// Denied. `wait` is the minimum duration until the credential becomes
    /// eligible again, or `None` when its budget for this run is spent.
    Denied { wait: Option<Duration> },
}

#[derive(Debug, Default)]
struct SlotState {
    spent: u32,
    last_grant: Option<Instant>,
}

/// Enforces, per credential, a request ceiling per synchronization run and a
/// minimum spacing between consecutive requests.
///
/// Counters are run-scoped: [`RateLimiter::reset`] is called at the start of
/// every run, so each of the N credentials can independently contribute up
/// to the ceiling to the same run. Each slot sits behind its own mutex, so
/// concurrent `try_acquire` calls on one credential are linearized.
pub struct RateLimiter {
    allowed_requests: u32,
    delay_by_request: Duration,
    slots: Vec<Mutex<SlotState>>,
}

impl RateLimiter {
    pub fn new(credentials: usize, allowed_requests: u32, delay_by_request: Duration) -> Self {
        Self {
            allowed_requests,
            delay_by_request,
            slots: (0..credentials).map(|_| Mutex::default()).collect(),
        }
    }

    /// Number of credentials this limiter tracks.
    #[must_use]
    pub fn credentials(&self) -> usize {
        self.slots.len()
    }

    /// Zero every credential's counter and spacing clock at run start.
    pub fn reset(&self) {
        for slot in &self.slots {
            *slot.lock() = SlotState::default();
        }
    }

    /// Attempt to spend one request on `credential`.
    ///
    /// Grants iff the counter is below the ceiling and the spacing delay has
    /// elapsed since the last grant; on grant the counter is incremented and
    /// the clock stamped. The caller decides whether to wait out a denial's
    /// hint or rotate to a different credential.
    pub fn try_acquire(&self, credential: usize) -> Acquire {
        let mut slot = self.slots[credential].lock();
        if slot.spent >= self.allowed_requests {
            return Acquire::Denied { wait: None };
        }
        if let Some(last) = slot.last_grant {
            let elapsed = last.elapsed();
            if elapsed < self.delay_by_request {
                return Acquire::Denied {
                    wait: Some(self.delay_by_request - elapsed),
                };
            }
        }
        slot.spent += 1;
        slot.last_grant = Some(Instant::now());
        Acquire::Granted
    }

    /// Per-credential requests spent so far this run.
    #[must_use]
    pub fn spent(&self) -> Vec<u32> {
        self.slots.iter().map(|slot| slot.lock().spent).collect()
    }
}

/// Rotate over all credentials starting at `start` until one grants.
///
/// Between full passes, sleeps the shortest finite wait hint seen, at most
/// `retry_limit` times. Returns `None` when every credential's budget is
/// spent or the retries are used up.
pub async fn acquire_rotating(
    limiter: &RateLimiter,
    start: usize,
    retry_limit: u32,
) -> Option<usize> {
    let credentials = limiter.credentials();
    let mut retries = 0;
    loop {
        let mut shortest: Option<Duration> = None;
        for offset in 0..credentials {
            let credential = (start + offset) % credentials;
            match limiter.try_acquire(credential) {
                Acquire::Granted => return Some(credential),
                Acquire::Denied { wait: Some(wait) } => {
                    shortest = Some(shortest.map_or(wait, |s| s.min(wait)));
                }
                Acquire::Denied { wait: None } => {}
            }
        }
        let wait = shortest?;
        retries += 1;
        if retries > retry_limit {
            return None;
        }
        tokio::time::sleep(wait).await;
    }
}
