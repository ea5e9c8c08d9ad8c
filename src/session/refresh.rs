use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Request side shared between the refresher task and its triggers
struct RefreshRequests {
    notify: Notify,
    requested: AtomicU64,
}

/// Cheap handle for requesting a refresh and waiting for it
#[derive(Clone)]
pub struct RefreshTrigger {
    requests: Arc<RefreshRequests>,
    completed: watch::Receiver<u64>,
}

impl RefreshTrigger {
    /// Request a refresh and wait until a fetch started after this call has
    /// completed. Returns immediately if the refresher has stopped.
    pub async fn refresh(&self) {
        let ticket = self.requests.requested.fetch_add(1, Ordering::AcqRel) + 1;
        let mut completed = self.completed.clone();
        self.requests.notify.notify_one();

        if completed.wait_for(|done| *done >= ticket).await.is_err() {
            debug!("Balance refresher stopped before request {} completed", ticket);
        }
    }
}

/// Single periodic task that owns all balance fetching for a session
///
/// Requests made while a fetch is in flight collapse into one follow-up
/// fetch, and fetches never overlap.
pub struct BalanceRefresher {
    trigger: RefreshTrigger,
    task: JoinHandle<()>,
}

impl BalanceRefresher {
    pub fn spawn<F, Fut>(period: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let requests = Arc::new(RefreshRequests {
            notify: Notify::new(),
            requested: AtomicU64::new(0),
        });
        let (completed_tx, completed_rx) = watch::channel(0u64);

        let task_requests = requests.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; the caller has just fetched
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => debug!("Periodic balance refresh"),
                    _ = task_requests.notify.notified() => debug!("Requested balance refresh"),
                }

                let covered = task_requests.requested.load(Ordering::Acquire);
                fetch().await;
                completed_tx.send_replace(covered);
                ticker.reset();
            }
        });

        Self {
            trigger: RefreshTrigger {
                requests,
                completed: completed_rx,
            },
            task,
        }
    }

    pub fn trigger(&self) -> RefreshTrigger {
        self.trigger.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for BalanceRefresher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
