// ── Polling scheduler ──
//
// One immediate fetch, then a re-fetch every interval until the session is
// torn down. The handle owns a cancellation token that fires on drop, so a
// view can never leak its timer across navigation. Overlapping fetches are
// not deduplicated; a monotonic sequence guard rejects stale responses so
// the newest-issued fetch wins.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::CoreError;

/// Default refresh cadence for every list/detail screen.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Outcome of one poll tick. Errors are carried as the user-visible
/// degradation message, per the view error contract.
#[derive(Debug, Clone)]
pub struct PollUpdate<T> {
    /// Monotonic issue number of the fetch that produced this update.
    pub seq: u64,
    pub result: Result<Vec<T>, String>,
}

/// A recurring fetch session owned by one mounted view.
///
/// Dropping the session cancels the timer task. An in-flight request is
/// not aborted, but its response is discarded if a newer fetch already
/// resolved (or the session is gone).
pub struct PollSession<T> {
    rx: watch::Receiver<Option<PollUpdate<T>>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> PollSession<T> {
    /// Start a session: fetch immediately, then every `period`.
    pub fn spawn<F, Fut>(period: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, CoreError>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(None);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_task(period, fetch, tx, cancel.clone()));

        Self { rx, cancel, task }
    }

    /// Latest update, if any tick has resolved yet.
    pub fn latest(&self) -> Option<PollUpdate<T>> {
        self.rx.borrow().clone()
    }

    /// Subscribe to updates via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Option<PollUpdate<T>>> {
        self.rx.clone()
    }

    /// Updates as an async stream (for `while let Some(..) = next().await`
    /// consumers).
    pub fn updates(&self) -> WatchStream<Option<PollUpdate<T>>> {
        WatchStream::new(self.rx.clone())
    }

    /// Explicit cancellation; equivalent to dropping the session.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl<T> Drop for PollSession<T> {
    fn drop(&mut self) {
        // Teardown must never leak the timer: cancel the loop, then abort
        // in case the task is parked on a tick.
        self.cancel.cancel();
        self.task.abort();
    }
}

async fn poll_task<T, F, Fut>(
    period: Duration,
    fetch: F,
    tx: watch::Sender<Option<PollUpdate<T>>>,
    cancel: CancellationToken,
) where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, CoreError>> + Send + 'static,
{
    let fetch = Arc::new(fetch);
    let mut seq: u64 = 0;
    // The first tick of a tokio interval completes immediately, which gives
    // the immediate initial fetch.
    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                seq += 1;
                let this_seq = seq;
                debug!(seq = this_seq, "poll tick");

                // Each fetch runs as its own task so a slow response never
                // delays the next tick — ticks N and N+1 may overlap.
                let fetch = Arc::clone(&fetch);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = fetch().await.map_err(|e| e.to_string());
                    tx.send_if_modified(|slot| {
                        let newer = match slot {
                            None => true,
                            Some(update) => this_seq > update.seq,
                        };
                        if newer {
                            *slot = Some(PollUpdate { seq: this_seq, result });
                        } else {
                            debug!(seq = this_seq, "discarding stale poll response");
                        }
                        newer
                    });
                });
            }
        }
    }
}
