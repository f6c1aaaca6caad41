//! Cancellable periodic background task

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error};

/// Handle to a job running every `period` on the tokio runtime.
///
/// The first run happens one full period after spawning. [`PeriodicTask::stop`]
/// waits for the loop to exit; dropping the handle also ends the loop, but
/// without waiting.
pub struct PeriodicTask {
    name: String,
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    pub fn spawn<F, Fut>(name: impl Into<String>, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        // tokio::time::interval panics on a zero period
        let period = period.max(Duration::from_millis(1));
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            debug!(task = %task_name, ?period, "periodic task started");

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => job().await,
                }
            }

            debug!(task = %task_name, "periodic task stopped");
        });

        Self {
            name,
            stop_tx,
            handle,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signals the loop and waits until it has exited. A job already in
    /// progress runs to completion first.
    pub async fn stop(self) {
        let Self {
            name,
            stop_tx,
            handle,
        } = self;

        let _ = stop_tx.send(());
        if let Err(e) = handle.await {
            error!(task = %name, error = %e, "periodic task did not exit cleanly");
        }
    }
}
