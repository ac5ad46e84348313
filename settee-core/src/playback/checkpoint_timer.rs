use std::{fmt, sync::Arc, time::Duration};

use settee_model::PlaybackCheckpoint;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::ports::KeyValueStore;

/// Periodic writer of the latest playback position.
///
/// Owned by exactly one session and only alive while that session is
/// playing. [`CheckpointTimer::disarm`] cancels and then joins the task, so
/// once it returns no further write can happen. Dropping an armed timer
/// aborts the task instead.
pub(crate) struct CheckpointTimer {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CheckpointTimer {
    pub(crate) fn arm(
        store: Arc<dyn KeyValueStore>,
        video_url: String,
        position: watch::Receiver<f64>,
        period: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        // `interval_at` panics on a zero period.
        let period = period.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let checkpoint =
                            PlaybackCheckpoint::new(video_url.as_str(), *position.borrow());
                        write_checkpoint(store.as_ref(), &checkpoint).await;
                    }
                }
            }
            debug!(video_url = %video_url, "checkpoint timer stopped");
        });

        Self {
            cancel,
            task: Some(task),
        }
    }

    pub(crate) async fn disarm(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
            && err.is_panic()
        {
            warn!(error = %err, "checkpoint timer panicked");
        }
    }
}

impl Drop for CheckpointTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl fmt::Debug for CheckpointTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckpointTimer")
            .field("cancelled", &self.cancel.is_cancelled())
            .field(
                "finished",
                &self.task.as_ref().map(|task| task.is_finished()),
            )
            .finish()
    }
}

/// Write one checkpoint. Failures are logged and dropped; the next tick
/// retries naturally.
pub(crate) async fn write_checkpoint(
    store: &dyn KeyValueStore,
    checkpoint: &PlaybackCheckpoint,
) {
    let key = checkpoint.storage_key();
    match store.set(&key, &checkpoint.encode()).await {
        Ok(()) => debug!(
            key = %key,
            seconds = checkpoint.position_seconds,
            "checkpoint written"
        ),
        Err(err) => warn!(key = %key, error = %err, "failed to write checkpoint"),
    }
}
