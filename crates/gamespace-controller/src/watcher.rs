//! Polling foreground watcher
//!
//! For hosts that can only query the focused app. Forwards the first
//! observation and every change afterwards; duplicates are harmless since the
//! controller ignores them. Dropping the watcher stops it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::actor::ControllerHandle;
use crate::ports::ForegroundSource;

pub struct ForegroundWatcher {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ForegroundWatcher {
    pub fn spawn(
        source: Arc<dyn ForegroundSource>,
        handle: ControllerHandle,
        poll_interval: Duration,
    ) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_app: Option<String> = None;

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {}
                }

                let Some(current) = source.current_foreground() else {
                    continue;
                };
                if last_app.as_deref() == Some(current.as_str()) {
                    continue;
                }

                tracing::debug!(app_id = %current, "Foreground app changed");
                if handle.foreground_changed(current.clone()).is_err() {
                    tracing::debug!("Session actor gone, stopping foreground watcher");
                    break;
                }
                last_app = Some(current);
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            task,
        }
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::warn!(error = %e, "Foreground watcher task failed");
        }
    }
}
