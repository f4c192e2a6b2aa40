//! Progress spinner shown while a completion is outstanding
//!
//! The spinner is a scoped tokio task that ticks an indicatif bar every
//! 100ms until it is told to stop. [`while_spinning`] stops and joins it
//! once the wrapped future resolves, whatever the outcome, so the line is
//! cleared before anything else is printed.

use indicatif::ProgressBar;
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

/// Interval between spinner frames
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// A running spinner task
pub struct Spinner {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl Spinner {
    /// Start ticking `bar` on a background task
    pub fn start(bar: ProgressBar) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            let mut ticks = 0u64;
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = interval.tick() => {
                        bar.tick();
                        ticks += 1;
                    }
                }
            }
            bar.finish_and_clear();
            ticks
        });

        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Signal the task and wait for it to clear its line
    ///
    /// Returns the number of frames drawn.
    pub async fn stop(mut self) -> u64 {
        if let Some(stop) = self.stop.take() {
            // the task may already be gone; joining below reports that
            let _ = stop.send(());
        }
        let Some(handle) = self.handle.take() else {
            return 0;
        };
        match handle.await {
            Ok(ticks) => ticks,
            Err(e) => {
                warn!(error = %e, "Spinner task did not finish cleanly");
                0
            }
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        // dropped without `stop` (e.g. the caller was cancelled)
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// Run `future` with `bar` spinning, if there is one
pub async fn while_spinning<F: Future>(bar: Option<ProgressBar>, future: F) -> F::Output {
    let Some(bar) = bar else {
        return future.await;
    };

    let spinner = Spinner::start(bar);
    let output = future.await;
    spinner.stop().await;
    output
}
