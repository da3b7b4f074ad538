//! Access token refresh timer
//!
//! A [`RefreshTimer`] owns at most one repeating background task. Starting
//! it while a task is running aborts the old task first; stopping an idle
//! timer does nothing.

use crate::runtime::{self, MaybeSend, Ticker};
use futures::future::{AbortHandle, Abortable};
use std::future::Future;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct ActiveTimer {
    handle: AbortHandle,
    finished: Arc<AtomicBool>,
}

/// Single-slot handle for the repeating refresh task
#[derive(Default)]
pub struct RefreshTimer {
    active: Mutex<Option<ActiveTimer>>,
}

impl RefreshTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `tick` every `period` until it returns [`ControlFlow::Break`] or
    /// the timer is stopped. The first tick fires one period after start.
    pub fn start<F, Fut>(&self, period: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + MaybeSend + 'static,
        Fut: Future<Output = ControlFlow<()>> + MaybeSend + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let finished = Arc::new(AtomicBool::new(false));
        let done = Arc::clone(&finished);

        let task = Abortable::new(
            async move {
                let mut ticker = Ticker::new(period);
                loop {
                    ticker.tick().await;
                    if tick().await.is_break() {
                        break;
                    }
                }
            },
            registration,
        );

        {
            let mut slot = self.slot();
            if let Some(previous) = slot.take() {
                previous.handle.abort();
                tracing::debug!("Cancelled previous refresh timer");
            }
            *slot = Some(ActiveTimer { handle, finished });
        }

        tracing::debug!(period_ms = period.as_millis(), "Refresh timer started");
        runtime::spawn(async move {
            let _ = task.await;
            done.store(true, Ordering::Release);
        });
    }

    /// Cancel the running task. Returns whether one was running.
    pub fn stop(&self) -> bool {
        let Some(active) = self.slot().take() else {
            return false;
        };
        active.handle.abort();
        let was_running = !active.finished.load(Ordering::Acquire);
        if was_running {
            tracing::debug!("Refresh timer stopped");
        }
        was_running
    }

    pub fn is_active(&self) -> bool {
        self.slot().as_ref().is_some_and(|active| {
            !active.handle.is_aborted() && !active.finished.load(Ordering::Acquire)
        })
    }

    fn slot(&self) -> MutexGuard<'_, Option<ActiveTimer>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
