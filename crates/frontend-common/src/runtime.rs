//! Task spawning and interval ticks for native (tokio) and browser targets

use std::future::Future;
use std::time::Duration;

/// `Send` on native targets, where tasks may move between threads; no bound on wasm32
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

/// Run a future in the background. Native targets need a running tokio runtime.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + MaybeSend + 'static,
{
    tokio::spawn(future);
}

#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + MaybeSend + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Fixed-period ticks; the first tick fires one full period after creation
pub(crate) struct Ticker {
    #[cfg(not(target_arch = "wasm32"))]
    interval: tokio::time::Interval,
    #[cfg(target_arch = "wasm32")]
    stream: gloo_timers::future::IntervalStream,
}

impl Ticker {
    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        Self { interval }
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) fn new(period: Duration) -> Self {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX).max(1);
        Self {
            stream: gloo_timers::future::IntervalStream::new(millis),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) async fn tick(&mut self) {
        self.interval.tick().await;
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) async fn tick(&mut self) {
        use futures::StreamExt;
        let _ = self.stream.next().await;
    }
}
