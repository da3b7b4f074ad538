//! Tracing initialisation

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Install the global subscriber.
///
/// Browser builds write to the devtools console; native builds honour
/// `RUST_LOG` and fall back to `default_level`.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(default_level: &str) -> Result<(), TryInitError> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(env_filter)
        .try_init()
}

#[cfg(target_arch = "wasm32")]
pub fn init(default_level: &str) -> Result<(), TryInitError> {
    use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt};
    use tracing_web::MakeWebConsoleWriter;

    let level = default_level.parse().unwrap_or(LevelFilter::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(level)
        .try_init()
}
