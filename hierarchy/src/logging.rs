//! Subscriber setup for the `hierarchy` binary.
//!
//! The library side only emits `tracing` events: per-operation counts at
//! `debug` from [`crate::core::engine`] and a `warn` when a traversal aborts
//! on a cycle. Embedding applications install their own subscriber; the
//! binary calls [`init`] once before parsing arguments.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Send engine events to stderr so stdout stays a clean JSON document.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`, which keeps
/// cycle reports visible while hiding per-call counts.
///
/// ```bash
/// RUST_LOG=hierarchy=debug hierarchy tree --input records.json
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact().without_time())
        .init();
}
