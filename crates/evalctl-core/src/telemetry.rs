//! Log setup for the `evalctl` binary.
//!
//! stdout belongs to command output: `eval delete` prints exactly one
//! success line there and `eval list` prints its table or JSON. Every log
//! line therefore goes to stderr, in either text or JSON form.

use std::io;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber.
///
/// `RUST_LOG` wins over `level` when set. A subscriber that is already
/// installed is left in place.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let (text_layer, json_layer) = if json {
        let layer = fmt::layer()
            .with_target(false)
            .with_writer(io::stderr)
            .json();
        (None, Some(layer))
    } else {
        let layer = fmt::layer().with_target(false).with_writer(io::stderr);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
