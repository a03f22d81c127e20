//! Logging system demonstration
//!
//! Shows the output formats with a few playback-shaped log lines.
//!
//! Run with:
//! ```bash
//! cargo run --example logging_demo -p core-runtime
//! cargo run --example logging_demo -p core-runtime -- json
//! cargo run --example logging_demo -p core-runtime -- compact "core_playback=trace"
//! ```

use bridge_traits::logging::LogLevel;
use core_runtime::logging::{init_logging, redact_url, strip_path, LogFormat, LoggingConfig};
use std::env;
use tracing::{debug, info, info_span, trace, warn};

fn main() {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        Some(_) => LogFormat::Pretty,
        None => LogFormat::default(),
    };

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_spans(true);

    if let Some(filter) = args.get(2) {
        config = config.with_filter(filter.clone());
    }

    if let Err(err) = init_logging(config) {
        eprintln!("{err}");
        return;
    }

    let url = "https://cdn.example.com/tracks/first-song.mp3?Signature=abc";
    let span = info_span!("session", file = %strip_path(redact_url(url)));
    let _entered = span.enter();

    info!(url = %redact_url(url), "Opening playback session");
    trace!(event = "loadStart", "Media event");
    debug!(event = "canPlay", duration = 180.0, "Media event");
    warn!(event = "error", "Media engine reported an error");
    info!(reason = "failed", "Playback session torn down");
}
