use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::internal_prelude::*;

/// Install the tracing subscriber.
///
/// The default level is derived from the number of `-v` flags and can be
/// overridden via `RUST_LOG`. Log output goes to stderr so it doesn't mix
/// with the progress lines on stdout.
pub fn install_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env()
        .wrap_err("Failed to build tracing filter")?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
