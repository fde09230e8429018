//! Subscriber setup for the `netflow` binary.

use std::env;
use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a stderr subscriber.
///
/// `-v` flags win over `NETFLOW_TRACE`; with neither, logging is off.
/// `NETFLOW_LOG_FORMAT` picks `pretty` (default) or `json`.
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbosity {
        0 => env::var("NETFLOW_TRACE").unwrap_or_else(|_| "off".to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let filter = if level.eq_ignore_ascii_case("off") {
        EnvFilter::default().add_directive(LevelFilter::OFF.into())
    } else {
        EnvFilter::try_new(&level).map_err(|err| format!("Invalid log filter: {err}"))?
    };

    let format = env::var("NETFLOW_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let registry = tracing_subscriber::registry().with(filter);
    if format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).json())
            .try_init()?;
    } else if format.eq_ignore_ascii_case("pretty") {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).pretty())
            .try_init()?;
    } else {
        return Err("Invalid NETFLOW_LOG_FORMAT (expected 'json' or 'pretty')".into());
    }
    Ok(())
}
