use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

/// Installs a global fmt subscriber.
///
/// The level is read from the `LOG_LEVEL` environment variable
/// (`TRACE`, `DEBUG`, `INFO`, `WARN`, `ERROR`), defaulting to `INFO`.
/// Calling it more than once is harmless.
pub fn setup_logger() {
    INIT.call_once(|| {
        let level = parse_level(env::var("LOG_LEVEL").ok().as_deref());

        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false)
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Log level set to: {}", level);
        }
    });
}

pub(crate) fn parse_level(value: Option<&str>) -> Level {
    match value.map(|v| v.trim().to_uppercase()).as_deref() {
        Some("TRACE") => Level::TRACE,
        Some("DEBUG") => Level::DEBUG,
        Some("WARN") | Some("WARNING") => Level::WARN,
        Some("ERROR") => Level::ERROR,
        _ => Level::INFO,
    }
}
