use crate::config::Config;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

fn parse_level(level: &str) -> Level {
    match level.to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Installs the global fmt subscriber at the level from [`Config`]. Safe to
/// call repeatedly; only the first call has an effect.
pub fn setup_logger() {
    INIT.call_once(|| {
        let config = Config::new();
        let subscriber = FmtSubscriber::builder()
            .with_max_level(parse_level(&config.log_level))
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("global subscriber already set");
        }
    });
}
