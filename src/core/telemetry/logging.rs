use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));
    // A subscriber installed by the host application wins.
    let _ = fmt().with_env_filter(env_filter).try_init();
}
