use std::fs::OpenOptions;

use crate::config::{self, LoggingSettings};

/// Load settings, falling back to defaults when the config is missing or invalid.
///
/// Logging is not up yet at this point, so the reason for a fallback is
/// returned for the caller to log once it is.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                (
                    config::Settings::default(),
                    Some(format!("invalid config, using defaults: {msg}")),
                )
            } else {
                (s, None)
            }
        }
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}

/// Set up `env_logger`. `RUST_LOG` overrides `logging.level`; output goes to
/// `logging.file` when one is configured.
pub fn init_logging(logging: &LoggingSettings) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(logging.level.as_str()),
    );

    if let Some(path) = &logging.file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // Only fails if a logger is already installed, which is fine to keep.
    let _ = builder.try_init();
    Ok(())
}
