use env_logger::{Builder, Env};

/// Installs the `env_logger` backend. `RUST_LOG` wins over `default_level`.
/// Calling it twice is harmless.
pub fn init(default_level: &str) {
    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init();
}
