use env_logger::{Builder, Env};

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn` level.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
