//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with an explicit filter (e.g. `"info"` or
/// `"placement_engine=debug"`), falling back to `RUST_LOG` when it is set
pub fn init_with_filter(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    if builder.try_init().is_err() {
        debug!("Logger already initialized, keeping existing configuration");
    }
}
