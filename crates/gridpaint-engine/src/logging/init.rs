use std::sync::Once;

/// Filter applied when neither the config nor `RUST_LOG` provides one.
///
/// wgpu is chatty at info level; keep it at warnings.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "gridpaint_grid=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Resolves the filter string: explicit config, then `RUST_LOG`, then the default.
    pub fn resolved_filter(&self, rust_log: Option<String>) -> String {
        self.env_filter
            .clone()
            .or(rust_log)
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolved_filter(std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // try_init: a test harness or embedding app may already own the logger.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter {filter:?}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig { env_filter: Some("debug".into()), ..Default::default() };
        assert_eq!(cfg.resolved_filter(Some("warn".into())), "debug");
    }

    #[test]
    fn rust_log_used_when_not_configured() {
        assert_eq!(LoggingConfig::default().resolved_filter(Some("warn".into())), "warn");
    }

    #[test]
    fn default_filter_quiets_wgpu() {
        let filter = LoggingConfig::default().resolved_filter(None);
        assert_eq!(filter, DEFAULT_FILTER);
        assert!(filter.contains("wgpu_core=warn"));
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
