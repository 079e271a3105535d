use crate::core::config::LoggingConfig;
use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// sqlx logs every statement at INFO; keep it to slow queries and failures
const QUIET_DEPENDENCIES: &str = "sqlx=warn";

/// Filter from `RUST_LOG`, or the configured level with noisy crates capped
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},{}", level, QUIET_DEPENDENCIES)))
}

/// Install the global subscriber: JSON lines by default, pretty output for `console`
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(&config.level);

    let use_console = config.console || config.format == "console";

    if use_console {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_line_number(true)
            )
            .try_init()
            .context("Failed to install console log subscriber")?;
    } else {
        // One flat object per line; request spans from the trace layer are attached
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false)
            )
            .try_init()
            .context("Failed to install JSON log subscriber")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_caps_sqlx() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }

        let filter = build_filter("debug").to_string();
        assert!(filter.contains("debug"));
        assert!(filter.contains("sqlx=warn"));
    }

    #[test]
    fn test_second_init_is_an_error() {
        let config = LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
            console: false,
        };

        // Whichever call runs first may win; a later one must report, not panic
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
