use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for this crate: the configured level, raised to `debug` by `--verbose`.
pub fn log_directive(level: &str, verbose: bool) -> String {
    let level = match level {
        "trace" | "debug" => level,
        _ if verbose => "debug",
        _ => level,
    };
    format!("hotel_booking={},warn", level)
}

// RUST_LOG 優先於配置檔
fn build_filter(level: &str, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_directive(level, verbose)))
}

pub fn init_cli_logger(level: &str, verbose: bool) {
    tracing_subscriber::registry()
        .with(build_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}

/// JSON 格式日誌，方便交給其他工具處理
pub fn init_json_logger(level: &str, verbose: bool) {
    tracing_subscriber::registry()
        .with(build_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .json()
                .with_current_span(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_is_used() {
        assert_eq!(log_directive("warn", false), "hotel_booking=warn,warn");
        assert_eq!(log_directive("debug", false), "hotel_booking=debug,warn");
        assert_eq!(log_directive("info", false), "hotel_booking=info,warn");
    }

    #[test]
    fn test_verbose_raises_to_debug_but_keeps_trace() {
        assert_eq!(log_directive("warn", true), "hotel_booking=debug,warn");
        assert_eq!(log_directive("info", true), "hotel_booking=debug,warn");
        assert_eq!(log_directive("trace", true), "hotel_booking=trace,warn");
    }

    #[test]
    fn test_directive_parses_as_filter() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(EnvFilter::try_new(log_directive(level, false)).is_ok());
        }
    }
}
