use flexi_logger::{Logger, LoggerHandle};

/// Level used when `-v` is given.
const VERBOSE_LEVEL: &str = "debug";
const DEFAULT_LEVEL: &str = "warn";

/// Pick the log level: `-v` wins, then the configured level, then `warn`.
pub(super) fn resolve_level(verbose: bool, configured: Option<&str>) -> &'static str {
    if verbose {
        return VERBOSE_LEVEL;
    }
    configured
        .and_then(normalize_level)
        .unwrap_or(DEFAULT_LEVEL)
}

fn normalize_level(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        "off" => Some("off"),
        _ => None,
    }
}

/// Start logging to stderr. The handle must stay alive for the whole run.
/// A logger that fails to start is reported and skipped.
pub(super) fn init(level: &str) -> Option<LoggerHandle> {
    let started = Logger::try_with_str(level).and_then(|logger| {
        logger
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
    });
    match started {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_beats_config() {
        assert_eq!(resolve_level(true, Some("error")), "debug");
    }

    #[test]
    fn configured_level_is_normalized() {
        assert_eq!(resolve_level(false, Some(" Warning ")), "warn");
        assert_eq!(resolve_level(false, Some("INFO")), "info");
    }

    #[test]
    fn unknown_or_missing_level_defaults_to_warn() {
        assert_eq!(resolve_level(false, Some("loud")), "warn");
        assert_eq!(resolve_level(false, None), "warn");
    }
}
