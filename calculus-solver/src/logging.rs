//! Logging setup shared by the binaries.

use log::LevelFilter;
use once_cell::sync::OnceCell;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

static LOGGER: OnceCell<()> = OnceCell::new();

/// Initializes the terminal logger, writing to stderr so that stdout only carries solutions.
/// Calling this more than once has no effect.
pub fn init(level: LevelFilter) {
    LOGGER.get_or_init(|| {
        let config = ConfigBuilder::new()
            .set_time_level(LevelFilter::Off)
            .build();
        let result = CombinedLogger::init(vec![
            TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto),
        ]);
        if let Err(err) = result {
            eprintln!("failed to initialize logging: {}", err);
        }
    });
}

/// Parses a log level name, such as `warn` or `debug`.
pub fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse::<LevelFilter>()
        .map_err(|_| format!(
            "invalid log level `{}`, expected one of: off, error, warn, info, debug, trace",
            s,
        ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(parse_level("warn"), Ok(LevelFilter::Warn));
        assert_eq!(parse_level("DEBUG"), Ok(LevelFilter::Debug));
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn init_twice() {
        init(LevelFilter::Off);
        init(LevelFilter::Off);
    }
}
