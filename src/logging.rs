use std::fs::OpenOptions;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use crate::config::LoggingConfig;

/// Directory holding the optional log file, before tilde expansion.
const LOG_DIR: &str = "~/.local/share/shminify";

/// Install the global logger: stderr always, plus the log file when enabled.
///
/// `verbosity` shifts the configured level up (`-v`) or down (`-q`).
/// Best-effort: failures are silently ignored (logging must never block
/// minification).
pub fn init(config: &LoggingConfig, verbosity: i8) {
    let level = adjust(config.level.to_filter(), verbosity);
    let log_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    if config.file
        && let Some(file) = open_log_file()
    {
        let file_config = ConfigBuilder::new().set_time_format_rfc3339().build();
        loggers.push(WriteLogger::new(level, file_config, file));
    }

    let _ = CombinedLogger::init(loggers);
}

fn open_log_file() -> Option<std::fs::File> {
    let log_dir = PathBuf::from(shellexpand::tilde(LOG_DIR).as_ref());
    std::fs::create_dir_all(&log_dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("shminify.log"))
        .ok()
}

/// Move `level` by `steps` positions, clamped to Off..=Trace.
fn adjust(level: LevelFilter, steps: i8) -> LevelFilter {
    const ORDER: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let current = ORDER.iter().position(|l| *l == level).unwrap_or(2) as i16;
    let target = (current + i16::from(steps)).clamp(0, ORDER.len() as i16 - 1);
    ORDER[target as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_and_lowers() {
        assert_eq!(adjust(LevelFilter::Warn, 0), LevelFilter::Warn);
        assert_eq!(adjust(LevelFilter::Warn, 2), LevelFilter::Debug);
        assert_eq!(adjust(LevelFilter::Warn, -1), LevelFilter::Error);
    }

    #[test]
    fn verbosity_is_clamped() {
        assert_eq!(adjust(LevelFilter::Warn, 10), LevelFilter::Trace);
        assert_eq!(adjust(LevelFilter::Error, -5), LevelFilter::Off);
    }
}
