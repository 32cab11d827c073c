use log::{Level, LevelFilter, Metadata, Record};
use std::sync::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use chrono::Local;
use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Appends `timestamp [LEVEL] message` lines to a file.
pub struct Logger {
    file: Mutex<std::fs::File>,
    level: Level,
}

impl Logger {
    pub fn new(log_file: &str, level: Level) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = self.file.lock() {
                let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(
                    file,
                    "{} [{}] {}",
                    timestamp,
                    record.level(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level)
        .map_err(|_| Error::ConfigError(format!("Unknown log level: {}", level)))
}

/// Installs the global logger: the file logger when a file is configured,
/// `env_logger` otherwise (which still honours `RUST_LOG`).
pub fn init(config: &LoggingConfig, debug: bool) -> Result<()> {
    let filter = if debug { LevelFilter::Debug } else { parse_level(&config.level)? };

    match &config.file {
        Some(path) => {
            let level = filter.to_level().unwrap_or(Level::Error);
            let logger = Logger::new(path, level)?;
            log::set_boxed_logger(Box::new(logger))
                .map_err(|e| Error::InternalError(e.to_string()))?;
            log::set_max_level(filter);
        }
        None => {
            env_logger::Builder::new()
                .filter_level(filter)
                .parse_default_env()
                .try_init()
                .map_err(|e| Error::InternalError(e.to_string()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("info").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::Debug);
        assert!(parse_level("chatty").is_err());
    }

    #[test]
    fn test_file_logger_filters_and_writes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bot.log");
        let logger = Logger::new(path.to_str().unwrap(), Level::Info)?;

        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("lookup failed"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("too chatty"))
                .build(),
        );
        logger.flush();

        let contents = std::fs::read_to_string(&path)?;
        assert!(contents.contains("[WARN] lookup failed"));
        assert!(!contents.contains("too chatty"));
        Ok(())
    }
}
