//! Logging setup shared by every front end.
//!
//! Console output goes to stderr so stdout stays free for results (JSON
//! reports, filter graphs). When a log file is given, it receives everything
//! down to debug level regardless of the console threshold.

use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use std::path::Path;

const CONSOLE_PATTERN: &str = "[{l}] {m}{n}";
const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}";

/// Installs the global logger. Can only succeed once per process.
pub fn setup_logging(console_level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let config = build_config(console_level, log_file)?;
    log4rs::init_config(config)?;
    Ok(())
}

fn build_config(console_level: LevelFilter, log_file: Option<&Path>) -> Result<Config> {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();

    let mut builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(console_level)))
            .build("console", Box::new(console)),
    );
    let mut root = Root::builder().appender("console");
    let mut root_level = console_level;

    if let Some(log_file) = log_file {
        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file_appender = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
            .build(log_file)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file_appender)));
        root = root.appender("file");
        root_level = root_level.max(LevelFilter::Debug);
    }

    Ok(builder.build(root.build(root_level))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_only_config() {
        let config = build_config(LevelFilter::Warn, None).unwrap();
        assert_eq!(config.appenders().len(), 1);
        assert_eq!(config.root().level(), LevelFilter::Warn);
    }

    #[test]
    fn test_file_config_creates_parent_and_lowers_root_level() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("logs").join("nightcore.log");

        let config = build_config(LevelFilter::Info, Some(&log_file)).unwrap();
        assert_eq!(config.appenders().len(), 2);
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert!(log_file.parent().unwrap().is_dir());
    }

    #[test]
    fn test_trace_console_level_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let config = build_config(LevelFilter::Trace, Some(&dir.path().join("a.log"))).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Trace);
    }
}
