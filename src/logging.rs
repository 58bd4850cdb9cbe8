//! File logging for the terminal front end, which owns stdout.

use std::str::FromStr;

use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

use crate::config::LoggingConfig;
use crate::error::{GameError, GameResult};

/// Installs a file logger per `[logging]`.  Does nothing when no file is set.
pub fn init_log(config: &LoggingConfig) -> GameResult<()> {
    let Some(path) = config.file.as_deref() else {
        return Ok(());
    };
    let level = LevelFilter::from_str(&config.level)
        .map_err(|_| GameError::Logging(format!("unknown log level {:?}", config.level)))?;

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(path)
        .map_err(|e| GameError::Logging(format!("{path}: {e}")))?;

    let log_config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .map_err(|e| GameError::Logging(e.to_string()))?;

    log4rs::init_config(log_config).map_err(|e| GameError::Logging(e.to_string()))?;
    Ok(())
}
