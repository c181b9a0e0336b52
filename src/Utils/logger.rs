//! Logging setup of the binary: a terminal logger at the configured level and,
//! when `save_logs` names a file, a second logger writing to that file.
use crate::Rates::errors::RateResult;
use crate::settings::AnalysisOptions;
use log::{LevelFilter, info};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;

pub fn init_logging(level: LevelFilter, log_file: Option<&str>) -> RateResult<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(file_name) = log_file {
        loggers.push(WriteLogger::new(
            level,
            Config::default(),
            File::create(file_name)?,
        ));
    }
    // a logger installed earlier in the process stays in place
    if CombinedLogger::init(loggers).is_ok() {
        info!("Logging at level {}", level);
    }
    Ok(())
}

pub fn init_from_options(options: &AnalysisOptions) -> RateResult<()> {
    init_logging(options.level_filter()?, options.save_logs.as_deref())
}
