use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Initializes the terminal logger. Fails if a logger is already set.
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .build();
    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}
