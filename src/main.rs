use KiReact::Examples::kinetics_examples::kin_examples;
use KiReact::Utils::logger::init_logger;
use KiReact::settings::{ContributionSettings, DEFAULT_SETTINGS_FILE};
use log::{LevelFilter, error};

pub fn main() {
    let settings = ContributionSettings::load_or_default(DEFAULT_SETTINGS_FILE);
    let level = settings.log_level_filter().unwrap_or(LevelFilter::Info);
    if let Err(e) = init_logger(level) {
        eprintln!("logger is not initialized: {}", e);
    }
    //
    let task: usize = 1;
    if let Err(e) = kin_examples(task, &settings) {
        error!("{}", e);
    }
}
