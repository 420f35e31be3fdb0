use log::Level;
use once_cell::sync::Lazy;

pub static CONFIG: Lazy<Config> = Lazy::new(Config::new);

pub struct Config {
    pub log_level: Level,
    /// Emulated seconds to run before exiting
    pub seconds: u64,
    pub sync_rtc: bool,
    pub enable_rtc: bool,
    /// Log undocumented register accesses as they happen instead of
    /// summarizing them on exit
    pub log_observations: bool,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_level: Level::Info,
            seconds: 5,
            sync_rtc: true,
            enable_rtc: true,
            log_observations: false,
        }
    }
}
