use log::Level;

/// Send `log` records to the browser console; only the first call installs the logger.
pub fn init_logging(level: Level) {
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}
