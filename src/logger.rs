/// Installs the global `env_logger` backend.
///
/// Warnings are always shown since soft failures (a failed `git commit`, an
/// unreadable template file) are only ever reported through the log.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn })
        .format_timestamp(None)
        .init();
}
