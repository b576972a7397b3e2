use log::LevelFilter;

pub fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Off,
        (false, true) => LevelFilter::Debug,
        (false, false) => LevelFilter::Info,
    }
}

/// Installs the stderr logger at the level picked by the command line.
pub fn init(quiet: bool, verbose: bool) {
    let level = level_for(quiet, verbose);

    // Fails only if a logger is already installed.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

/// Silences every record until the returned level is handed to
/// [`restore`]. Used while something else owns the terminal.
#[cfg(any(test, feature = "terminal"))]
pub fn suspend() -> LevelFilter {
    let level = log::max_level();
    log::set_max_level(LevelFilter::Off);
    level
}

#[cfg(any(test, feature = "terminal"))]
pub fn restore(level: LevelFilter) {
    log::set_max_level(level);
}
