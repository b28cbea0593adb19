use log::LevelFilter;

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Routes `stoich_forge` log records to stderr at the level chosen by `-v`.
/// `RUST_LOG`, when set, overrides the flag.
pub fn init_logger(verbosity: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("stoich_forge", level_for(verbosity))
        .format_timestamp(None)
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Debug);
        assert_eq!(level_for(2), LevelFilter::Trace);
        assert_eq!(level_for(7), LevelFilter::Trace);
    }
}
