mod fixtures;

pub use fixtures::*;
use log::LevelFilter;
use sluice::Placeholder;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Collect the `?` markers of `query` the way a parser would, in source order
/// with provisional indexes. Markers inside single quoted literals are skipped.
pub fn discover_placeholders(query: &str) -> Vec<Option<Placeholder>> {
    let mut quoted = false;
    let mut result = Vec::new();
    for (position, c) in query.chars().enumerate() {
        match c {
            '\'' => quoted = !quoted,
            '?' if !quoted => result.push(Some(Placeholder::new(position, result.len() as u32))),
            _ => {}
        }
    }
    result
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
