// src/logger.rs
use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

use log::LevelFilter;

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

fn format_line(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    let elapsed = fmt_elapsed(start().elapsed().as_millis());
    out.finish(format_args!("[{elapsed}][{}] {message}", record.level()))
}

/// Install the global logger.
///
/// Console (stderr) gets `console_level`; the optional log file always gets
/// debug output for this crate so a failed run can be inspected afterwards.
pub fn init(console_level: LevelFilter, file: Option<&Path>) -> Result<(), fern::InitError> {
    start();

    let console = fern::Dispatch::new()
        .format(format_line)
        .level(LevelFilter::Warn)
        .level_for("poke_scrape", console_level)
        .chain(io::stderr());

    let mut root = fern::Dispatch::new().chain(console);

    if let Some(path) = file {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fern::Dispatch::new()
            .format(format_line)
            .level(LevelFilter::Warn)
            .level_for("poke_scrape", LevelFilter::Debug)
            .chain(fern::log_file(path)?);
        root = root.chain(file);
    }

    root.apply()?;
    Ok(())
}

/// `-q` wins over `-v`; each `-v` raises one level from Info.
pub fn level_from_flags(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_zero_padded() {
        assert_eq!(fmt_elapsed(0), "00:00:00.000");
        assert_eq!(fmt_elapsed(3_723_004), "01:02:03.004");
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(level_from_flags(2, true), LevelFilter::Error);
        assert_eq!(level_from_flags(0, false), LevelFilter::Info);
        assert_eq!(level_from_flags(1, false), LevelFilter::Debug);
    }
}
