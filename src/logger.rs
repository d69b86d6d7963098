use chrono::{DateTime, Utc};
use log::{LevelFilter, Metadata, Record};

pub static LOGGER: CliLogger = CliLogger;

/// Writes `[timestamp] LEVEL - message` lines to stderr so stdout stays clean for output.
pub struct CliLogger;

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now: DateTime<Utc> = Utc::now();
            eprintln!(
                "[{}] {} - {}",
                now.to_rfc3339(),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

pub fn init(verbosity: u8) -> anyhow::Result<()> {
    log::set_logger(&LOGGER)
        .map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))?;
    log::set_max_level(level_for_verbosity(verbosity));
    Ok(())
}
