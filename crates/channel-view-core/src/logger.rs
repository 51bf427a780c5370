//! Diagnostics go to stderr; stdout carries only the viewer's own report.
//!
//! `init_with_level` installs a `log` backend that prefixes each line with the
//! time since startup. With the `tracing` feature, `init_tracing` installs a
//! `tracing-subscriber` instead.

use std::fmt::Write as _;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ElapsedLogger {
    level: LevelFilter,
    started: Instant,
}

/// `[  0.012s  INFO] message`; debug and trace lines also name their target.
fn render(record: &Record, elapsed_secs: f64) -> String {
    let mut line = format!("[{:7.3}s {:>5}", elapsed_secs, record.level());
    if record.level() >= Level::Debug {
        let _ = write!(line, " {}", record.target());
    }
    let _ = write!(line, "] {}", record.args());
    line
}

impl Log for ElapsedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = render(record, self.started.elapsed().as_secs_f64());
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<ElapsedLogger> = OnceLock::new();

/// Install the stderr logger. Only the first call has an effect.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| ElapsedLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Filter directive used when `RUST_LOG` is unset.
#[cfg(feature = "tracing")]
fn directive_for(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

/// Install a `tracing-subscriber` on stderr.
///
/// `RUST_LOG` wins when set; otherwise events are filtered at `level`.
/// Colors are only emitted when stderr is a terminal.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter) {
    use std::io::IsTerminal;
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive_for(level)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(fmt::time::Uptime::default())
        .finish()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lines_omit_target() {
        let line = render(
            &Record::builder()
                .level(Level::Info)
                .target("channel_view::viewer")
                .args(format_args!("wrote frame"))
                .build(),
            1.5,
        );
        assert_eq!(line, "[  1.500s  INFO] wrote frame");
    }

    #[test]
    fn debug_lines_name_target() {
        let line = render(
            &Record::builder()
                .level(Level::Debug)
                .target("channel_view::decode")
                .args(format_args!("decoded"))
                .build(),
            0.0,
        );
        assert_eq!(line, "[  0.000s DEBUG channel_view::decode] decoded");
    }

    #[test]
    fn repeated_init_keeps_first_level() {
        init_with_level(LevelFilter::Warn).expect("first init");
        init_with_level(LevelFilter::Trace).expect("second init");
        assert_eq!(log::max_level(), LevelFilter::Warn);
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_directive_follows_level_flag() {
        assert_eq!(directive_for(LevelFilter::Off), "off");
        assert_eq!(directive_for(LevelFilter::Debug), "debug");
    }
}
