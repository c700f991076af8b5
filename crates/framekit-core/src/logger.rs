//! Logging setup for the framekit crates.
//!
//! The workspace logs through the [`log`] facade: library code emits sparse
//! `debug!` records on graph mutations and odometry resets, tagged with the
//! emitting crate as the record target. This module installs a small stderr
//! sink for binaries and tests that want to see those records without
//! wiring up a full logging stack; the `tracing` feature offers a
//! structured subscriber instead.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

/// Stderr sink printing `elapsed LEVEL target: message` lines.
///
/// The target names the emitting crate (`framekit_graph`, ...), which is
/// usually the only context needed to follow a mutation trail through the
/// graph.
struct FramekitLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for FramekitLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed();
        let _ = writeln!(
            std::io::stderr(),
            "{:>4}.{:03}s {:5} {}: {}",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<FramekitLogger> = OnceLock::new();

/// Install the stderr logger with the given level filter.
///
/// The first call wins; later calls are no-ops and keep the level chosen at
/// installation.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| FramekitLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(logger.level);
    Ok(())
}

/// Install the stderr logger at the level named by the `FRAMEKIT_LOG`
/// environment variable (`off`, `error`, ... `trace`), defaulting to `info`
/// when unset or unparseable.
pub fn init_from_env() -> Result<(), log::SetLoggerError> {
    init_with_level(parse_level(std::env::var("FRAMEKIT_LOG").ok().as_deref()))
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install a `tracing` subscriber for the workspace.
///
/// The filter defaults to `framekit=debug` and can be overridden through
/// `RUST_LOG`. Quietly keeps an already-installed subscriber.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("framekit=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .finish()
        .try_init();
}
