//! Console - общий stdout для всех потоков
//! Console - shared stdout for every thread
//!
//! И `kprintln!`, и логгер пишут через один `spin::Mutex`, поэтому
//! табло одного потока не перемешивается со строками другого.
//! Both `kprintln!` and the logger write through one `spin::Mutex`, so one
//! thread's board never interleaves with another thread's lines.

use std::fmt;
use std::io::{self, Write as _};
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::{Mutex, Once};

struct ConsoleWriter;

impl fmt::Write for ConsoleWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        io::stdout().lock().write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

static CONSOLE_LOCK: Mutex<ConsoleWriter> = Mutex::new(ConsoleWriter);

/// Момент старта - отсчёт для временных меток логов.
/// Start instant - origin for log timestamps.
static BOOT_TIME: Once<Instant> = Once::new();

/// Внутренняя функция для макроса kprint!
/// Internal function for kprint! macro
pub fn _print(args: fmt::Arguments<'_>) {
    use fmt::Write;
    let mut console = CONSOLE_LOCK.lock();
    console.write_fmt(args).ok();
    io::stdout().flush().ok();
}

#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => {
        $crate::console::_print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! kprintln {
    ()            => ($crate::kprint!("\n"));
    ($($arg:tt)*) => ($crate::kprint!("{}\n", format_args!($($arg)*)));
}

// ── log::Log поверх консоли / log::Log over the console ─────────────────────

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = BOOT_TIME.call_once(Instant::now).elapsed();
        _print(format_args!(
            "[{:>4}.{:03}] {} [{}] {}\n",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
            level_tag(record.level()),
            short_target(record.target()),
            record.args(),
        ));
    }

    fn flush(&self) {
        io::stdout().flush().ok();
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn  => "WARN ",
        Level::Info  => "INFO ",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// `libdynq::queue` → `queue`, `dynq_sim::shell` → `shell`
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// Установить логгер консоли. Повторный вызов вернёт ошибку.
/// Install the console logger. A second call returns an error.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    BOOT_TIME.call_once(Instant::now);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_target() {
        assert_eq!(short_target("libdynq::queue"), "queue");
        assert_eq!(short_target("dynq_sim::monitor"), "monitor");
        assert_eq!(short_target("dynq"), "dynq");
    }

    #[test]
    fn test_level_tags_aligned() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            assert_eq!(level_tag(level).len(), 5);
        }
    }
}
