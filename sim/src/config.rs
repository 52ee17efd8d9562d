//! Настройки симуляции / Simulation settings
//!
//! Переменные окружения / Environment variables:
//!   DYNQ_SHELL_MS      - пауза shell между командами  / shell pause between commands
//!   DYNQ_MONITOR_MS    - период таймера монитора      / monitor timer period
//!   DYNQ_SLEEP_TICKS   - на сколько тиков усыплять    / sweeps a process sleeps for
//!   DYNQ_LINGER_TICKS  - тиков монитора после shell   / monitor sweeps after shell ends
//!   DYNQ_LOG           - off|error|warn|info|debug|trace

use std::fmt;
use std::time::Duration;

use log::LevelFilter;

pub const SHELL_MS_VAR: &str     = "DYNQ_SHELL_MS";
pub const MONITOR_MS_VAR: &str   = "DYNQ_MONITOR_MS";
pub const SLEEP_TICKS_VAR: &str  = "DYNQ_SLEEP_TICKS";
pub const LINGER_TICKS_VAR: &str = "DYNQ_LINGER_TICKS";
pub const LOG_VAR: &str          = "DYNQ_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub shell_interval:   Duration,
    pub monitor_interval: Duration,
    pub sleep_ticks:      u32,
    pub linger_ticks:     u32,
    pub log_level:        LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shell_interval:   Duration::from_millis(500),
            monitor_interval: Duration::from_millis(1000),
            sleep_ticks:      2,
            linger_ticks:     2,
            log_level:        LevelFilter::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub var:   &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.var)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Незаданная переменная → значение по умолчанию.
    /// Unset variable → default value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ms) = parse_var(&lookup, SHELL_MS_VAR)? {
            config.shell_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var(&lookup, MONITOR_MS_VAR)? {
            config.monitor_interval = Duration::from_millis(ms);
        }
        if let Some(ticks) = parse_var(&lookup, SLEEP_TICKS_VAR)? {
            config.sleep_ticks = ticks;
        }
        if let Some(ticks) = parse_var(&lookup, LINGER_TICKS_VAR)? {
            config.linger_ticks = ticks;
        }
        if let Some(level) = parse_var(&lookup, LOG_VAR)? {
            config.log_level = level;
        }
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value: raw }),
    }
}
