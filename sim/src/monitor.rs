//! Monitor - имитация прерывания таймера / timer interrupt stand-in
//!
//! Раз в `monitor_interval`: `tick()` + табло. Без запроса на остановку
//! крутится вечно.
//! Every `monitor_interval`: `tick()` + board. Without a stop request it
//! loops forever.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use libdynq::DynamicQueue;

use crate::config::Config;
use crate::kprintln;

#[derive(Default)]
struct ShutdownInner {
    requested: AtomicBool,
    linger:    AtomicU32,
}

/// Кооперативная остановка монитора / Cooperative monitor stop
#[derive(Clone, Default)]
pub struct Shutdown {
    inner: Arc<ShutdownInner>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Остановиться, отработав ещё `linger` тиков.
    /// Stop after `linger` more sweeps.
    pub fn request(&self, linger: u32) {
        self.inner.linger.store(linger, Ordering::Relaxed);
        self.inner.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.inner.requested.load(Ordering::Acquire)
    }

    /// Вызывается перед каждым тиком; тратит один тик из запаса.
    /// Called before every sweep; spends one sweep of the budget.
    fn should_stop(&self) -> bool {
        if !self.is_requested() {
            return false;
        }
        self.inner
            .linger
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_err()
    }
}

/// Возвращает число выполненных тиков.
/// Returns the number of sweeps performed.
pub fn run(dq: &DynamicQueue, config: &Config, shutdown: &Shutdown) -> usize {
    let mut sweeps = 0;

    while !shutdown.should_stop() {
        thread::sleep(config.monitor_interval);
        let woke = dq.tick();
        sweeps += 1;
        if woke > 0 {
            log::info!("tick {}: woke {}", sweeps, woke);
        }
        kprintln!("{}", dq.snapshot());
    }

    log::info!("stopped after {} ticks", sweeps);
    sweeps
}
