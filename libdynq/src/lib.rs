//! libdynq - ядро планировщика DynQ / DynQ scheduler core
//!
//! Две очереди готовых процессов (foreground / background) + очередь
//! ожидания с таймером.
//! Two ready lists (foreground / background) + a timed wait set.
//!
//! Использование / Usage:
//!   use libdynq::{DynamicQueue, Class, Pid};
//!   let dq = DynamicQueue::new();
//!   dq.spawn(Pid(2), Class::Foreground, "todo list");
//!   dq.sleep(Pid(2), 3)?;
//!   dq.tick();
//!   println!("{}", dq.snapshot());

#![no_std]

extern crate alloc;

pub mod process;
pub mod queue;
pub mod snapshot;

pub use process::{Class, Pid, Process, ProcessFlags, ProcessView};
pub use queue::{DynamicQueue, Location};
pub use snapshot::{Snapshot, WaitingView};

use core::fmt;

/// Ошибки планировщика / Scheduler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Процесса нет ни в одной ready-очереди.
    /// Process is not in any ready list.
    NotFound(Pid),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(pid) => write!(f, "process {} is not ready", pid),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
