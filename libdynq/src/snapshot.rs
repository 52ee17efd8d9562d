//! Snapshot - неизменяемая картина очереди
//! Snapshot - read-only picture of the queue
//!
//! Формат вывода / Render layout:
//!
//! ```text
//! Running: [1B]
//! ---------------------------
//! DQ: (bottom) [1B]
//! P => [0F] [2F] (top)
//! ---------------------------
//! WQ: [3B: 2t]
//! ...
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::process::{Pid, ProcessView};

const RULE: &str = "---------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitingView {
    pub process:   ProcessView,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Готовые background-процессы / ready background processes
    pub background_count: usize,
    /// Снизу вверх / bottom to top
    pub background: Vec<ProcessView>,
    /// В порядке вставки / insertion order
    pub foreground: Vec<ProcessView>,
    /// По возрастанию pid / ascending pid
    pub waiting: Vec<WaitingView>,
}

impl Snapshot {
    pub fn process_count(&self) -> usize {
        self.background.len() + self.foreground.len() + self.waiting.len()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.pids().any(|p| p == pid)
    }

    /// Все pid'ы: background, foreground, waiting.
    pub fn pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.background
            .iter()
            .chain(self.foreground.iter())
            .map(|v| v.pid)
            .chain(self.waiting.iter().map(|w| w.process.pid))
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Running: [{}B]", self.background_count)?;
        writeln!(f, "{}", RULE)?;

        f.write_str("DQ: (bottom)")?;
        for view in &self.background {
            write!(f, " [{}]", view)?;
        }
        f.write_str("\nP =>")?;
        for view in &self.foreground {
            write!(f, " [{}]", view)?;
        }
        writeln!(f, " (top)")?;
        writeln!(f, "{}", RULE)?;

        f.write_str("WQ:")?;
        for w in &self.waiting {
            write!(f, " [{}: {}t]", w.process, w.remaining)?;
        }
        f.write_str("\n...")
    }
}
