//! Dynamic Queue - ready-очереди + очередь ожидания
//! Dynamic Queue - ready lists + wait set
//!
//! Контейнеры / Containers:
//!   foreground - FIFO интерактивных процессов  / FIFO of interactive processes
//!   background - FIFO пакетных процессов       / FIFO of batch processes
//!   waiting    - pid → процесс со счётчиком    / pid → process with countdown
//!
//! Один `spin::Mutex` на всё состояние. Каждая операция держит его
//! целиком, поэтому операции линеаризуемы.
//! One `spin::Mutex` over all state. Every operation holds it for its
//! whole body, so operations are linearizable.
//!
//! Переходы / Transitions:
//!   enqueue      → ready (хвост своего класса / tail of its class)
//!   ready        → waiting  (sleep)
//!   waiting      → ready    (tick, когда счётчик дошёл до 0 / when countdown hits 0)

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;

use spin::Mutex;

use crate::process::{Class, Pid, Process};
use crate::snapshot::{Snapshot, WaitingView};
use crate::{Error, Result};

/// Где сейчас находится процесс / Where a process currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Foreground,
    Background,
    Waiting { remaining: u32 },
}

struct QueueState {
    foreground: VecDeque<Process>,
    background: VecDeque<Process>,
    waiting:    BTreeMap<Pid, Process>,
}

impl QueueState {
    const fn new() -> Self {
        Self {
            foreground: VecDeque::new(),
            background: VecDeque::new(),
            waiting:    BTreeMap::new(),
        }
    }

    fn ready_list(&mut self, class: Class) -> &mut VecDeque<Process> {
        match class {
            Class::Foreground => &mut self.foreground,
            Class::Background => &mut self.background,
        }
    }

    fn push_ready(&mut self, process: Process) {
        self.ready_list(process.class()).push_back(process);
    }

    /// Сначала foreground, потом background.
    /// Foreground first, then background.
    fn take_ready(&mut self, pid: Pid) -> Option<Process> {
        for list in [&mut self.foreground, &mut self.background] {
            if let Some(idx) = list.iter().position(|p| p.pid() == pid) {
                return list.remove(idx);
            }
        }
        None
    }

    fn process_count(&self) -> usize {
        self.foreground.len() + self.background.len() + self.waiting.len()
    }
}

pub struct DynamicQueue {
    state: Mutex<QueueState>,
}

impl DynamicQueue {
    pub const fn new() -> Self {
        Self { state: Mutex::new(QueueState::new()) }
    }

    /// Поставить процесс в хвост очереди его класса.
    /// Append a process to the tail of its class's ready list.
    pub fn enqueue(&self, process: Process) {
        log::trace!("enqueue {}{} ({:?})", process.pid(), process.class().tag(), process.label());
        self.state.lock().push_ready(process);
    }

    pub fn spawn(&self, pid: Pid, class: Class, label: &str) {
        self.enqueue(Process::new(pid, class, label));
    }

    /// Перевести готовый процесс в ожидание на `ticks` тиков.
    /// Move a ready process into the wait set for `ticks` sweeps.
    ///
    /// `Err(NotFound)` если процесса нет в ready-очередях (уже спит или
    /// неизвестен); состояние при этом не меняется.
    /// `Err(NotFound)` if the process is not ready (already waiting or
    /// unknown); state is left untouched.
    pub fn sleep(&self, pid: Pid, ticks: u32) -> Result<()> {
        let mut state = self.state.lock();
        let mut process = state.take_ready(pid).ok_or(Error::NotFound(pid))?;
        process.remaining_ticks = ticks;
        log::debug!("sleep {}{} for {} ticks", pid, process.class().tag(), ticks);
        state.waiting.insert(pid, process);
        Ok(())
    }

    /// Один тик таймера: уменьшить все счётчики, истёкших вернуть в ready.
    /// One timer sweep: decrement every countdown, move expired back to ready.
    ///
    /// Обход идёт по возрастанию pid, так что порядок пробуждения
    /// детерминирован. Возвращает число проснувшихся.
    /// Sweeps in ascending pid order, so wake order is deterministic.
    /// Returns how many processes woke.
    pub fn tick(&self) -> usize {
        let mut state = self.state.lock();

        let mut expired = Vec::new();
        for (pid, process) in state.waiting.iter_mut() {
            process.remaining_ticks = process.remaining_ticks.saturating_sub(1);
            if process.remaining_ticks == 0 {
                expired.push(*pid);
            }
        }

        for pid in &expired {
            if let Some(process) = state.waiting.remove(pid) {
                log::debug!("wake {}{}", pid, process.class().tag());
                state.push_ready(process);
            }
        }
        expired.len()
    }

    /// Согласованный снимок всех трёх контейнеров.
    /// Consistent snapshot of all three containers.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.lock();
        Snapshot {
            background_count: state.background.len(),
            background: state.background.iter().map(Process::view).collect(),
            foreground: state.foreground.iter().map(Process::view).collect(),
            waiting: state
                .waiting
                .values()
                .map(|p| WaitingView { process: p.view(), remaining: p.remaining_ticks })
                .collect(),
        }
    }

    pub fn locate(&self, pid: Pid) -> Option<Location> {
        let state = self.state.lock();
        if let Some(p) = state.waiting.get(&pid) {
            return Some(Location::Waiting { remaining: p.remaining_ticks });
        }
        if state.foreground.iter().any(|p| p.pid() == pid) {
            return Some(Location::Foreground);
        }
        if state.background.iter().any(|p| p.pid() == pid) {
            return Some(Location::Background);
        }
        None
    }

    /// Готовые background-процессы (всегда == длине списка).
    /// Ready background processes (always == list length).
    pub fn background_count(&self) -> usize {
        self.state.lock().background.len()
    }

    pub fn process_count(&self) -> usize {
        self.state.lock().process_count()
    }
}

impl Default for DynamicQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn pids(views: &[crate::ProcessView]) -> Vec<u64> {
        views.iter().map(|v| v.pid.0).collect()
    }

    #[test]
    fn test_enqueue_by_class() {
        let dq = DynamicQueue::new();
        dq.spawn(Pid(0), Class::Foreground, "shell");
        dq.spawn(Pid(1), Class::Background, "monitor");
        dq.spawn(Pid(2), Class::Foreground, "alarm clock");

        let snap = dq.snapshot();
        assert_eq!(pids(&snap.foreground), vec![0, 2]);
        assert_eq!(pids(&snap.background), vec![1]);
        assert_eq!(snap.background_count, 1);
        assert!(snap.waiting.is_empty());
        assert_eq!(dq.process_count(), 3);
    }

    #[test]
    fn test_sleep_moves_to_wait_set() {
        let dq = DynamicQueue::new();
        dq.spawn(Pid(3), Class::Background, "todo list");
        assert_eq!(dq.background_count(), 1);

        assert_eq!(dq.sleep(Pid(3), 4), Ok(()));
        assert_eq!(dq.background_count(), 0);
        assert_eq!(dq.locate(Pid(3)), Some(Location::Waiting { remaining: 4 }));
    }

    #[test]
    fn test_sleep_searches_foreground_first() {
        let dq = DynamicQueue::new();
        dq.spawn(Pid(7), Class::Foreground, "a");
        dq.spawn(Pid(8), Class::Background, "b");
        dq.sleep(Pid(7), 1).unwrap();

        let snap = dq.snapshot();
        assert!(snap.foreground.is_empty());
        assert_eq!(pids(&snap.background), vec![8]);
        assert_eq!(snap.waiting.len(), 1);
    }

    #[test]
    fn test_sleep_twice_is_not_found() {
        let dq = DynamicQueue::new();
        dq.spawn(Pid(5), Class::Foreground, "x");
        dq.sleep(Pid(5), 3).unwrap();

        assert_eq!(dq.sleep(Pid(5), 9), Err(Error::NotFound(Pid(5))));
        // счётчик не перезаписан / countdown not overwritten
        assert_eq!(dq.locate(Pid(5)), Some(Location::Waiting { remaining: 3 }));
    }

    #[test]
    fn test_zero_ticks_wakes_next_sweep() {
        let dq = DynamicQueue::new();
        dq.spawn(Pid(2), Class::Foreground, "x");
        dq.sleep(Pid(2), 0).unwrap();

        assert_eq!(dq.tick(), 1);
        assert_eq!(dq.locate(Pid(2)), Some(Location::Foreground));
    }

    #[test]
    fn test_wake_appends_to_tail() {
        let dq = DynamicQueue::new();
        dq.spawn(Pid(1), Class::Background, "a");
        dq.spawn(Pid(3), Class::Background, "b");
        dq.sleep(Pid(1), 1).unwrap();
        dq.spawn(Pid(5), Class::Background, "c");

        assert_eq!(dq.tick(), 1);
        let snap = dq.snapshot();
        assert_eq!(pids(&snap.background), vec![3, 5, 1]);
        assert_eq!(snap.background_count, 3);
    }

    #[test]
    fn test_wake_order_is_by_pid() {
        let dq = DynamicQueue::new();
        for id in [9, 4, 6] {
            dq.spawn(Pid(id), Class::Foreground, "x");
        }
        dq.sleep(Pid(9), 2).unwrap();
        dq.sleep(Pid(4), 2).unwrap();
        dq.sleep(Pid(6), 1).unwrap();

        assert_eq!(dq.tick(), 1);
        assert_eq!(dq.tick(), 2);
        assert_eq!(pids(&dq.snapshot().foreground), vec![6, 4, 9]);
    }

    #[test]
    fn test_locate_unknown() {
        let dq = DynamicQueue::new();
        assert_eq!(dq.locate(Pid(42)), None);
        assert_eq!(dq.tick(), 0);
    }
}
