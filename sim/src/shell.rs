//! Shell - производитель процессов / process producer
//!
//! Раз в `shell_interval` создаёт процесс из списка команд, иногда сразу
//! усыпляет его, затем печатает табло.
//! Every `shell_interval` creates a process from the command list,
//! sometimes puts it straight to sleep, then prints the board.

use std::thread;

use libdynq::{Class, DynamicQueue, Error, Pid};

use crate::config::Config;
use crate::kprintln;

pub const COMMANDS: [&str; 6] = [
    "alarm clock",
    "todo list",
    "email check",
    "music player",
    "video player",
    "web browser",
];

/// 0 и 1 заняты shell и monitor / 0 and 1 are taken by shell and monitor
pub const FIRST_PID: u64 = 2;

/// Чётные pid - foreground, нечётные - background.
/// Even pids are foreground, odd pids are background.
pub fn class_for(pid: Pid) -> Class {
    if pid.as_u64() % 2 == 0 { Class::Foreground } else { Class::Background }
}

/// Усыплять каждый процесс, за которым идёт pid кратный трём.
/// Put to sleep every process whose successor pid is a multiple of three.
pub fn sleeps_on_spawn(pid: Pid) -> bool {
    (pid.as_u64() + 1) % 3 == 0
}

/// Отработать весь список команд. Возвращает число созданных процессов.
/// Run through the whole command list. Returns the number of processes created.
pub fn run(dq: &DynamicQueue, config: &Config) -> usize {
    let mut next = FIRST_PID;

    for line in COMMANDS {
        let pid = Pid(next);
        next += 1;

        let class = class_for(pid);
        dq.spawn(pid, class, line);
        log::info!("spawned {}{} {:?}", pid, class.tag(), line);

        if sleeps_on_spawn(pid) {
            match dq.sleep(pid, config.sleep_ticks) {
                Ok(()) => log::info!("{} sleeps for {} ticks", pid, config.sleep_ticks),
                // монитор мог успеть раньше / the monitor may have got there first
                Err(Error::NotFound(pid)) => log::debug!("{} no longer ready, skip sleep", pid),
            }
        }

        thread::sleep(config.shell_interval);
        kprintln!("{}", dq.snapshot());
    }

    (next - FIRST_PID) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use libdynq::Location;

    fn fast_config() -> Config {
        Config {
            shell_interval: Duration::ZERO,
            monitor_interval: Duration::ZERO,
            ..Config::default()
        }
    }

    #[test]
    fn test_class_and_sleep_pattern() {
        let classes: Vec<char> = (2..8).map(|id| class_for(Pid(id)).tag()).collect();
        assert_eq!(classes, vec!['F', 'B', 'F', 'B', 'F', 'B']);

        let sleepers: Vec<u64> = (2..8).filter(|&id| sleeps_on_spawn(Pid(id))).collect();
        assert_eq!(sleepers, vec![2, 5]);
    }

    #[test]
    fn test_run_populates_queue() {
        let dq = DynamicQueue::new();
        let config = fast_config();

        assert_eq!(run(&dq, &config), COMMANDS.len());

        let snap = dq.snapshot();
        assert_eq!(snap.process_count(), COMMANDS.len());
        assert_eq!(dq.locate(Pid(2)), Some(Location::Waiting { remaining: config.sleep_ticks }));
        assert_eq!(dq.locate(Pid(5)), Some(Location::Waiting { remaining: config.sleep_ticks }));
        assert_eq!(snap.foreground.iter().map(|v| v.pid.0).collect::<Vec<_>>(), vec![4, 6]);
        assert_eq!(snap.background.iter().map(|v| v.pid.0).collect::<Vec<_>>(), vec![3, 7]);
        assert_eq!(snap.background_count, 2);
    }
}
