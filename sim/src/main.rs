//! DynQ - точка входа симуляции / simulation entry point
//!
//! Потоки / Threads:
//!   main    - загрузка, затем разбор и запуск примерной команды
//!             boot, then parse + exec of the example command
//!   shell   - создаёт процессы / creates processes
//!   monitor - тики таймера / timer sweeps

use std::io;
use std::sync::Arc;
use std::thread;

use libdynq::{Class, DynamicQueue, Pid};

mod config;
mod console;
mod monitor;
mod shell;

use config::Config;
use monitor::Shutdown;

const EXAMPLE_COMMAND: &str = "example command";

fn main() -> io::Result<()> {
    let (config, config_err) = match Config::from_env() {
        Ok(config) => (config, None),
        Err(err)   => (Config::default(), Some(err)),
    };

    // 0. Консоль - первым делом / console first of all
    if let Err(err) = console::init(config.log_level) {
        kprintln!("[console] logger not installed: {}", err);
    }
    if let Some(err) = config_err {
        log::warn!("{}; using defaults", err);
    }
    log::info!("DynQ booting... {:?}", config);

    // 1. Очередь + загрузочные процессы / queue + bootstrap processes
    let dq = Arc::new(DynamicQueue::new());
    dq.spawn(Pid(0), Class::Foreground, "shell");
    dq.spawn(Pid(1), Class::Background, "monitor");
    kprintln!("{}", dq.snapshot());

    // 2. Shell + monitor
    let shutdown = Shutdown::new();

    let shell_thread = {
        let dq = Arc::clone(&dq);
        thread::Builder::new()
            .name("shell".into())
            .spawn(move || shell::run(&dq, &config))?
    };

    let monitor_thread = {
        let dq = Arc::clone(&dq);
        let shutdown = shutdown.clone();
        thread::Builder::new()
            .name("monitor".into())
            .spawn(move || monitor::run(&dq, &config, &shutdown))?
    };

    // 3. Дождаться shell, затем дать монитору доработать
    //    Wait for the shell, then let the monitor linger
    match shell_thread.join() {
        Ok(created) => log::info!("shell done, {} processes created", created),
        Err(_)      => log::error!("shell thread panicked"),
    }
    shutdown.request(config.linger_ticks);
    if monitor_thread.join().is_err() {
        log::error!("monitor thread panicked");
    }

    // 4. Примерная команда / example command
    match dynq_cmdline::run(EXAMPLE_COMMAND) {
        Ok(status) => log::debug!("{:?} exited with {:?}", EXAMPLE_COMMAND, status),
        Err(err)   => log::error!("{:?}: {}", EXAMPLE_COMMAND, err),
    }

    log::info!("{} processes tracked", dq.process_count());
    Ok(())
}
