//! Process record - идентичность + снимок состояния
//! Process record - identity + state snapshot
//!
//! Сам по себе ничего не делает: перемещается между очередями только
//! через `DynamicQueue`.
//! Has no behavior of its own: moves between lists only via `DynamicQueue`.

use alloc::string::String;
use core::fmt;

use bitflags::bitflags;

/// Идентификатор процесса / Process identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(pub u64);

impl Pid {
    pub const fn new(id: u64) -> Self { Self(id) }
    pub const fn as_u64(self) -> u64  { self.0 }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Класс планирования / Scheduling class
///
/// Задаётся при создании и больше не меняется.
/// Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// Интерактивный / interactive
    Foreground,
    /// Пакетный / batch
    Background,
}

impl Class {
    pub const fn tag(self) -> char {
        match self {
            Class::Foreground => 'F',
            Class::Background => 'B',
        }
    }

    pub const fn is_foreground(self) -> bool {
        matches!(self, Class::Foreground)
    }
}

bitflags! {
    /// Флаги процесса / Process flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ProcessFlags: u8 {
        /// Зарезервировано под aging - ядро его не выставляет.
        /// Reserved for priority aging; never set by the core.
        const PROMOTED = 1 << 0;
    }
}

#[derive(Debug)]
pub struct Process {
    pid:   Pid,
    class: Class,
    label: String,
    flags: ProcessFlags,
    /// Имеет смысл только в очереди ожидания.
    /// Meaningful only while in the wait set.
    pub(crate) remaining_ticks: u32,
}

impl Process {
    pub fn new(pid: Pid, class: Class, label: impl Into<String>) -> Self {
        Self::with_flags(pid, class, label, ProcessFlags::empty())
    }

    pub fn with_flags(pid: Pid, class: Class, label: impl Into<String>, flags: ProcessFlags) -> Self {
        Self {
            pid,
            class,
            label: label.into(),
            flags,
            remaining_ticks: 0,
        }
    }

    pub fn pid(&self) -> Pid              { self.pid }
    pub fn class(&self) -> Class          { self.class }
    pub fn label(&self) -> &str           { &self.label }
    pub fn flags(&self) -> ProcessFlags   { self.flags }
    pub fn remaining_ticks(&self) -> u32  { self.remaining_ticks }

    pub fn is_promoted(&self) -> bool {
        self.flags.contains(ProcessFlags::PROMOTED)
    }

    pub fn view(&self) -> ProcessView {
        ProcessView {
            pid:      self.pid,
            class:    self.class,
            promoted: self.is_promoted(),
        }
    }
}

/// То, что видно снаружи очереди: `2F`, `3B*`.
/// What is visible outside the queue: `2F`, `3B*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessView {
    pub pid:      Pid,
    pub class:    Class,
    pub promoted: bool,
}

impl fmt::Display for ProcessView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pid, self.class.tag())?;
        if self.promoted {
            f.write_str("*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_class_tags() {
        assert_eq!(Class::Foreground.tag(), 'F');
        assert_eq!(Class::Background.tag(), 'B');
        assert!(Class::Foreground.is_foreground());
        assert!(!Class::Background.is_foreground());
    }

    #[test]
    fn test_new_process_not_promoted() {
        let p = Process::new(Pid(4), Class::Background, "music player");
        assert_eq!(p.pid(), Pid(4));
        assert_eq!(p.label(), "music player");
        assert_eq!(p.remaining_ticks(), 0);
        assert!(!p.is_promoted());
        assert!(!p.view().promoted);
    }

    #[test]
    fn test_view_display() {
        let fg = Process::new(Pid(2), Class::Foreground, "todo list");
        assert_eq!(fg.view().to_string(), "2F");

        let bg = Process::with_flags(Pid(3), Class::Background, "email check", ProcessFlags::PROMOTED);
        assert_eq!(bg.view().to_string(), "3B*");
    }
}
