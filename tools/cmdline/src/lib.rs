//! dynq-cmdline - разбор и (имитация) запуска команд
//! dynq-cmdline - command tokenizing and simulated execution
//!
//! Без состояния, с очередью никак не связан.
//! Stateless, no coupling to the queue.

use std::fmt;
use std::str::SplitWhitespace;

/// Ленивая последовательность аргументов / Lazy argument sequence
#[derive(Debug, Clone)]
pub struct Args<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Iterator for Args<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }
}

/// Разбить строку по пробелам, без аллокаций.
/// Split a line on whitespace, without allocating.
pub fn parse(line: &str) -> Args<'_> {
    Args { inner: line.split_whitespace() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    pub program: &'a str,
    pub args:    Vec<&'a str>,
}

impl<'a> Command<'a> {
    /// `None` для пустой строки / `None` for a blank line
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut tokens = parse(line);
        let program = tokens.next()?;
        Some(Self { program, args: tokens.collect() })
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    pub const SUCCESS: Self = Self(0);

    pub fn success(self) -> bool { self.0 == 0 }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    Empty,
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::Empty => f.write_str("empty command"),
        }
    }
}

impl std::error::Error for ExecError {}

/// Имитация запуска: реального процесса не создаётся.
/// Simulated execution: no real process is created.
pub fn exec(cmd: &Command<'_>) -> Result<ExitStatus, ExecError> {
    if cmd.program.is_empty() {
        return Err(ExecError::Empty);
    }
    log::info!("Executing command: {}", cmd);
    Ok(ExitStatus::SUCCESS)
}

/// `parse` + `exec` одной строкой / `parse` + `exec` of one line
pub fn run(line: &str) -> Result<ExitStatus, ExecError> {
    let cmd = Command::parse(line).ok_or(ExecError::Empty)?;
    exec(&cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        let tokens: Vec<_> = parse("  example   command\t--flag \n").collect();
        assert_eq!(tokens, vec!["example", "command", "--flag"]);
    }

    #[test]
    fn test_parse_is_lazy() {
        let mut args = parse("a b c");
        assert_eq!(args.next(), Some("a"));
        assert_eq!(args.next(), Some("b"));
        assert_eq!(args.next(), Some("c"));
        assert_eq!(args.next(), None);
    }

    #[test]
    fn test_command_parse() {
        let cmd = Command::parse("example command").unwrap();
        assert_eq!(cmd.program, "example");
        assert_eq!(cmd.args, vec!["command"]);
        assert_eq!(cmd.to_string(), "example command");

        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn test_exec() {
        assert_eq!(run("example command"), Ok(ExitStatus::SUCCESS));
        assert_eq!(run(""), Err(ExecError::Empty));

        let bogus = Command { program: "", args: Vec::new() };
        assert_eq!(exec(&bogus), Err(ExecError::Empty));
    }
}
