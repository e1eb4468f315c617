use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Where log lines go. Stdout belongs to the board renderer, so it is not an option.
pub enum LogTarget {
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    pub fn file(path: &Path) -> Result<Self, String> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
        Ok(LogTarget::File(Mutex::new(file)))
    }
}

pub struct Logger {
    prefix: Option<String>,
    target: LogTarget,
}

impl Logger {
    fn new(prefix: Option<String>, target: LogTarget) -> Self {
        Self { prefix, target }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let formatted = format_line(self.prefix.as_deref(), file, line, message);
        match &self.target {
            LogTarget::Stderr => eprintln!("{}", formatted),
            LogTarget::File(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{}", formatted);
                }
            }
        }
    }
}

fn format_line(prefix: Option<&str>, file: &str, line: u32, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    match prefix {
        Some(prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
        None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
    }
}

/// Installs the process-wide logger. Later calls are ignored.
pub fn init_logger(prefix: Option<String>, target: LogTarget) {
    LOGGER.get_or_init(|| Logger::new(prefix, target));
}

pub fn log(file: &str, line: u32, message: &str) {
    match LOGGER.get() {
        Some(logger) => logger.log(file, line, message),
        None => eprintln!("{}", format_line(None, file, line, message)),
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_directories() {
        let line = format_line(None, "engine/src/tictactoe/board.rs", 12, "hello");
        assert!(line.ends_with("[board.rs:12] hello"));
    }

    #[test]
    fn test_format_line_with_prefix() {
        let line = format_line(Some("Terminal"), "C:\\src\\main.rs", 3, "started");
        assert!(line.contains("[Terminal][main.rs:3] started"));
    }
}
