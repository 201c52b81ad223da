//! Styled progress output on stderr for `--verbose` runs.

use std::fmt::Display;
use std::time::Duration;

use owo_colors::OwoColorize;

use crate::VERSION;

/// Kind of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
}

/// Banner shown once at the start of a verbose run
pub fn banner() {
    eprintln!("\n{} {}", "gist".bold().bright_blue(), format!("v{}", VERSION).dimmed());
    eprintln!("{}\n", "Summarize web pages into their key sentences".dimmed());
}

/// `[step/total] message`
pub fn step(step: usize, total: usize, message: &str) {
    let counter = format!("[{}/{}]", step, total);
    eprintln!("{} {}", counter.dimmed(), message.bright_cyan());
}

/// Indented `label: value` line under the current step
pub fn detail(label: &str, value: impl Display) {
    let label = format!("{}:", label);
    eprintln!("  {} {}", label.dimmed(), value.to_string().bright_white());
}

pub fn status(kind: Status, message: &str) {
    match kind {
        Status::Info => eprintln!("{} {}", "ℹ".blue(), message.bright_blue()),
        Status::Success => eprintln!("{} {}", "✓".green(), message.bright_green()),
        Status::Warning => eprintln!("{} {}", "⚠".yellow(), message.bright_yellow()),
    }
}

/// Elapsed time for a stage, colored by how long it took
pub fn timing(label: &str, elapsed: Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);
    let rating = match ms {
        ms if ms < 50.0 => "fast".dimmed().to_string(),
        ms if ms < 100.0 => "moderate".bright_yellow().to_string(),
        _ => "slow".bright_red().to_string(),
    };
    eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, rating);
}

/// Human-readable byte count
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}
