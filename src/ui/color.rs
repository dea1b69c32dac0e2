//! ANSI formatting helpers for terminal output

use std::env;
use std::io::IsTerminal;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Apply an ANSI style to text if the terminal supports it
pub fn colorize(text: &str, style: &str) -> String {
    if supports_formatting() {
        format!("{style}{text}{}", Colors::RESET)
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str) -> String {
    colorize(text, Colors::BOLD)
}

pub fn dim(text: &str) -> String {
    colorize(text, Colors::DIM)
}

/// Whether stdout should receive ANSI escape codes
pub fn supports_formatting() -> bool {
    // Explicit opt-out wins
    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Disable formatting when running tests
    if cfg!(test) {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term.is_empty() || term == "dumb"),
        Err(_) => env::var("TERM_PROGRAM").is_ok(),
    }
}
