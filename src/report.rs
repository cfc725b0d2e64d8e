//! User-facing console output.
//!
//! The loader and the survey summary talk to an [`OutputSink`] rather than
//! straight to stdout, so tests and embedding callers can run silently or
//! capture what would have been printed.

/// Destination for console lines meant for the user (not diagnostics).
pub trait OutputSink {
    fn line(&mut self, message: &str);
}

/// Prints every line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl OutputSink for Console {
    fn line(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl OutputSink for Silent {
    fn line(&mut self, _message: &str) {}
}

/// Keeps lines in memory, in order.
#[derive(Debug, Default, Clone)]
pub struct Recorded {
    pub lines: Vec<String>,
}

impl Recorded {
    pub fn new() -> Self {
        Recorded { lines: Vec::new() }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl OutputSink for Recorded {
    fn line(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}
