//! Sinks for user-facing advisory text.

/// Write-only channel for messages meant for the user, not the log.
pub trait Output {
    fn warning(&mut self, message: &str);
}

/// Writes advisories to stderr, keeping stdout for command results.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrOutput;

impl Output for StderrOutput {
    fn warning(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Collects advisories in memory.
impl Output for Vec<String> {
    fn warning(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
