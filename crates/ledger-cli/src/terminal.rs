//! Terminal implementations of the user-facing ports.

use std::io::{BufRead, Write};
use std::sync::Mutex;

use ledger_core::enums::ToastKind;
use ledger_core::ports::{PageNavigator, UserPrompt};

/// Alerts and toasts go to stderr; confirmations read a line from stdin.
pub struct TerminalPrompt {
    assume_yes: bool,
    quiet: bool,
}

impl TerminalPrompt {
    pub const fn new(assume_yes: bool, quiet: bool) -> Self {
        Self { assume_yes, quiet }
    }
}

impl UserPrompt for TerminalPrompt {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{message} [y/N] ");
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }

    fn toast(&self, message: &str, kind: ToastKind) {
        if !self.quiet {
            eprintln!("{}", toast_line(message, kind));
        }
    }
}

fn toast_line(message: &str, kind: ToastKind) -> String {
    let marker = match kind {
        ToastKind::Success => "✓",
        ToastKind::Error => "✗",
        ToastKind::Warning => "!",
        ToastKind::Info => "i",
    };
    format!("{marker} {kind}: {message}")
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Records where the page would have gone; the command prints it.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Option<String>>,
    reloaded: Mutex<bool>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Option<String> {
        self.visited.lock().ok().and_then(|url| url.clone())
    }

    pub fn reloaded(&self) -> bool {
        self.reloaded.lock().is_ok_and(|flag| *flag)
    }
}

impl PageNavigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            *visited = Some(url.to_string());
        }
    }

    fn reload(&self) {
        if let Ok(mut reloaded) = self.reloaded.lock() {
            *reloaded = true;
        }
    }
}
