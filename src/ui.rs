//! Terminal output.
//!
//! Everything goes to stderr so the script's own stdout stays clean.
//! Progress lines are only shown in verbose mode; faults always are.

use colored::*;

/// Status output for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn step(&self, msg: impl std::fmt::Display) {
        if self.verbose {
            eprintln!("   {} {}", "→".cyan(), msg);
        }
    }

    pub fn cached(&self, msg: impl std::fmt::Display) {
        if self.verbose {
            eprintln!("{} {}", "⚡".green(), msg);
        }
    }

    pub fn success(&self, msg: impl std::fmt::Display) {
        if self.verbose {
            eprintln!("{} {}", "✓".green(), msg);
        }
    }
}

/// Report a fatal error.
pub fn fault(msg: impl std::fmt::Display) {
    eprintln!("{} {}", "x".red(), msg);
}

pub fn usage(program: &str) {
    println!("{} {} test.go", "Usage:".bold(), program);
}
