//! User-facing messages.
//!
//! Only the completion line (or the dry-run manifest) goes to stdout. Reports,
//! notes and warnings go to stderr, gated by the `-q`/`-v` switch.

use colored::Colorize;
use std::sync::atomic::{AtomicU8, Ordering};

/// How much the CLI prints besides errors and warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// `-q`: no completion line, no notes
    Quiet = 0,
    /// Completion line and notes
    Normal = 1,
    /// Adds per-campaign reports
    Verbose = 2,
}

impl Verbosity {
    /// Maps the `-q`/`-v` flags; quiet wins if both are set.
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }
}

static VERBOSITY: AtomicU8 = AtomicU8::new(Verbosity::Normal as u8);

/// Sets the process-wide verbosity.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Current process-wide verbosity.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

/// The `✓ maps.json complete` line, green on stdout.
pub fn success(message: &str) {
    if get_verbosity() != Verbosity::Quiet {
        println!("{}", message.green());
    }
}

/// Configuration problems and similar; printed even with `-q`.
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}

/// Dimmed note on stderr, hidden with `-q`.
pub fn info(message: &str) {
    if get_verbosity() != Verbosity::Quiet {
        eprintln!("{}", message.dimmed());
    }
}

/// A campaign report line, shown with `-v`.
pub fn report(line: &str) {
    if get_verbosity() == Verbosity::Verbose {
        eprintln!("{line}");
    }
}

/// `removed <title>` style line, shown with `-v`.
pub fn action(verb: &str, subject: &str) {
    if get_verbosity() == Verbosity::Verbose {
        eprintln!("{} {subject}", verb.dimmed().bold());
    }
}
