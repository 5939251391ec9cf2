//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use gantry_core::{
    application::InstallReporter,
    domain::{Driver, Module},
};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
///
/// Cheap to clone; clones share the same terminal handle.
#[derive(Debug, Clone)]
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Plain line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(|| msg.to_owned())
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2713}', msg, Tone::Success)
    }

    /// `⚠ <msg>` in yellow.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{26a0}', msg, Tone::Warning)
    }

    /// `ℹ <msg>` in blue.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2139}', msg, Tone::Info)
    }

    /// Bold cyan section title.
    pub fn header(&self, text: &str) -> io::Result<()> {
        self.line(|| {
            if self.no_color {
                text.to_owned()
            } else {
                text.cyan().bold().to_string()
            }
        })
    }

    fn marked(&self, mark: char, msg: &str, tone: Tone) -> io::Result<()> {
        self.line(|| {
            if self.no_color {
                return format!("{mark} {msg}");
            }
            match tone {
                Tone::Success => format!("{} {}", mark.green().bold(), msg.green()),
                Tone::Warning => format!("{} {}", mark.yellow().bold(), msg.yellow()),
                Tone::Info => format!("{} {}", mark.blue().bold(), msg.blue()),
            }
        })
    }

    fn line(&self, render: impl FnOnce() -> String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&render())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// Progress lines for the scaffold run. A closed stdout must not abort an
/// install that already started, so write failures are dropped.
impl InstallReporter for OutputManager {
    fn installed(&self, module: &Module, driver: &Driver) {
        let _ = self.success(&installed_message(module, driver));
    }

    fn uninstalled(&self, module: &Module, driver: &Driver) {
        let _ = self.success(&uninstalled_message(module, driver));
    }

    fn step(&self, message: &str) {
        let _ = self.success(message);
    }
}

pub fn installed_message(module: &Module, driver: &Driver) -> String {
    format!("installed {} driver for {}.", driver.name, module.name)
}

pub fn uninstalled_message(module: &Module, driver: &Driver) -> String {
    format!("uninstalled {} driver for {}.", driver.name, module.name)
}

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
}

// ── tests ─────────────────────────────────────────────────────────────────────
