//! Colored terminal output for the CLI.
//!
//! Progress goes to stdout, warnings go to stderr. Quiet mode drops both.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Output manager for colored terminal output
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
    choice: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager that colors when the terminal supports it.
    pub fn new(quiet: bool) -> Self {
        Self::with_color_choice(quiet, ColorChoice::Auto)
    }

    /// Creates an output manager with an explicit color policy.
    pub fn with_color_choice(quiet: bool, choice: ColorChoice) -> Self {
        Self { quiet, choice }
    }

    fn write_line(
        &self,
        stream: &mut impl WriteColor,
        spec: &ColorSpec,
        marker: &str,
        message: &str,
    ) -> io::Result<()> {
        stream.set_color(spec)?;
        write!(stream, "{marker}")?;
        stream.reset()?;
        writeln!(stream, "{message}")?;
        stream.flush()
    }

    fn stdout(&self, spec: &ColorSpec, marker: &str, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(self.choice);
        self.write_line(&mut stdout, spec, marker, message)
    }

    /// Section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = StandardStream::stdout(self.choice);
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(stdout, "\n=== {title} ===")?;
        stdout.reset()?;
        stdout.flush()
    }

    /// Step in progress
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.stdout(ColorSpec::new().set_fg(Some(Color::Cyan)), "→ ", message)
    }

    /// Completed step
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.stdout(
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            "✓ ",
            message,
        )
    }

    /// Indented detail line
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.stdout(&ColorSpec::new(), "  ", message)
    }

    /// Non-fatal problem
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stderr = StandardStream::stderr(self.choice);
        self.write_line(
            &mut stderr,
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            "⚠ ",
            message,
        )
    }

    /// Fatal problem; printed even in quiet mode
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut stderr = StandardStream::stderr(self.choice);
        self.write_line(
            &mut stderr,
            ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true),
            "Error: ",
            message,
        )
    }
}
