//! Build progress lines on stderr.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Writes build status lines to stderr, colored when the terminal supports it.
pub(crate) struct Output {
    term: Term,
    label: Style,
    done: Style,
    failed: Style,
    fatal: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().bold(),
            done: Style::new().green(),
            failed: Style::new().yellow(),
            fatal: Style::new().red(),
        }
    }

    /// Print a `Label: path` line describing one of the build inputs.
    pub(crate) fn location(&self, label: &str, path: &Path) {
        let line = format!("{} {}", self.label.apply_to(format!("{label}:")), path.display());
        let _ = self.term.write_line(&line);
    }

    /// Report a page that could not be built (yellow).
    pub(crate) fn page_failed(&self, source: &Path, error: &impl Display) {
        let line = format!("{}: {error}", source.display());
        let _ = self.term.write_line(&self.failed.apply_to(line).to_string());
    }

    /// Report a finished build (green).
    pub(crate) fn built(&self, pages: usize, target: &Path) {
        let line = format!("Built {pages} pages to {}", target.display());
        let _ = self.term.write_line(&self.done.apply_to(line).to_string());
    }

    /// Report the error that ended the run (red).
    pub(crate) fn error(&self, error: &impl Display) {
        let line = format!("Error: {error}");
        let _ = self.term.write_line(&self.fatal.apply_to(line).to_string());
    }
}
