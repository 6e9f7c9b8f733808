//! CLI error types.

use codex_config::ConfigError;
use codex_site::{BuildError, TemplateError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{failed} of {total} pages failed")]
    PagesFailed { failed: usize, total: usize },
}
