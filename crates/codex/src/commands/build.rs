//! Site build command implementation.

use std::path::PathBuf;

use clap::Args;
use codex_config::{CliSettings, Config};
use codex_site::{BuildConfig, SiteBuilder, Template};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for building a site.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Directory of category folders holding the Markdown pages.
    source: PathBuf,

    /// Destination of the generated HTML files.
    target: PathBuf,

    /// Path to configuration file (default: auto-discover codex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page template (overrides config, default: ./template.htm).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Extension of generated files (overrides config, default: htm).
    #[arg(long)]
    extension: Option<String>,

    /// Keep building after a page fails and report all failures at the end.
    #[arg(long)]
    keep_going: bool,

    /// Enable verbose output (per-build logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the template cannot be loaded,
    /// or if any page fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            template: self.template,
            extension: self.extension,
            keep_going: self.keep_going.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");

        let template = Template::load(&config.site_resolved.template)?;

        output.location("Source", &self.source);
        output.location("Output", &self.target);
        output.location("Template", &config.site_resolved.template);

        let build_config = BuildConfig {
            template,
            extension: config.site_resolved.extension,
            gfm: config.markdown.gfm,
            extract_title: config.markdown.extract_title,
            keep_going: config.build.keep_going,
        };
        let report = SiteBuilder::new(build_config).build(&self.source, &self.target)?;

        if !report.is_success() {
            for failure in &report.failures {
                output.page_failed(&failure.source_path, &failure.error);
            }
            return Err(CliError::PagesFailed {
                failed: report.failures.len(),
                total: report.failures.len() + report.pages_written.len(),
            });
        }

        output.built(report.pages_written.len(), &self.target);
        Ok(())
    }
}
