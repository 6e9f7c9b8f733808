//! Static site builder.
//!
//! Indexes the source tree, renders every page into the shared template
//! and writes the result under the target root, mirroring the
//! category/page layout of the source.

use std::path::{Path, PathBuf};

use codex_renderer::{MarkdownRenderer, escape_html};

use crate::index::{IndexError, PageIndex};
use crate::nav::{build_navigation, render_navigation};
use crate::page::Page;
use crate::template::{PageContext, Template};

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Template shared by every page.
    pub template: Template,
    /// Extension of generated files, without the leading dot.
    pub extension: String,
    /// Enable GitHub Flavored Markdown.
    pub gfm: bool,
    /// Use the first H1 heading as page title instead of the page name.
    pub extract_title: bool,
    /// Continue past per-page failures and collect them in the report.
    pub keep_going: bool,
}

impl BuildConfig {
    /// Create a config with defaults for everything but the template.
    pub fn new(template: Template) -> Self {
        Self {
            template,
            extension: "htm".to_owned(),
            gfm: true,
            extract_title: false,
            keep_going: false,
        }
    }
}

/// Error for a single page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Output directory or file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source tree could not be indexed.
    #[error(transparent)]
    Index(#[from] IndexError),
    /// A page failed and the build stopped.
    #[error(transparent)]
    Page(#[from] PageError),
}

/// A page that failed while the build kept going.
#[derive(Debug)]
pub struct PageFailure {
    /// Source file of the failed page.
    pub source_path: PathBuf,
    pub error: PageError,
}

/// Outcome of a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Generated files, in write order.
    pub pages_written: Vec<PathBuf>,
    /// Pages that failed (only populated with `keep_going`).
    pub failures: Vec<PageFailure>,
}

impl BuildReport {
    /// Whether every page was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds a static site from a directory of category folders.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::path::Path;
/// use codex_site::{BuildConfig, SiteBuilder, Template};
///
/// let template = Template::load(Path::new("template.htm"))?;
/// let builder = SiteBuilder::new(BuildConfig::new(template));
/// let report = builder.build(Path::new("text"), Path::new("site"))?;
/// assert!(report.is_success());
/// # Ok(())
/// # }
/// ```
pub struct SiteBuilder {
    config: BuildConfig,
}

impl SiteBuilder {
    /// Create a builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the site from `source_root` into `target_root`.
    ///
    /// The source tree is fully indexed before anything is written. Existing
    /// output files are overwritten; stale files are left in place.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Index` if the source root is unusable. Without
    /// `keep_going`, returns `BuildError::Page` on the first failing page.
    pub fn build(&self, source_root: &Path, target_root: &Path) -> Result<BuildReport, BuildError> {
        let index = PageIndex::scan(source_root)?;

        for placeholder in self.config.template.missing_placeholders() {
            tracing::warn!(placeholder, "Template does not contain placeholder");
        }

        tracing::info!(
            source = %source_root.display(),
            target = %target_root.display(),
            categories = index.categories().count(),
            pages = index.len(),
            "Building site"
        );

        let mut report = BuildReport::default();
        for page in index.all_pages() {
            match self.build_page(&index, page, source_root, target_root) {
                Ok(path) => report.pages_written.push(path),
                Err(error) if self.config.keep_going => {
                    tracing::warn!(page = page.name(), %error, "Page failed");
                    report.failures.push(PageFailure {
                        source_path: page.source_path(source_root),
                        error,
                    });
                }
                Err(error) => return Err(error.into()),
            }
        }

        tracing::info!(
            written = report.pages_written.len(),
            failed = report.failures.len(),
            "Build finished"
        );
        Ok(report)
    }

    /// Render a single page to its final HTML document.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Read` if the source file cannot be read.
    pub fn render_page(
        &self,
        index: &PageIndex,
        page: &Page,
        source_root: &Path,
    ) -> Result<String, PageError> {
        let source_path = page.source_path(source_root);
        let markdown = std::fs::read_to_string(&source_path).map_err(|source| PageError::Read {
            path: source_path.clone(),
            source,
        })?;

        let mut renderer = MarkdownRenderer::new()
            .with_gfm(self.config.gfm)
            .with_link_extension(self.config.extension.as_str());
        if self.config.extract_title {
            renderer = renderer.with_title_extraction();
        }
        let result = renderer.render_markdown(&markdown);

        let nav = render_navigation(&build_navigation(index, page, &self.config.extension));
        let title = escape_html(result.title.as_deref().unwrap_or(page.name()));

        Ok(self.config.template.render(&PageContext {
            title: &title,
            content: &result.html,
            nav: &nav,
        }))
    }

    fn build_page(
        &self,
        index: &PageIndex,
        page: &Page,
        source_root: &Path,
        target_root: &Path,
    ) -> Result<PathBuf, PageError> {
        let html = self.render_page(index, page, source_root)?;
        let output_path = write_page(target_root, page, &self.config.extension, &html)?;
        tracing::debug!(page = page.name(), output = %output_path.display(), "Wrote page");
        Ok(output_path)
    }
}

/// Write a rendered page under `target_root`, creating its directory if needed.
///
/// # Errors
///
/// Returns `PageError::Write` if the directory or file cannot be written.
pub fn write_page(
    target_root: &Path,
    page: &Page,
    extension: &str,
    html: &str,
) -> Result<PathBuf, PageError> {
    let output_dir = target_root.join(page.dir_path());
    std::fs::create_dir_all(&output_dir).map_err(|source| PageError::Write {
        path: output_dir.clone(),
        source,
    })?;

    let output_path = page.output_path(target_root, extension);
    std::fs::write(&output_path, html).map_err(|source| PageError::Write {
        path: output_path.clone(),
        source,
    })?;
    Ok(output_path)
}
