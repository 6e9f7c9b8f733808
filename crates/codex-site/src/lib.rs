//! Page index, navigation and static site building for Codex.
//!
//! This crate provides:
//! - [`PageIndex`]: categories of the source tree and their pages
//! - [`relative_path`]: links between pages at any depth
//! - [`Template`]: the shared page template
//! - [`SiteBuilder`]: renders every page and writes the output tree
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use codex_site::{BuildConfig, SiteBuilder, Template};
//!
//! let template = Template::load(Path::new("template.htm"))?;
//! let report = SiteBuilder::new(BuildConfig::new(template))
//!     .build(Path::new("text"), Path::new("site"))?;
//! println!("{} pages written", report.pages_written.len());
//! # Ok(())
//! # }
//! ```

mod builder;
mod index;
mod nav;
mod page;
mod path;
mod template;

pub use builder::{
    BuildConfig, BuildError, BuildReport, PageError, PageFailure, SiteBuilder, write_page,
};
pub use index::{IndexError, PageIndex};
pub use nav::{NavGroup, NavLink, build_navigation, render_navigation};
pub use page::Page;
pub use path::relative_path;
pub use template::{
    CONTENT_PLACEHOLDER, NAV_PLACEHOLDER, PageContext, TITLE_PLACEHOLDER, Template, TemplateError,
};
