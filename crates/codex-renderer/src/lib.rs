//! Markdown to HTML renderer for Codex.
//!
//! [`MarkdownRenderer`] walks `pulldown-cmark` events and produces semantic
//! HTML5. Definition lists are always enabled; GitHub Flavored Markdown
//! (tables, strikethrough, task lists) is enabled by default.
//!
//! # Example
//!
//! ```
//! use codex_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new()
//!     .with_title_extraction()
//!     .with_link_extension("htm")
//!     .render_markdown("# Hello\n\nSee [setup](setup.md).");
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains(r#"<a href="setup.htm">"#));
//! ```

mod html;
mod renderer;

pub use html::{escape_html, rewrite_link};
pub use renderer::{MarkdownRenderer, RenderResult};
