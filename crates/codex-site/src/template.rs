//! Shared page template with `{{TITLE}}`, `{{CONTENT}}` and `{{NAV}}` placeholders.

use std::path::{Path, PathBuf};

/// Placeholder replaced with the page title.
pub const TITLE_PLACEHOLDER: &str = "{{TITLE}}";
/// Placeholder replaced with the rendered page body.
pub const CONTENT_PLACEHOLDER: &str = "{{CONTENT}}";
/// Placeholder replaced with the navigation block.
pub const NAV_PLACEHOLDER: &str = "{{NAV}}";

const PLACEHOLDERS: [&str; 3] = [TITLE_PLACEHOLDER, CONTENT_PLACEHOLDER, NAV_PLACEHOLDER];

/// Error returned when the template cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template file does not exist.
    #[error("Template not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Values substituted into the template for one page.
pub struct PageContext<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub nav: &'a str,
}

/// Page template loaded once per build.
///
/// Rendering never modifies the template, so one instance serves every page.
#[derive(Clone, Debug)]
pub struct Template {
    source: String,
}

impl Template {
    /// Create a template from text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Load a template file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Ok(Self { source }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TemplateError::NotFound(path.to_path_buf()))
            }
            Err(source) => Err(TemplateError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholders that do not occur in the template.
    pub fn missing_placeholders(&self) -> Vec<&'static str> {
        PLACEHOLDERS
            .into_iter()
            .filter(|p| !self.source.contains(p))
            .collect()
    }

    /// Substitute the page values into a copy of the template.
    ///
    /// Substitution is a single pass over the template: inserted values are
    /// not scanned again, so a page whose content mentions `{{TITLE}}` keeps
    /// the literal text. Unknown `{{...}}` tokens are copied unchanged.
    pub fn render(&self, page: &PageContext<'_>) -> String {
        let mut html =
            String::with_capacity(self.source.len() + page.content.len() + page.nav.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{{") {
            html.push_str(&rest[..start]);
            let tail = &rest[start..];
            let replacement = if tail.starts_with(TITLE_PLACEHOLDER) {
                Some((page.title, TITLE_PLACEHOLDER.len()))
            } else if tail.starts_with(CONTENT_PLACEHOLDER) {
                Some((page.content, CONTENT_PLACEHOLDER.len()))
            } else if tail.starts_with(NAV_PLACEHOLDER) {
                Some((page.nav, NAV_PLACEHOLDER.len()))
            } else {
                None
            };
            match replacement {
                Some((value, len)) => {
                    html.push_str(value);
                    rest = &tail[len..];
                }
                None => {
                    html.push_str("{{");
                    rest = &tail[2..];
                }
            }
        }
        html.push_str(rest);
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context<'a>(title: &'a str, content: &'a str, nav: &'a str) -> PageContext<'a> {
        PageContext {
            title,
            content,
            nav,
        }
    }

    #[test]
    fn render_substitutes_all_placeholders() {
        let template =
            Template::new("<title>{{TITLE}}</title><nav>{{NAV}}</nav><main>{{CONTENT}}</main>");
        let html = template.render(&context("intro", "<h1>Hello</h1>", "<ul></ul>"));
        assert_eq!(
            html,
            "<title>intro</title><nav><ul></ul></nav><main><h1>Hello</h1></main>"
        );
    }

    #[test]
    fn render_replaces_repeated_placeholders() {
        let template = Template::new("{{TITLE}} - {{TITLE}}");
        assert_eq!(template.render(&context("a", "", "")), "a - a");
    }

    #[test]
    fn render_does_not_rescan_inserted_content() {
        let template = Template::new("<h1>{{TITLE}}</h1>{{CONTENT}}");
        let html = template.render(&context("page", "<p>use {{TITLE}} and {{NAV}}</p>", "nav"));
        assert_eq!(html, "<h1>page</h1><p>use {{TITLE}} and {{NAV}}</p>");
    }

    #[test]
    fn render_keeps_unknown_tokens() {
        let template = Template::new("{{AUTHOR}} {{ {{TITLE}}}}");
        assert_eq!(template.render(&context("t", "", "")), "{{AUTHOR}} {{ t}}");
    }

    #[test]
    fn render_leaves_template_untouched() {
        let template = Template::new("{{CONTENT}}");
        let _ = template.render(&context("a", "first", ""));
        let second = template.render(&context("b", "second", ""));
        assert_eq!(second, "second");
        assert_eq!(template.source(), "{{CONTENT}}");
    }

    #[test]
    fn missing_placeholders_reported() {
        let template = Template::new("<title>{{TITLE}}</title>");
        assert_eq!(
            template.missing_placeholders(),
            vec![CONTENT_PLACEHOLDER, NAV_PLACEHOLDER]
        );
        assert!(
            Template::new("{{TITLE}}{{CONTENT}}{{NAV}}")
                .missing_placeholders()
                .is_empty()
        );
    }

    #[test]
    fn load_missing_file() {
        let err = Template::load(Path::new("/nonexistent/template.htm")).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.htm");
        std::fs::write(&path, "<body>{{CONTENT}}</body>").unwrap();

        let template = Template::load(&path).unwrap();
        assert_eq!(template.source(), "<body>{{CONTENT}}</body>");
    }
}
