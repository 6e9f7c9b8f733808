//! HTML helpers shared by the renderer and the site navigation.

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Rewrite a relative link to a markdown file so it targets the generated page.
///
/// - `setup.md` → `setup.htm`
/// - `../api/overview.md#usage` → `../api/overview.htm#usage`
///
/// External links, absolute paths, fragment-only links and links to
/// non-markdown files are returned unchanged.
///
/// # Examples
///
/// ```
/// use codex_renderer::rewrite_link;
///
/// assert_eq!(rewrite_link("../api/overview.md", "htm"), "../api/overview.htm");
/// assert_eq!(rewrite_link("https://example.com/a.md", "htm"), "https://example.com/a.md");
/// ```
pub fn rewrite_link(url: &str, extension: &str) -> String {
    if url.starts_with('/') || url.starts_with('#') || has_scheme(url) {
        return url.to_owned();
    }

    let (path, fragment) = match url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (url, None),
    };

    let Some(stem) = path.strip_suffix(".md") else {
        return url.to_owned();
    };
    if stem.is_empty() || stem.ends_with('/') {
        return url.to_owned();
    }

    match fragment {
        Some(fragment) => format!("{stem}.{extension}#{fragment}"),
        None => format!("{stem}.{extension}"),
    }
}

/// Whether the URL starts with a scheme such as `https:` or `mailto:`.
fn has_scheme(url: &str) -> bool {
    url.split_once(':').is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
