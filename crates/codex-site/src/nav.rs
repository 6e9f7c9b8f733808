//! Sitewide navigation block.
//!
//! Every generated page carries links to every page in the site, grouped by
//! category. Links are relative to the page being rendered, so the site works
//! from any location on disk.

use std::fmt::Write;

use codex_renderer::escape_html;

use crate::index::PageIndex;
use crate::page::Page;

/// A category and its page links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavGroup {
    pub title: String,
    pub items: Vec<NavLink>,
}

/// A link to one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub title: String,
    pub href: String,
    pub is_active: bool,
}

/// Build navigation links from `current` to every page in the index.
pub fn build_navigation(index: &PageIndex, current: &Page, extension: &str) -> Vec<NavGroup> {
    index
        .iter()
        .map(|(category, pages)| NavGroup {
            title: category.to_owned(),
            items: pages
                .iter()
                .map(|page| NavLink {
                    title: page.name().to_owned(),
                    href: current.relative_path_to(page, extension),
                    is_active: page == current,
                })
                .collect(),
        })
        .collect()
}

/// Render navigation groups as nested lists.
pub fn render_navigation(groups: &[NavGroup]) -> String {
    let mut html = String::with_capacity(256);
    html.push_str("<ul>\n");
    for group in groups {
        let _ = writeln!(html, "<li>{}<ul>", escape_html(&group.title));
        for item in &group.items {
            let class = if item.is_active { " class=\"active\"" } else { "" };
            let _ = writeln!(
                html,
                "<li><a href=\"{}\"{class}>{}</a></li>",
                escape_html(&item.href),
                escape_html(&item.title),
            );
        }
        html.push_str("</ul>\n</li>\n");
    }
    html.push_str("</ul>");
    html
}
