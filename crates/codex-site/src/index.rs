//! Page discovery by walking the source tree.
//!
//! The source root holds one directory per category and each category holds
//! page files. Nothing deeper than those two levels is visited.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::page::Page;

/// Error returned when the source tree cannot be indexed.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Source root does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Source root exists but is not a directory.
    #[error("Source path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Directory listing failed.
    #[error("Failed to read directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Categories of the site mapped to their pages.
///
/// Categories iterate in lexicographic order and pages within a category are
/// sorted by name, so navigation built from the index is reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageIndex {
    categories: BTreeMap<String, Vec<Page>>,
}

impl PageIndex {
    /// Scan `source_root` and build the index.
    ///
    /// Hidden entries (starting with `.`) are skipped. Top-level files and
    /// directories nested inside categories are ignored.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::SourceNotFound` or `IndexError::NotADirectory` if
    /// the root is unusable, and `IndexError::Io` if a listing fails.
    pub fn scan(source_root: &Path) -> Result<Self, IndexError> {
        let metadata = match fs::metadata(source_root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(IndexError::SourceNotFound(source_root.to_path_buf()));
            }
            Err(source) => {
                return Err(IndexError::Io {
                    path: source_root.to_path_buf(),
                    source,
                });
            }
        };
        if !metadata.is_dir() {
            return Err(IndexError::NotADirectory(source_root.to_path_buf()));
        }

        let mut categories = BTreeMap::new();
        for (name, is_dir) in list_entries(source_root)? {
            if !is_dir {
                continue;
            }
            let pages = scan_category(&source_root.join(&name), &name)?;
            categories.insert(name, pages);
        }

        Ok(Self { categories })
    }

    /// Category names in lexicographic order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Pages of a category, sorted by name.
    pub fn pages(&self, category: &str) -> Option<&[Page]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Iterate over categories with their pages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Page])> {
        self.categories
            .iter()
            .map(|(name, pages)| (name.as_str(), pages.as_slice()))
    }

    /// Iterate over every page, category by category.
    pub fn all_pages(&self) -> impl Iterator<Item = &Page> {
        self.categories.values().flatten()
    }

    /// Total number of pages.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Whether the index holds no pages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Page> for PageIndex {
    /// Group pages by their first path segment.
    ///
    /// Pages without a category are dropped.
    fn from_iter<I: IntoIterator<Item = Page>>(iter: I) -> Self {
        let mut categories: BTreeMap<String, Vec<Page>> = BTreeMap::new();
        for page in iter {
            if let Some(category) = page.path().first() {
                categories.entry(category.clone()).or_default().push(page);
            }
        }
        for pages in categories.values_mut() {
            sort_pages(pages);
        }
        Self { categories }
    }
}

/// Collect the pages of one category directory.
fn scan_category(dir: &Path, category: &str) -> Result<Vec<Page>, IndexError> {
    let mut pages: Vec<Page> = list_entries(dir)?
        .into_iter()
        .filter(|(_, is_dir)| !is_dir)
        .map(|(file_name, _)| {
            let name = page_name(&file_name).to_owned();
            Page::new(name, vec![category.to_owned()], file_name)
        })
        .collect();

    sort_pages(&mut pages);

    for pair in pages.windows(2) {
        if pair[0].name() == pair[1].name() {
            tracing::warn!(
                category,
                first = pair[0].file_name(),
                second = pair[1].file_name(),
                "Pages share a name; the later file overwrites the earlier output"
            );
        }
    }

    tracing::debug!(category, pages = pages.len(), "Scanned category");
    Ok(pages)
}

/// Sort pages by name, then by source file name for a stable tie-break.
fn sort_pages(pages: &mut [Page]) {
    pages.sort_by(|a, b| {
        a.name()
            .cmp(b.name())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });
}

/// List visible entries of a directory as `(name, is_dir)`.
///
/// Entries that are neither regular files nor directories (after following
/// symlinks) are dropped, as are names that are not valid UTF-8.
fn list_entries(dir: &Path) -> Result<Vec<(String, bool)>, IndexError> {
    let io_err = |source| IndexError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let Ok(metadata) = fs::metadata(entry.path()) else {
            continue;
        };
        if metadata.is_dir() {
            entries.push((name, true));
        } else if metadata.is_file() {
            entries.push((name, false));
        }
    }
    entries.sort();
    Ok(entries)
}

/// Page name for a source file: the file name without its extension.
///
/// `intro.md` → `intro`, `notes.v2.md` → `notes.v2`, `README` → `README`.
fn page_name(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn names(index: &PageIndex, category: &str) -> Vec<String> {
        index
            .pages(category)
            .unwrap()
            .iter()
            .map(|p| p.name().to_owned())
            .collect()
    }

    #[test]
    fn test_page_name() {
        assert_eq!(page_name("intro.md"), "intro");
        assert_eq!(page_name("notes.v2.md"), "notes.v2");
        assert_eq!(page_name("README"), "README");
    }

    #[test]
    fn test_scan_two_levels() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "docs/intro.md", "# Hello");
        write(temp_dir.path(), "api/overview.md", "# API");

        let index = PageIndex::scan(temp_dir.path()).unwrap();

        assert_eq!(index.categories().collect::<Vec<_>>(), vec!["api", "docs"]);
        assert_eq!(names(&index, "docs"), vec!["intro"]);
        assert_eq!(names(&index, "api"), vec!["overview"]);
        assert_eq!(index.len(), 2);

        let intro = &index.pages("docs").unwrap()[0];
        assert_eq!(intro.path(), ["docs"]);
        assert_eq!(intro.file_name(), "intro.md");
    }

    #[test]
    fn test_scan_sorts_categories_and_pages() {
        let temp_dir = create_test_dir();
        for rel in ["zeta/b.md", "alpha/c.md", "alpha/a.md", "mid/x.md", "alpha/b.md"] {
            write(temp_dir.path(), rel, "text");
        }

        let index = PageIndex::scan(temp_dir.path()).unwrap();

        assert_eq!(
            index.categories().collect::<Vec<_>>(),
            vec!["alpha", "mid", "zeta"]
        );
        assert_eq!(names(&index, "alpha"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let temp_dir = create_test_dir();
        for rel in ["b/2.md", "a/1.md", "b/1.md", "c/9.md"] {
            write(temp_dir.path(), rel, "text");
        }

        let first = PageIndex::scan(temp_dir.path()).unwrap();
        let second = PageIndex::scan(temp_dir.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_scan_ignores_top_level_files_and_nested_dirs() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), "README.md", "top level");
        write(temp_dir.path(), "docs/intro.md", "# Intro");
        write(temp_dir.path(), "docs/nested/deep.md", "# Deep");

        let index = PageIndex::scan(temp_dir.path()).unwrap();

        assert_eq!(index.categories().collect::<Vec<_>>(), vec!["docs"]);
        assert_eq!(names(&index, "docs"), vec!["intro"]);
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp_dir = create_test_dir();
        write(temp_dir.path(), ".git/config", "hidden");
        write(temp_dir.path(), "docs/.draft.md", "hidden");
        write(temp_dir.path(), "docs/visible.md", "visible");

        let index = PageIndex::scan(temp_dir.path()).unwrap();

        assert_eq!(index.categories().collect::<Vec<_>>(), vec!["docs"]);
        assert_eq!(names(&index, "docs"), vec!["visible"]);
    }

    #[test]
    fn test_scan_keeps_empty_category() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("empty")).unwrap();

        let index = PageIndex::scan(temp_dir.path()).unwrap();

        assert_eq!(index.pages("empty"), Some(&[][..]));
        assert!(index.is_empty());
    }

    #[test]
    fn test_scan_missing_root() {
        let err = PageIndex::scan(Path::new("/nonexistent/codex-source")).unwrap_err();
        assert!(matches!(err, IndexError::SourceNotFound(_)));
    }

    #[test]
    fn test_scan_root_is_file() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("file.md");
        fs::write(&file, "text").unwrap();

        let err = PageIndex::scan(&file).unwrap_err();
        assert!(matches!(err, IndexError::NotADirectory(_)));
    }

    #[test]
    fn test_from_iter_groups_and_sorts() {
        let index: PageIndex = [
            Page::new("setup", vec!["docs".to_owned()], "setup.md"),
            Page::new("overview", vec!["api".to_owned()], "overview.md"),
            Page::new("intro", vec!["docs".to_owned()], "intro.md"),
            Page::new("orphan", Vec::new(), "orphan.md"),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.categories().collect::<Vec<_>>(), vec!["api", "docs"]);
        assert_eq!(names(&index, "docs"), vec!["intro", "setup"]);
        assert_eq!(index.all_pages().count(), 3);
    }
}
