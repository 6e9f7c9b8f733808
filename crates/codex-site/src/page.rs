//! Page model.

use std::path::{Path, PathBuf};

use crate::path::relative_path;

/// A single source text file mapped to one generated HTML file.
///
/// Created once while indexing and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    name: String,
    path: Vec<String>,
    file_name: String,
}

impl Page {
    /// Create a page.
    ///
    /// * `name` - Display title and output file stem (e.g., "intro")
    /// * `path` - Category segments locating the page, excluding its own name
    /// * `file_name` - Source file name on disk (e.g., "intro.md")
    pub fn new(name: impl Into<String>, path: Vec<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path,
            file_name: file_name.into(),
        }
    }

    /// Page name, used as title and output file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category segments locating the page within the site.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Source file name on disk.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Directory of the page relative to a site root.
    pub fn dir_path(&self) -> PathBuf {
        self.path.iter().collect()
    }

    /// Location of the source file under `source_root`.
    pub fn source_path(&self, source_root: &Path) -> PathBuf {
        source_root.join(self.dir_path()).join(&self.file_name)
    }

    /// Location of the generated file under `target_root`.
    pub fn output_path(&self, target_root: &Path, extension: &str) -> PathBuf {
        target_root
            .join(self.dir_path())
            .join(self.output_file_name(extension))
    }

    /// Generated file name (e.g., "intro.htm").
    pub fn output_file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.name)
    }

    /// Relative link from this page's generated file to `target`'s.
    pub fn relative_path_to(&self, target: &Page, extension: &str) -> String {
        relative_path(&self.path, &target.path, &target.output_file_name(extension))
    }
}
