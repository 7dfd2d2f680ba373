//! Navigation sidebar generation.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::paths::{is_markdown, path_to_root, to_slash, HTML_EXT};
use crate::templates::NavItem;

/// Errors that can occur while building a sidebar.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    #[error("Failed to walk content directory: {0}")]
    Walk(String),

    #[error("Page {page} is not inside content directory {root}")]
    OutsideRoot { page: String, root: String },
}

/// Markdown pages eligible for the sidebar, in walk order.
///
/// The root page is left out: any page whose path relative to the content
/// root contains the root page name anywhere is skipped, so `index.md`,
/// `guide/index.md` and `reindex.md` are all excluded.
#[derive(Debug, Clone, Default)]
pub struct SidebarIndex {
    /// Page paths relative to the content root
    pages: Vec<PathBuf>,
}

impl SidebarIndex {
    /// Scan a content root for sidebar pages.
    ///
    /// Entries are visited in lexicographic order per directory, and that
    /// order is kept in every sidebar built from the index.
    pub fn scan(root: &Path, root_page: &str) -> Result<Self, SidebarError> {
        let mut pages = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| SidebarError::Walk(e.to_string()))?;

            if entry.file_type().is_dir() || !is_markdown(entry.path()) {
                continue;
            }

            let relative = entry.path().strip_prefix(root).map_err(|_| {
                SidebarError::OutsideRoot {
                    page: entry.path().display().to_string(),
                    root: root.display().to_string(),
                }
            })?;

            if relative.to_string_lossy().contains(root_page) {
                continue;
            }

            pages.push(relative.to_path_buf());
        }

        Ok(Self { pages })
    }

    /// Build the sidebar for a page, given its path relative to the root.
    pub fn for_page(&self, current: &Path) -> Vec<NavItem> {
        let current_dir = current.parent().unwrap_or(Path::new(""));
        let rel_root = path_to_root(current_dir);

        self.pages
            .iter()
            .map(|page| {
                let rel = to_slash(&page.with_extension(""));
                let link = if rel_root == "." {
                    rel
                } else {
                    format!("{}/{}", rel_root, rel)
                };

                let title = link.rsplit('/').next().unwrap_or(&link).to_string();

                NavItem {
                    title,
                    link: format!("{}.{}", link, HTML_EXT),
                }
            })
            .collect()
    }

    /// Pages in the index, relative to the content root.
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }
}
