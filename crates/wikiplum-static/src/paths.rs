//! Path helpers shared by the site builder and the sidebar.
//!
//! Paths handed to these functions are relative to the content root. Links
//! produced from them always use `/` as the separator.

use std::path::{Component, Path, PathBuf};

/// Extension of markdown sources.
pub const MARKDOWN_EXT: &str = "md";

/// Extension of generated pages.
pub const HTML_EXT: &str = "html";

/// Check whether a path names a markdown source.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MARKDOWN_EXT)
}

/// Swap the `.md` extension of a relative source path for `.html`.
pub fn html_path(relative: &Path) -> PathBuf {
    relative.with_extension(HTML_EXT)
}

/// Join the normal components of a path with `/`.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative path from a directory under the content root back to the root.
///
/// Returns `.` for the root itself, otherwise one `..` per level.
///
/// ```
/// use std::path::Path;
/// use wikiplum_static::paths::path_to_root;
///
/// assert_eq!(path_to_root(Path::new("")), ".");
/// assert_eq!(path_to_root(Path::new("guide/setup")), "../..");
/// ```
pub fn path_to_root(dir: &Path) -> String {
    let depth = dir
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count();

    if depth == 0 {
        ".".to_string()
    } else {
        vec![".."; depth].join("/")
    }
}
