//! Markdown handling for wikiplum.
//!
//! This crate extracts YAML frontmatter from markdown documents and renders
//! markdown pages to HTML, rewriting `.md` links to their `.html` outputs.

pub mod frontmatter;
pub mod markdown;

pub use frontmatter::{extract_frontmatter, split_frontmatter, Frontmatter};
pub use markdown::{render_markdown, rewrite_md_links};
