//! Static site generator for wikiplum.
//!
//! Turns a tree of markdown files into a mirrored tree of HTML pages, each
//! rendered through a shared page template with a navigation sidebar, and
//! copies static assets alongside them.

pub mod assets;
pub mod builder;
pub mod paths;
pub mod sidebar;
pub mod templates;

pub use assets::{copy_static, CopyError};
pub use builder::{BuildError, BuildResult, SiteBuilder, SiteConfig};
pub use sidebar::{SidebarError, SidebarIndex};
pub use templates::{NavItem, Page, TemplateEngine, TemplateError};
