//! Frontmatter API server for wikiplum.
//!
//! Serves `GET /api/<path>`, which loads `<path>.md` from a [`PageSource`]
//! (the local content directory or a branch of the remote repository) and
//! answers with the page's frontmatter as a JSON object.

pub mod server;
pub mod source;

pub use server::{router, ApiConfig, ApiServer, ServerError};
pub use source::{FetchError, LocalSource, PageSource, RemoteSource};
