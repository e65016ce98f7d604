//! Content module - documents, their metadata and the store that loads them

mod date;
mod document;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
pub mod schema;

pub use date::{now_in, parse_date};
pub use document::{Document, Page, Post, PostId};
pub use error::{ContentError, ContentWarning, Report};
pub use frontmatter::FrontMatter;
pub use loader::ContentStore;
pub use markdown::{plain_text, split_excerpt, MarkdownSummary};
pub use schema::Layout;
