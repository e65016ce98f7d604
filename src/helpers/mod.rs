//! Helper functions shared by the commands
//!
//! Date formatting, URL construction and the listing order of posts and pages.

mod date;
mod list;
mod url;

pub use date::*;
pub use list::*;
pub use url::*;
