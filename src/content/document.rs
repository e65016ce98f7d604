//! Post and Page models

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::FrontMatter;

/// A markdown file as stored: where it lives, its metadata block and its body
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the site root
    pub path: PathBuf,
    pub front_matter: FrontMatter,
    /// Raw markdown after the block
    pub body: String,
}

/// Identifier derived from a post's date and title, e.g. `2025-08-01-mastering-go`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(date: &DateTime<FixedOffset>, title: &str) -> Self {
        Self(format!("{}-{}", date.format("%Y-%m-%d"), slug::slugify(title)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A blog post
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,

    /// Post title
    pub title: String,

    /// Publication date, in the offset it was written with
    pub date: DateTime<FixedOffset>,

    /// Post categories, in declared order
    pub categories: Vec<String>,

    /// Post tags, duplicates removed
    pub tags: Vec<String>,

    /// Listed above unpinned posts
    pub pin: bool,

    /// Attribution, falls back to the site author
    pub author: String,

    /// Source file path (relative to the site root)
    pub source: PathBuf,

    /// URL path including the base URL
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    pub front_matter: FrontMatter,

    /// Raw markdown content
    pub raw: String,
}

impl Post {
    /// Get the previous post in a list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.source == self.source)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next post in a list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.source == self.source)?;
        posts.get(pos + 1)
    }
}

/// A standalone page, usually a navigation tab
#[derive(Debug, Clone)]
pub struct Page {
    /// Page title
    pub title: String,

    /// Navigation icon name, e.g. `fas fa-info-circle`
    pub icon: Option<String>,

    /// Navigation position
    pub order: Option<i64>,

    /// Source file path (relative to the site root)
    pub source: PathBuf,

    /// URL path including the base URL
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    pub front_matter: FrontMatter,

    /// Raw markdown content
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id() {
        let date = DateTime::parse_from_rfc3339("2025-08-01T15:02:08+02:00").unwrap();
        let id = PostId::new(&date, "Mastering Go Performance: pprof & Beyond");
        assert_eq!(id.as_str(), "2025-08-01-mastering-go-performance-pprof-beyond");
    }

    #[test]
    fn test_post_id_uses_written_offset() {
        // 23:30 at -05:00 is already the next day in UTC; the id keeps the author's day
        let date = DateTime::parse_from_rfc3339("2025-08-01T23:30:00-05:00").unwrap();
        assert_eq!(PostId::new(&date, "Late").as_str(), "2025-08-01-late");
    }
}
