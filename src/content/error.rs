//! Content errors and the per-run problem report

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An authoring mistake found in a single document
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentError {
    #[error("front-matter block is not closed by a `---` line")]
    UnclosedFrontMatter,

    #[error("front-matter is not valid YAML: {0}")]
    InvalidYaml(String),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{key}` must be {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("unknown layout {0:?} (expected `page` or `post`)")]
    UnknownLayout(String),

    #[error("layout `{layout}` is not allowed in {location}")]
    MisplacedLayout {
        layout: &'static str,
        location: &'static str,
    },

    #[error("unparsable date {0:?}")]
    InvalidDate(String),

    #[error("date {0:?} has no UTC offset and no site timezone is configured")]
    MissingOffset(String),

    #[error("post id `{id}` is also used by {other:?}")]
    DuplicateId { id: String, other: PathBuf },

    #[error("permalink `{permalink}` is also used by {other:?}")]
    DuplicatePermalink { permalink: String, other: PathBuf },

    #[error("failed to read file: {0}")]
    Io(String),
}

/// Something worth telling the author that does not block publishing
#[derive(Debug, Clone, PartialEq)]
pub enum ContentWarning {
    UnknownKey(String),
    MissingOrder,
    OrderCollision { order: i64, other: PathBuf },
}

impl fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentWarning::UnknownKey(key) => {
                write!(f, "unrecognized front-matter key `{}`", key)
            }
            ContentWarning::MissingOrder => {
                write!(f, "page has no `order`, it is listed after ordered pages")
            }
            ContentWarning::OrderCollision { order, other } => write!(
                f,
                "`order: {}` is shared with {:?}, ties are broken by path",
                order, other
            ),
        }
    }
}

/// Problems collected while loading and checking the whole store
#[derive(Debug, Default, Clone)]
pub struct Report {
    pub errors: Vec<(PathBuf, ContentError)>,
    pub warnings: Vec<(PathBuf, ContentWarning)>,
}

impl Report {
    pub fn error(&mut self, path: &Path, error: ContentError) {
        self.errors.push((path.to_path_buf(), error));
    }

    pub fn warn(&mut self, path: &Path, warning: ContentWarning) {
        self.warnings.push((path.to_path_buf(), warning));
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors for one document, in the order they were found
    pub fn errors_for(&self, path: &Path) -> Vec<&ContentError> {
        self.errors
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, e)| e)
            .collect()
    }

    /// Log every warning and error through tracing and return a one-line summary
    pub fn log(&self) -> String {
        for (path, warning) in &self.warnings {
            tracing::warn!("{}: {}", path.display(), warning);
        }
        for (path, error) in &self.errors {
            tracing::error!("{}: {}", path.display(), error);
        }
        format!(
            "{} error(s), {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        )
    }
}
