//! The closed set of recognized front-matter keys and how to read them

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::Serialize;
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

use super::date::parse_date;
use super::error::ContentError;
use super::FrontMatter;

pub const LAYOUT: &str = "layout";
pub const TITLE: &str = "title";
pub const DATE: &str = "date";
pub const CATEGORIES: &str = "categories";
pub const TAGS: &str = "tags";
pub const PIN: &str = "pin";
pub const AUTHOR: &str = "author";
pub const ICON: &str = "icon";
pub const ORDER: &str = "order";

/// Value type expected for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Layout,
    Text,
    Timestamp,
    /// Ordered, duplicates kept
    TextList,
    /// Duplicates dropped, first occurrence wins
    TextSet,
    Boolean,
    Integer,
    Symbol,
}

/// One row of the schema
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub ty: ValueType,
    pub effect: &'static str,
}

pub const FIELDS: &[Field] = &[
    Field { key: LAYOUT, ty: ValueType::Layout, effect: "selects rendering template" },
    Field { key: TITLE, ty: ValueType::Text, effect: "display title / permalink component" },
    Field { key: DATE, ty: ValueType::Timestamp, effect: "sort key, permalink component" },
    Field { key: CATEGORIES, ty: ValueType::TextList, effect: "grouping/navigation" },
    Field { key: TAGS, ty: ValueType::TextSet, effect: "grouping/navigation" },
    Field { key: PIN, ty: ValueType::Boolean, effect: "promotes post above unpinned posts" },
    Field { key: AUTHOR, ty: ValueType::Text, effect: "attribution override" },
    Field { key: ICON, ty: ValueType::Symbol, effect: "page navigation icon" },
    Field { key: ORDER, ty: ValueType::Integer, effect: "page navigation sort key" },
];

pub fn is_known_key(key: &str) -> bool {
    FIELDS.iter().any(|f| f.key == key)
}

/// Keys present in the block that the schema does not recognize
pub fn unknown_keys(fm: &FrontMatter) -> Vec<String> {
    fm.keys()
        .filter(|k| !is_known_key(k))
        .map(str::to_string)
        .collect()
}

/// Rendering template selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Page,
    Post,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Page => "page",
            Layout::Post => "post",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "page" => Ok(Layout::Page),
            "post" => Ok(Layout::Post),
            other => Err(ContentError::UnknownLayout(other.to_string())),
        }
    }
}

/// Typed metadata of a post
#[derive(Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub date: DateTime<FixedOffset>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub pin: bool,
    pub author: Option<String>,
}

/// Typed metadata of a page
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i64>,
}

/// Reads keys one by one and keeps every problem instead of stopping at the first
pub struct FieldReader<'a> {
    fm: &'a FrontMatter,
    errors: Vec<ContentError>,
    rejected: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    pub fn new(fm: &'a FrontMatter) -> Self {
        Self {
            fm,
            errors: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// The declared layout, or `default` when the key is absent
    pub fn layout(&mut self, default: Layout) -> Option<Layout> {
        match self.fm.get(LAYOUT) {
            None | Some(Value::Null) => Some(default),
            Some(Value::String(s)) => self.keep(LAYOUT, s.parse()),
            Some(_) => self.fail(LAYOUT, "`page` or `post`"),
        }
    }

    pub fn text(&mut self, key: &'static str) -> Option<String> {
        match self.fm.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => match scalar_to_string(value) {
                Some(s) => Some(s),
                None => self.fail(key, "a string"),
            },
        }
    }

    pub fn text_list(&mut self, key: &'static str) -> Vec<String> {
        let list = match self.fm.get(key) {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Sequence(items)) => items
                .iter()
                .filter(|v| !v.is_null())
                .map(scalar_to_string)
                .collect::<Option<Vec<_>>>(),
            Some(value) => scalar_to_string(value).map(|s| vec![s]),
        };
        match list {
            Some(list) => list,
            None => {
                self.fail::<()>(key, "a string or a list of strings");
                Vec::new()
            }
        }
    }

    pub fn text_set(&mut self, key: &'static str) -> Vec<String> {
        let mut set: Vec<String> = Vec::new();
        for item in self.text_list(key) {
            if !set.contains(&item) {
                set.push(item);
            }
        }
        set
    }

    pub fn boolean(&mut self, key: &'static str) -> Option<bool> {
        match self.fm.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => self.fail(key, "`true` or `false`"),
        }
    }

    pub fn integer(&mut self, key: &'static str) -> Option<i64> {
        match self.fm.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) if n.is_i64() => n.as_i64(),
            Some(_) => self.fail(key, "an integer"),
        }
    }

    pub fn timestamp(&mut self, key: &'static str, tz: Option<Tz>) -> Option<DateTime<FixedOffset>> {
        match self.fm.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => self.keep(key, parse_date(s, tz)),
            Some(_) => self.fail(key, "a timestamp such as `2025-08-01 15:02:08 +0200`"),
        }
    }

    /// Record a missing required field
    pub fn require<T>(&mut self, key: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() && !self.rejected.contains(&key) {
            self.errors.push(ContentError::MissingField(key));
        }
        value
    }

    pub fn finish(self) -> Vec<ContentError> {
        self.errors
    }

    fn keep<T>(&mut self, key: &'static str, result: Result<T, ContentError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                // a rejected value is not also reported as missing
                self.rejected.push(key);
                self.errors.push(e);
                None
            }
        }
    }

    fn fail<T>(&mut self, key: &'static str, expected: &'static str) -> Option<T> {
        self.rejected.push(key);
        self.errors.push(ContentError::WrongType { key, expected });
        None
    }
}

/// Strings, numbers and booleans all read as text (`tags: [go, 2025]`)
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl PostMeta {
    /// Interpret a post's block. `tz` resolves dates written without an offset.
    pub fn read(fm: &FrontMatter, tz: Option<Tz>) -> Result<Self, Vec<ContentError>> {
        let mut r = FieldReader::new(fm);

        let title = r.text(TITLE).filter(|t| !t.trim().is_empty());
        let title = r.require(TITLE, title);
        let date = r.timestamp(DATE, tz);
        let date = r.require(DATE, date);
        let categories = r.text_list(CATEGORIES);
        let tags = r.text_set(TAGS);
        let pin = r.boolean(PIN).unwrap_or(false);
        let author = r.text(AUTHOR);

        let errors = r.finish();
        match (title, date) {
            (Some(title), Some(date)) if errors.is_empty() => Ok(Self {
                title,
                date,
                categories,
                tags,
                pin,
                author,
            }),
            _ => Err(errors),
        }
    }
}

impl PageMeta {
    pub fn read(fm: &FrontMatter) -> Result<Self, Vec<ContentError>> {
        let mut r = FieldReader::new(fm);

        let title = r.text(TITLE);
        let icon = r.text(ICON);
        let order = r.integer(ORDER);

        let errors = r.finish();
        if errors.is_empty() {
            Ok(Self { title, icon, order })
        } else {
            Err(errors)
        }
    }
}
