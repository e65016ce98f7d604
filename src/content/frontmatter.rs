//! Front-matter parsing and serialization
//!
//! A document optionally starts with a metadata block:
//!
//! ```text
//! ---
//! title: Hello
//! tags: [go, perf]
//! ---
//! body...
//! ```
//!
//! The block is kept as an ordered key/value map so that writing it back
//! reproduces the author's key order. Interpreting the values is the job of
//! [`crate::content::schema`].

use indexmap::IndexMap;
use serde_yaml::Value;

use super::error::ContentError;

/// Marker line opening and closing the block
const MARKER: &str = "---";
/// YAML end-of-document marker, also accepted as a closing line
const END_MARKER: &str = "...";

/// Front-matter data from a post or page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some(rest) = strip_marker_line(content) else {
            // No front-matter found
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            let trimmed = line.trim_end();
            if trimmed == MARKER || trimmed == END_MARKER {
                let yaml = &rest[..offset];
                let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
                return Ok((Self::from_yaml(yaml)?, body));
            }
            offset += line.len();
        }

        Err(ContentError::UnclosedFrontMatter)
    }

    /// Whether the content opens with a metadata block at all
    pub fn is_present(content: &str) -> bool {
        strip_marker_line(content.trim_start_matches('\u{feff}').trim_start()).is_some()
    }

    fn from_yaml(yaml: &str) -> Result<Self, ContentError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value =
            serde_yaml::from_str(yaml).map_err(|e| ContentError::InvalidYaml(e.to_string()))?;

        let mapping = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => return Err(ContentError::NotAMapping),
        };

        let mut fields = IndexMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            match key {
                Value::String(key) => {
                    fields.insert(key, value);
                }
                _ => return Err(ContentError::NotAMapping),
            }
        }

        Ok(Self { fields })
    }

    /// Serialize back into a `---` delimited block, keys in original order
    pub fn to_block(&self) -> Result<String, serde_yaml::Error> {
        let mut block = String::from(MARKER);
        block.push('\n');
        if !self.fields.is_empty() {
            block.push_str(&serde_yaml::to_string(&self.fields)?);
        }
        block.push_str(MARKER);
        block.push('\n');
        Ok(block)
    }

    /// Render a full document: the block, a blank line, then the body
    pub fn to_document(&self, body: &str) -> Result<String, serde_yaml::Error> {
        let mut doc = self.to_block()?;
        if !body.is_empty() {
            doc.push('\n');
            doc.push_str(body);
        }
        Ok(doc)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a field, keeping its position if it already exists
    pub fn insert<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Borrow the raw map, e.g. for the manifest
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

/// Return what follows the opening marker line, if the content starts with one
fn strip_marker_line(content: &str) -> Option<&str> {
    let (first, rest) = match content.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (content, ""),
    };
    (first.trim_end() == MARKER).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00 +0800
tags:
  - rust
  - jekyll
categories:
  - programming
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.get("title").and_then(Value::as_str),
            Some("Hello World")
        );
        assert_eq!(
            fm.get("date").and_then(Value::as_str),
            Some("2024-01-15 10:30:00 +0800")
        );
        assert_eq!(
            fm.keys().collect::<Vec<_>>(),
            vec!["title", "date", "tags", "categories"]
        );
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_is_present() {
        assert!(FrontMatter::is_present("---\n---\n"));
        assert!(FrontMatter::is_present("\n\n---\ntitle: x\n---\n"));
        assert!(!FrontMatter::is_present("# README\n---\n"));
    }

    #[test]
    fn test_empty_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nbody\n").unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, "body\n");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\nlayout: page\r\norder: 4\r\n---\r\n\r\nHi\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("layout").and_then(Value::as_str), Some("page"));
        assert_eq!(fm.get("order").and_then(Value::as_i64), Some(4));
        assert_eq!(remaining, "Hi\r\n");
    }

    #[test]
    fn test_body_horizontal_rules_survive() {
        let content = "---\ntitle: Rules\n---\nabove\n\n---\n\nbelow\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.len(), 1);
        assert_eq!(remaining, "above\n\n---\n\nbelow\n");
    }

    #[test]
    fn test_unclosed_block() {
        let err = FrontMatter::parse("---\ntitle: Oops\n\nbody").unwrap_err();
        assert_eq!(err, ContentError::UnclosedFrontMatter);
    }

    #[test]
    fn test_prose_block_is_rejected() {
        // A leading rule followed by prose is not metadata
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;
        let err = FrontMatter::parse(content).unwrap_err();
        assert_eq!(err, ContentError::NotAMapping);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = FrontMatter::parse("---\ntitle: [unterminated\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::InvalidYaml(_)));
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let content = r#"---
title: "Mastering Go Performance: Profiling"
date: 2025-08-01 15:02:08 +0200
categories: [Programming, Go]
tags: [go, pprof, performance]
pin: true
math: true
---
Body
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let block = fm.to_block().unwrap();
        let (again, rest) = FrontMatter::parse(&block).unwrap();
        assert_eq!(again, fm);
        assert!(rest.is_empty());
        // and a second pass is byte-identical
        assert_eq!(again.to_block().unwrap(), block);
    }

    #[test]
    fn test_insert_keeps_position() {
        let (mut fm, _) = FrontMatter::parse("---\na: 1\nb: 2\n---\n").unwrap();
        fm.insert("a", 3);
        fm.insert("c", "x");
        assert_eq!(fm.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(fm.get("a").and_then(Value::as_i64), Some(3));
    }

    #[test]
    fn test_to_document() {
        let mut fm = FrontMatter::default();
        fm.insert("title", "New");
        let doc = fm.to_document("Hello\n").unwrap();
        assert_eq!(doc, "---\ntitle: New\n---\n\nHello\n");
    }

    #[test]
    fn test_block_closed_by_end_of_document_marker() {
        let content = "---\ntitle: Dots\ntags: [a]\n...\nBody here\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some(&Value::from("Dots")));
        assert_eq!(fm.len(), 2);
        assert_eq!(remaining, "Body here\n");

        // written back with the regular marker
        assert!(fm.to_block().unwrap().ends_with("---\n"));
    }
}
