//! Site configuration (_config.yml)

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    /// Default attribution for posts without an `author` key
    pub author: String,
    pub lang: String,
    /// IANA zone used for dates written without an offset
    pub timezone: Option<String>,

    // URL
    pub url: String,
    pub baseurl: String,
    pub permalink: String,

    // Directory
    pub posts_dir: String,
    pub tabs_dir: String,
    pub destination: String,
    #[serde(default)]
    pub exclude: Vec<String>,

    // Writing
    pub new_post_name: String,
    pub excerpt_separator: String,

    // Date format (Moment.js style)
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "folio".to_string(),
            tagline: String::new(),
            description: String::new(),
            author: "Anonymous".to_string(),
            lang: "en".to_string(),
            timezone: None,

            url: "http://example.com".to_string(),
            baseurl: String::new(),
            permalink: "/posts/:year/:month/:day/:title/".to_string(),

            posts_dir: "_posts".to_string(),
            tabs_dir: "_tabs".to_string(),
            destination: "_site".to_string(),
            exclude: Vec::new(),

            new_post_name: ":year-:month-:day-:title.md".to_string(),
            excerpt_separator: "<!-- more -->".to_string(),

            date_format: "YYYY-MM-DD".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        // An empty file is a valid "all defaults" config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        config.time_zone()?;
        Ok(config)
    }

    /// Resolve the configured timezone, if any
    pub fn time_zone(&self) -> Result<Option<Tz>> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => name
                .parse::<Tz>()
                .map(Some)
                .map_err(|e| anyhow!("Unknown timezone {:?}: {}", name, e)),
        }
    }

    /// Compile the `exclude` globs
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern {:?}", p))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.tabs_dir, "_tabs");
        assert_eq!(config.permalink, "/posts/:year/:month/:day/:title/");
        assert!(config.time_zone().unwrap().is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Notes
author: Jane Roe
timezone: Europe/Berlin
exclude:
  - "drafts/**"
github:
  username: jroe
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.author, "Jane Roe");
        assert_eq!(config.time_zone().unwrap(), Some(chrono_tz::Europe::Berlin));
        assert_eq!(config.exclude_patterns().unwrap().len(), 1);
        assert!(config.extra.contains_key("github"));
        // untouched keys keep their defaults
        assert_eq!(config.destination, "_site");
    }

    #[test]
    fn test_unknown_timezone() {
        let config = SiteConfig {
            timezone: Some("Mars/Olympus".to_string()),
            ..Default::default()
        };
        assert!(config.time_zone().is_err());
    }
}
