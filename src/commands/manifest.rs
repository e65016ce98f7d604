//! Write the JSON manifest handed to the renderer
//!
//! The manifest carries everything the renderer needs to lay the site out
//! without re-reading front matter: posts in listing order with permalinks,
//! pages in navigation order, category/tag groupings and yearly archives.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::content::{ContentStore, Layout, MarkdownSummary, Page, Post};
use crate::helpers::{archives, date_xml, group_by_category, group_by_tag, url_for};
use crate::Site;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub site: SiteData<'a>,
    pub posts: Vec<PostData<'a>>,
    pub pages: Vec<PageData<'a>>,
    /// name -> post ids in listing order
    pub categories: BTreeMap<&'a str, Vec<&'a str>>,
    pub tags: BTreeMap<&'a str, Vec<&'a str>>,
    pub archives: Vec<ArchiveYearData<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SiteData<'a> {
    pub title: &'a str,
    pub tagline: &'a str,
    pub description: &'a str,
    pub author: &'a str,
    pub lang: &'a str,
    pub url: &'a str,
    pub home: String,
}

#[derive(Debug, Serialize)]
pub struct PostData<'a> {
    pub id: &'a str,
    pub layout: Layout,
    pub title: &'a str,
    pub date: String,
    pub path: &'a str,
    pub permalink: &'a str,
    pub source: String,
    pub categories: &'a [String],
    pub tags: &'a [String],
    pub pin: bool,
    pub author: &'a str,
    pub excerpt: String,
    pub word_count: usize,
    /// Neighbours in listing order
    pub prev: Option<&'a str>,
    pub next: Option<&'a str>,
    /// The full block, including keys the schema does not interpret
    pub front_matter: &'a IndexMap<String, serde_yaml::Value>,
}

#[derive(Debug, Serialize)]
pub struct PageData<'a> {
    pub layout: Layout,
    pub title: &'a str,
    pub icon: Option<&'a str>,
    pub order: Option<i64>,
    pub path: &'a str,
    pub permalink: &'a str,
    pub source: String,
    pub front_matter: &'a IndexMap<String, serde_yaml::Value>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveYearData<'a> {
    pub year: i32,
    pub posts: Vec<&'a str>,
}

/// Check the site, then write `manifest.json` into the destination
pub fn run(site: &Site) -> Result<PathBuf> {
    let store = super::check::run(site)?;
    let manifest = build(site, &store);
    let json = serde_json::to_string_pretty(&manifest)?;

    fs::create_dir_all(&site.destination)
        .with_context(|| format!("Failed to create {:?}", site.destination))?;
    let output_path = site.destination.join(MANIFEST_FILE);
    fs::write(&output_path, json)
        .with_context(|| format!("Failed to write {:?}", output_path))?;

    tracing::info!(
        "Wrote {:?} ({} posts, {} pages)",
        output_path,
        manifest.posts.len(),
        manifest.pages.len()
    );
    Ok(output_path)
}

/// Assemble the manifest from a checked store
pub fn build<'a>(site: &'a Site, store: &'a ContentStore) -> Manifest<'a> {
    let config = &site.config;
    let summary = MarkdownSummary::new(&config.excerpt_separator);

    let ids = |posts: Vec<&'a Post>| posts.into_iter().map(|p| p.id.as_str()).collect::<Vec<_>>();

    Manifest {
        site: SiteData {
            title: &config.title,
            tagline: &config.tagline,
            description: &config.description,
            author: &config.author,
            lang: &config.lang,
            url: &config.url,
            home: url_for(config, "/"),
        },
        posts: store
            .posts
            .iter()
            .map(|p| post_data(p, &store.posts, &summary))
            .collect(),
        pages: store.pages.iter().map(page_data).collect(),
        categories: group_by_category(&store.posts)
            .into_iter()
            .map(|(name, posts)| (name, ids(posts)))
            .collect(),
        tags: group_by_tag(&store.posts)
            .into_iter()
            .map(|(name, posts)| (name, ids(posts)))
            .collect(),
        archives: archives(&store.posts)
            .into_iter()
            .map(|(year, posts)| ArchiveYearData {
                year,
                posts: ids(posts),
            })
            .collect(),
    }
}

fn post_data<'a>(post: &'a Post, posts: &'a [Post], summary: &MarkdownSummary) -> PostData<'a> {
    PostData {
        id: post.id.as_str(),
        layout: Layout::Post,
        title: &post.title,
        date: date_xml(&post.date),
        path: &post.path,
        permalink: &post.permalink,
        source: post.source.to_string_lossy().to_string(),
        categories: &post.categories,
        tags: &post.tags,
        pin: post.pin,
        author: &post.author,
        excerpt: summary.excerpt(&post.raw),
        word_count: summary.word_count(&post.raw),
        prev: post.prev(posts).map(|p| p.id.as_str()),
        next: post.next(posts).map(|p| p.id.as_str()),
        front_matter: post.front_matter.fields(),
    }
}

fn page_data(page: &Page) -> PageData<'_> {
    PageData {
        layout: Layout::Page,
        title: &page.title,
        icon: page.icon.as_deref(),
        order: page.order,
        path: &page.path,
        permalink: &page.permalink,
        source: page.source.to_string_lossy().to_string(),
        front_matter: page.front_matter.fields(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_site(dir: &std::path::Path) {
        fs::create_dir_all(dir.join("_posts")).unwrap();
        fs::create_dir_all(dir.join("_tabs")).unwrap();
        fs::write(
            dir.join("_config.yml"),
            "title: Notes\nauthor: Site Owner\nurl: https://example.com\nbaseurl: /blog\n",
        )
        .unwrap();
        fs::write(
            dir.join("_posts/2025-08-01-go.md"),
            r#"---
title: Mastering Go Performance
date: 2025-08-01T15:02:08+02:00
categories: [Programming, Go]
tags: [go, performance]
pin: true
math: true
---

Profiling first, optimizing second.

```go
func main() {}
```
"#,
        )
        .unwrap();
        fs::write(
            dir.join("_posts/2025-08-15-anti-patterns.md"),
            "---\ntitle: Architecture Anti-Patterns\ndate: 2025-08-15 10:00:00 +0200\ncategories: [Programming]\ntags: [architecture]\nauthor: Guest\n---\n\nBig balls of mud.\n",
        )
        .unwrap();
        fs::write(
            dir.join("_tabs/about.md"),
            "---\nlayout: page\nicon: fas fa-info-circle\norder: 4\n---\n\nHello.\n",
        )
        .unwrap();
    }

    #[test]
    fn test_manifest_shape() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        let site = Site::new(dir.path()).unwrap();

        let path = run(&site).unwrap();
        assert_eq!(path, site.destination.join(MANIFEST_FILE));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(json["site"]["home"], "/blog/");

        let posts = json["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 2);
        // pinned post first although it is older
        assert_eq!(posts[0]["id"], "2025-08-01-mastering-go-performance");
        assert_eq!(posts[0]["date"], "2025-08-01T15:02:08+02:00");
        assert_eq!(posts[0]["author"], "Site Owner");
        assert_eq!(
            posts[0]["permalink"],
            "https://example.com/blog/posts/2025/08/01/mastering-go-performance/"
        );
        assert_eq!(posts[0]["excerpt"], "Profiling first, optimizing second.");
        assert_eq!(posts[0]["front_matter"]["math"], true);
        assert_eq!(posts[0]["prev"], serde_json::Value::Null);
        assert_eq!(posts[0]["next"], "2025-08-15-architecture-anti-patterns");
        assert_eq!(posts[1]["author"], "Guest");

        assert_eq!(json["pages"][0]["path"], "/blog/about/");
        assert_eq!(json["pages"][0]["title"], "About");
        assert_eq!(
            json["categories"]["Programming"],
            serde_json::json!([
                "2025-08-01-mastering-go-performance",
                "2025-08-15-architecture-anti-patterns"
            ])
        );
        assert_eq!(json["archives"][0]["year"], 2025);
        assert_eq!(
            json["archives"][0]["posts"][0],
            "2025-08-15-architecture-anti-patterns"
        );
    }

    #[test]
    fn test_manifest_not_written_on_error() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        fs::write(
            dir.path().join("_posts/2025-09-01-broken.md"),
            "---\ntitle: Broken\n---\n",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();

        assert!(run(&site).is_err());
        assert!(!site.destination.join(MANIFEST_FILE).exists());
    }
}
