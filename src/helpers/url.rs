//! URL and permalink helpers

use chrono::{DateTime, FixedOffset};
use std::path::Path;

use crate::config::SiteConfig;

/// Generate a URL with the base URL prefix
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/hello/") // -> "/blog/posts/hello/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.baseurl.trim_matches('/');
    let path = path.trim_start_matches('/');

    match (base.is_empty(), path.is_empty()) {
        (true, _) => format!("/{}", path),
        (false, true) => format!("/{}/", base),
        (false, false) => format!("/{}/{}", base, path),
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/blog/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// Expand a permalink pattern for a post
pub fn post_path(
    pattern: &str,
    date: &DateTime<FixedOffset>,
    title_slug: &str,
    categories: &[String],
) -> String {
    let categories = categories
        .iter()
        .map(|c| slug::slugify(c))
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    let expanded = pattern
        .replace(":year", &date.format("%Y").to_string())
        .replace(":i_month", &date.format("%-m").to_string())
        .replace(":i_day", &date.format("%-d").to_string())
        .replace(":month", &date.format("%m").to_string())
        .replace(":day", &date.format("%d").to_string())
        .replace(":hour", &date.format("%H").to_string())
        .replace(":minute", &date.format("%M").to_string())
        .replace(":second", &date.format("%S").to_string())
        .replace(":title", title_slug)
        .replace(":categories", &categories);

    normalize(&expanded)
}

/// URL path of a page: its location without extension, `index` mapping to the directory
pub fn page_path(relative: &Path) -> String {
    let parent = relative
        .parent()
        .map(|p| {
            p.components()
                .map(|c| slug::slugify(c.as_os_str().to_string_lossy()))
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default();
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    if stem == "index" {
        normalize(&format!("/{}/", parent))
    } else {
        normalize(&format!("/{}/{}/", parent, slug::slugify(&stem)))
    }
}

/// Collapse empty segments so `/:categories/x/` with no categories becomes `/x/`
fn normalize(path: &str) -> String {
    let trailing = path.ends_with('/');
    let joined = path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        "/".to_string()
    } else if trailing {
        format!("/{}/", joined)
    } else {
        format!("/{}", joined)
    }
}
