//! List site content

use anyhow::Result;

use crate::content::schema::FIELDS;
use crate::content::ContentStore;
use crate::helpers::{format_date, group_by_category, group_by_tag};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let store = site.load()?;
    print!("{}", render(site, &store, content_type)?);
    Ok(())
}

/// Build the listing text for one content type
pub fn render(site: &Site, store: &ContentStore, content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            out.push_str(&format!("Posts ({}):\n", store.posts.len()));
            for post in &store.posts {
                out.push_str(&format!(
                    "  {}{} - {} [{}]\n",
                    if post.pin { "📌 " } else { "" },
                    format_date(&post.date, &site.config.date_format),
                    post.title,
                    post.source.display()
                ));
            }
        }
        "page" | "pages" => {
            out.push_str(&format!("Pages ({}):\n", store.pages.len()));
            for page in &store.pages {
                let order = page
                    .order
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&format!(
                    "  {:>3} {} {} [{}]\n",
                    order,
                    page.title,
                    page.path,
                    page.source.display()
                ));
            }
        }
        "tag" | "tags" => {
            let tags = group_by_tag(&store.posts);
            out.push_str(&format!("Tags ({}):\n", tags.len()));
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
            for (tag, posts) in tags {
                out.push_str(&format!("  {} ({})\n", tag, posts.len()));
            }
        }
        "category" | "categories" => {
            let categories = group_by_category(&store.posts);
            out.push_str(&format!("Categories ({}):\n", categories.len()));
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
            for (category, posts) in categories {
                out.push_str(&format!("  {} ({})\n", category, posts.len()));
            }
        }
        "key" | "keys" => {
            out.push_str(&format!("Front-matter keys ({}):\n", FIELDS.len()));
            for field in FIELDS {
                out.push_str(&format!(
                    "  {:<10} {:<10} {}\n",
                    field.key,
                    format!("{:?}", field.ty),
                    field.effect
                ));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, tag, category, key",
                content_type
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("_posts")).unwrap();
        fs::write(
            dir.path().join("_posts/2025-08-01-go.md"),
            "---\ntitle: Go\ndate: 2025-08-01T15:02:08+02:00\ntags: [go, perf]\npin: true\n---\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("_posts/2025-08-15-arch.md"),
            "---\ntitle: Arch\ndate: 2025-08-15 09:00:00 +0200\ntags: [go]\ncategories: Design\n---\n",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    #[test]
    fn test_list_posts_pinned_first() {
        let (_dir, site) = site();
        let store = site.load().unwrap();
        let out = render(&site, &store, "post").unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Posts (2):");
        assert!(lines[1].contains("2025-08-01 - Go"));
        assert!(lines[1].contains("📌"));
        assert!(lines[2].contains("2025-08-15 - Arch"));
    }

    #[test]
    fn test_list_tags_by_count() {
        let (_dir, site) = site();
        let store = site.load().unwrap();
        let out = render(&site, &store, "tags").unwrap();
        assert_eq!(out, "Tags (2):\n  go (2)\n  perf (1)\n");
    }

    #[test]
    fn test_list_unknown_type() {
        let (_dir, site) = site();
        let store = site.load().unwrap();
        assert!(render(&site, &store, "drafts").is_err());
    }
}
