//! Create a new post or page

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::fs;
use std::path::PathBuf;

use crate::content::{now_in, FrontMatter, Layout};
use crate::Site;

/// Date format written into new documents
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Create a new post or page and return its path
pub fn create(site: &Site, title: &str, layout: Layout) -> Result<PathBuf> {
    let now = now_in(site.config.time_zone()?);
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let file_path = match layout {
        Layout::Post => {
            let filename = site
                .config
                .new_post_name
                .replace(":year", &now.format("%Y").to_string())
                .replace(":month", &now.format("%m").to_string())
                .replace(":day", &now.format("%d").to_string())
                .replace(":title", &slug);
            site.posts_dir.join(filename)
        }
        Layout::Page => site.tabs_dir.join(format!("{}.md", slug)),
    };

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let date = now.format(DATE_FORMAT).to_string();
    let scaffold_path = site
        .base_dir
        .join("_scaffolds")
        .join(format!("{}.md", layout));
    let content = if scaffold_path.exists() {
        let scaffold = fs::read_to_string(&scaffold_path)?;
        scaffold
            .replace("{{ title }}", &yaml_scalar(title)?)
            .replace("{{ date }}", &date)
    } else {
        default_front_matter(title, &date, layout).to_document("")?
    };

    // Never write a document the loader would reject as malformed
    FrontMatter::parse(&content)
        .with_context(|| format!("Scaffold {:?} produced invalid front-matter", scaffold_path))?;

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;

    tracing::info!("Created {} {:?}", layout, file_path);
    Ok(file_path)
}

fn default_front_matter(title: &str, date: &str, layout: Layout) -> FrontMatter {
    let mut fm = FrontMatter::default();
    match layout {
        Layout::Post => {
            fm.insert("title", title);
            fm.insert("date", date);
            fm.insert("categories", Value::Sequence(Vec::new()));
            fm.insert("tags", Value::Sequence(Vec::new()));
        }
        Layout::Page => {
            fm.insert("layout", "page");
            fm.insert("title", title);
            fm.insert("icon", "fas fa-file");
        }
    }
    fm
}

/// A string written as a YAML scalar, quoted when needed
fn yaml_scalar(s: &str) -> Result<String> {
    Ok(serde_yaml::to_string(s)?.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn site(dir: &std::path::Path) -> Site {
        let config = SiteConfig {
            timezone: Some("Europe/Berlin".to_string()),
            ..Default::default()
        };
        Site::with_config(dir.to_path_buf(), config)
    }

    #[test]
    fn test_new_post_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());

        let path = create(&site, "Go: Profiling & Tracing", Layout::Post).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("-go-profiling-tracing.md"), "{}", name);

        let store = site.load().unwrap();
        assert!(store.report.is_ok(), "{:?}", store.report.errors);
        assert_eq!(store.posts.len(), 1);
        assert_eq!(store.posts[0].title, "Go: Profiling & Tracing");
        assert!(!store.posts[0].pin);
    }

    #[test]
    fn test_new_page_goes_to_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());

        let path = create(&site, "Reading List", Layout::Page).unwrap();
        assert_eq!(path, site.tabs_dir.join("reading-list.md"));

        let store = site.load().unwrap();
        assert!(store.report.is_ok());
        assert_eq!(store.pages[0].title, "Reading List");
        assert_eq!(store.pages[0].icon.as_deref(), Some("fas fa-file"));
    }

    #[test]
    fn test_new_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());
        create(&site, "About", Layout::Page).unwrap();
        assert!(create(&site, "About", Layout::Page).is_err());
    }

    #[test]
    fn test_scaffold_title_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());
        fs::create_dir_all(dir.path().join("_scaffolds")).unwrap();
        fs::write(
            dir.path().join("_scaffolds/post.md"),
            "---\ntitle: {{ title }}\ndate: {{ date }}\npin: true\n---\n",
        )
        .unwrap();

        create(&site, "Key: value", Layout::Post).unwrap();
        let store = site.load().unwrap();
        assert!(store.report.is_ok(), "{:?}", store.report.errors);
        assert_eq!(store.posts[0].title, "Key: value");
        assert!(store.posts[0].pin);
    }
}
