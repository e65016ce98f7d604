//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::now_in;

const CONFIG: &str = r#"# Site
title: My Blog
tagline: ''
description: ''
author: Anonymous
lang: en
# IANA zone for dates written without an offset, e.g. Asia/Shanghai
timezone:

# URL
url: http://example.com
baseurl: ''
permalink: /posts/:year/:month/:day/:title/

# Directory
posts_dir: _posts
tabs_dir: _tabs
destination: _site
exclude:
  - README.md

# Writing
new_post_name: ':year-:month-:day-:title.md'
excerpt_separator: <!-- more -->

# Date format
date_format: YYYY-MM-DD
"#;

const POST_SCAFFOLD: &str = r#"---
title: {{ title }}
date: {{ date }}
categories: []
tags: []
---
"#;

const PAGE_SCAFFOLD: &str = r#"---
layout: page
title: {{ title }}
icon: fas fa-file
order: 10
---
"#;

const ABOUT_TAB: &str = r#"---
layout: page
icon: fas fa-info-circle
order: 4
---

Something about the author.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("_posts"))?;
    fs::create_dir_all(target_dir.join("_tabs"))?;
    fs::create_dir_all(target_dir.join("_scaffolds"))?;

    fs::write(&config_path, CONFIG)?;
    fs::write(target_dir.join("_scaffolds/post.md"), POST_SCAFFOLD)?;
    fs::write(target_dir.join("_scaffolds/page.md"), PAGE_SCAFFOLD)?;
    fs::write(target_dir.join("_tabs/about.md"), ABOUT_TAB)?;

    // Create a sample post
    let now = now_in(None);
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
categories: [Blog]
tags: [getting-started]
---

This is your very first post. Check it with `folio check`, list the site
with `folio list`, and hand it to your renderer with `folio manifest`.

<!-- more -->

## Pinning

Add `pin: true` to keep a post above newer ones.
"#,
        now.format("%Y-%m-%d %H:%M:%S %z")
    );

    fs::write(
        target_dir.join(format!("_posts/{}-hello-world.md", now.format("%Y-%m-%d"))),
        sample_post,
    )?;

    tracing::debug!("Initialized site skeleton in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;

    #[test]
    fn test_init_site_passes_check() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "My Blog");

        let store = site.load().unwrap();
        assert!(store.report.is_ok(), "{:?}", store.report.errors);
        assert_eq!(store.posts.len(), 1);
        assert_eq!(store.posts[0].title, "Hello World");
        assert_eq!(store.pages.len(), 1);
        assert_eq!(store.pages[0].title, "About");
        assert_eq!(store.pages[0].path, "/about/");
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
