//! Content loader - loads posts and pages from the site directory

use anyhow::Result;
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::error::{ContentError, ContentWarning, Report};
use super::schema::{self, FieldReader, Layout, PageMeta, PostMeta};
use super::{Document, FrontMatter, Page, Post, PostId};
use crate::helpers::{self, full_url_for, url_for};
use crate::Site;

/// Directories never scanned for pages
const IGNORED_DIRS: &[&str] = &["node_modules", "vendor"];

/// Where a document lives decides its default layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Posts,
    Tabs,
    Other,
}

/// Every post and page of a site, in listing and navigation order
#[derive(Debug, Default)]
pub struct ContentStore {
    /// Pinned first, then newest first
    pub posts: Vec<Post>,
    /// By `order`, then path
    pub pages: Vec<Page>,
    pub report: Report,
}

impl ContentStore {
    /// Load all documents of a site
    pub fn load(site: &Site) -> Result<Self> {
        let loader = ContentLoader::new(site)?;
        Ok(loader.load())
    }
}

/// Loads content from the site directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    tz: Option<Tz>,
    exclude: Vec<glob::Pattern>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Result<Self> {
        Ok(Self {
            site,
            tz: site.config.time_zone()?,
            exclude: site.config.exclude_patterns()?,
        })
    }

    /// Read every markdown document as `(path, front matter, body)`
    ///
    /// Files outside the posts directory without a metadata block are plain
    /// files, not pages, and are skipped.
    pub fn read_documents(&self, report: &mut Report) -> Vec<Document> {
        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.site.base_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || self.is_included(e))
        {
            // A dangling symlink or unreadable directory hides documents
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| self.relative(p))
                        .unwrap_or_else(|| PathBuf::from("."));
                    report.error(&path, ContentError::Io(e.to_string()));
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            let relative = self.relative(path);
            let is_post = self.location(path) == Location::Posts;

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    report.error(&relative, ContentError::Io(e.to_string()));
                    continue;
                }
            };

            if !is_post && !FrontMatter::is_present(&content) {
                tracing::debug!("Skipping {:?}: no front-matter", relative);
                continue;
            }

            match FrontMatter::parse(&content) {
                Ok((front_matter, body)) => {
                    tracing::debug!("Read {:?} ({} keys)", relative, front_matter.len());
                    documents.push(Document {
                        path: relative,
                        front_matter,
                        body: body.to_string(),
                    });
                }
                Err(e) => report.error(&relative, e),
            }
        }

        documents
    }

    /// Load, interpret and order every document
    pub fn load(&self) -> ContentStore {
        let mut store = ContentStore::default();

        for doc in self.read_documents(&mut store.report) {
            for key in schema::unknown_keys(&doc.front_matter) {
                store.report.warn(&doc.path, ContentWarning::UnknownKey(key));
            }

            let location = self.location(&self.site.base_dir.join(&doc.path));
            if location == Location::Posts {
                match self.load_post(doc) {
                    Ok(post) => store.posts.push(post),
                    Err((path, errors)) => {
                        errors.into_iter().for_each(|e| store.report.error(&path, e))
                    }
                }
            } else {
                match self.load_page(doc, location) {
                    Ok(page) => {
                        if location == Location::Tabs && page.order.is_none() {
                            store.report.warn(&page.source, ContentWarning::MissingOrder);
                        }
                        store.pages.push(page)
                    }
                    Err((path, errors)) => {
                        errors.into_iter().for_each(|e| store.report.error(&path, e))
                    }
                }
            }
        }

        helpers::sort_posts(&mut store.posts);
        for tie in helpers::sort_pages(&mut store.pages) {
            store.report.warn(
                &tie.second,
                ContentWarning::OrderCollision {
                    order: tie.order,
                    other: tie.first,
                },
            );
        }

        check_unique(&mut store);

        tracing::info!(
            "Loaded {} posts and {} pages",
            store.posts.len(),
            store.pages.len()
        );

        store
    }

    /// Interpret a document from the posts directory
    fn load_post(&self, doc: Document) -> Result<Post, (PathBuf, Vec<ContentError>)> {
        let mut reader = FieldReader::new(&doc.front_matter);
        let layout = reader.layout(Layout::Post);
        let mut errors = reader.finish();
        if layout == Some(Layout::Page) {
            errors.push(ContentError::MisplacedLayout {
                layout: "page",
                location: "the posts directory",
            });
        }

        let meta = PostMeta::read(&doc.front_matter, self.tz);
        let meta = match meta {
            Ok(meta) if errors.is_empty() => meta,
            Ok(_) => return Err((doc.path, errors)),
            Err(more) => {
                errors.extend(more);
                return Err((doc.path, errors));
            }
        };

        let config = &self.site.config;
        let title_slug = slug::slugify(&meta.title);
        let path = helpers::post_path(&config.permalink, &meta.date, &title_slug, &meta.categories);

        Ok(Post {
            id: PostId::new(&meta.date, &meta.title),
            title: meta.title,
            date: meta.date,
            categories: meta.categories,
            tags: meta.tags,
            pin: meta.pin,
            author: meta.author.unwrap_or_else(|| config.author.clone()),
            source: doc.path,
            path: url_for(config, &path),
            permalink: full_url_for(config, &path),
            front_matter: doc.front_matter,
            raw: doc.body,
        })
    }

    /// Interpret a document outside the posts directory
    fn load_page(
        &self,
        doc: Document,
        location: Location,
    ) -> Result<Page, (PathBuf, Vec<ContentError>)> {
        let mut reader = FieldReader::new(&doc.front_matter);
        let layout = reader.layout(Layout::Page);
        let mut errors = reader.finish();
        if layout == Some(Layout::Post) {
            errors.push(ContentError::MisplacedLayout {
                layout: "post",
                location: "pages",
            });
        }

        let meta = match PageMeta::read(&doc.front_matter) {
            Ok(meta) if errors.is_empty() => meta,
            Ok(_) => return Err((doc.path, errors)),
            Err(more) => {
                errors.extend(more);
                return Err((doc.path, errors));
            }
        };

        // Tabs are served from the site root: `_tabs/about.md` -> `/about/`
        let url_source = match location {
            Location::Tabs => doc
                .path
                .strip_prefix(&self.site.config.tabs_dir)
                .unwrap_or(&doc.path)
                .to_path_buf(),
            _ => doc.path.clone(),
        };
        let path = helpers::page_path(&url_source);
        let config = &self.site.config;

        Ok(Page {
            title: meta.title.unwrap_or_else(|| title_from_stem(&doc.path)),
            icon: meta.icon,
            order: meta.order,
            path: url_for(config, &path),
            permalink: full_url_for(config, &path),
            source: doc.path,
            front_matter: doc.front_matter,
            raw: doc.body,
        })
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.site.base_dir)
            .unwrap_or(path)
            .to_path_buf()
    }

    fn location(&self, path: &Path) -> Location {
        if path.starts_with(&self.site.posts_dir) {
            Location::Posts
        } else if path.starts_with(&self.site.tabs_dir) {
            Location::Tabs
        } else {
            Location::Other
        }
    }

    /// Whether the walk should enter or yield an entry
    fn is_included(&self, entry: &DirEntry) -> bool {
        let path = entry.path();
        if self.site.destination != self.site.base_dir && path.starts_with(&self.site.destination) {
            return false;
        }
        if path == self.site.posts_dir || path == self.site.tabs_dir {
            return true;
        }

        let relative = self.relative(path);
        if self.exclude.iter().any(|p| p.matches_path(&relative)) {
            tracing::debug!("Excluded {:?}", relative);
            return false;
        }

        if entry.file_type().is_dir() {
            // `_includes`, `_layouts`, `.git` and friends hold no documents
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('_') || name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref()) {
                return false;
            }
        }

        true
    }
}

/// Post ids and permalinks must be unique across the store
fn check_unique(store: &mut ContentStore) {
    let errors = duplicates(&store.posts, &store.pages);
    for (path, error) in errors {
        store.report.error(&path, error);
    }
}

fn duplicates(posts: &[Post], pages: &[Page]) -> Vec<(PathBuf, ContentError)> {
    let mut ids: HashMap<&PostId, &Path> = HashMap::new();
    let mut permalinks: HashMap<&str, &Path> = HashMap::new();
    let mut errors = Vec::new();

    for post in posts {
        if let Some(other) = ids.insert(&post.id, &post.source) {
            errors.push((
                post.source.clone(),
                ContentError::DuplicateId {
                    id: post.id.to_string(),
                    other: other.to_path_buf(),
                },
            ));
        }
    }

    let links = posts
        .iter()
        .map(|p| (p.path.as_str(), p.source.as_path()))
        .chain(pages.iter().map(|p| (p.path.as_str(), p.source.as_path())));
    for (link, source) in links {
        if let Some(other) = permalinks.insert(link, source) {
            errors.push((
                source.to_path_buf(),
                ContentError::DuplicatePermalink {
                    permalink: link.to_string(),
                    other: other.to_path_buf(),
                },
            ));
        }
    }

    errors
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

lazy_static! {
    /// `2025-08-01-` style prefix of Jekyll file names
    static ref DATE_PREFIX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap();
}

/// `about-me.md` -> `About me`
fn title_from_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");
    let stem = DATE_PREFIX.replace(stem, "").replace(['-', '_'], " ");
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => stem,
    }
}
