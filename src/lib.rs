//! folio: content store and front-matter toolkit for Jekyll-style blogs
//!
//! A site is a directory of markdown documents: posts under `_posts/`,
//! navigation tabs under `_tabs/`, and any other page with a metadata block.
//! This crate loads those documents, checks their metadata against a small
//! closed schema, computes listing order and permalinks, and writes a JSON
//! manifest for the external renderer.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Posts directory
    pub posts_dir: PathBuf,
    /// Navigation tabs directory
    pub tabs_dir: PathBuf,
    /// Output directory for the manifest
    pub destination: PathBuf,
}

impl Site {
    /// Open a site from a directory; a missing `_config.yml` means defaults
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Open a site with an already built configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        let tabs_dir = base_dir.join(&config.tabs_dir);
        let destination = base_dir.join(&config.destination);

        Self {
            config,
            base_dir,
            posts_dir,
            tabs_dir,
            destination,
        }
    }

    /// Load every document, collecting problems instead of failing on the first
    pub fn load(&self) -> Result<content::ContentStore> {
        content::ContentStore::load(self)
    }

    /// Load and fail if any document has an error
    pub fn check(&self) -> Result<content::ContentStore> {
        commands::check::run(self)
    }

    /// Check, then write the manifest for the renderer
    pub fn manifest(&self) -> Result<PathBuf> {
        commands::manifest::run(self)
    }

    /// Remove the destination directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post or page
    pub fn new_document(&self, title: &str, layout: content::Layout) -> Result<PathBuf> {
        commands::new::create(self, title, layout)
    }
}
