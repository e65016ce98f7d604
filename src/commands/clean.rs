//! Clean the destination directory

use anyhow::Result;
use std::fs;

use crate::Site;

/// Remove the destination directory and the manifest in it
pub fn run(site: &Site) -> Result<()> {
    if site.destination == site.base_dir {
        anyhow::bail!("Refusing to delete the site root {:?}", site.base_dir);
    }

    if site.destination.exists() {
        fs::remove_dir_all(&site.destination)?;
        tracing::info!("Deleted: {:?}", site.destination);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_clean_removes_destination() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path().to_path_buf(), SiteConfig::default());
        fs::create_dir_all(&site.destination).unwrap();
        fs::write(site.destination.join("manifest.json"), "{}").unwrap();

        run(&site).unwrap();
        assert!(!site.destination.exists());
        // cleaning twice is fine
        run(&site).unwrap();
    }

    #[test]
    fn test_clean_refuses_site_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig {
            destination: String::new(),
            ..Default::default()
        };
        let site = Site::with_config(dir.path().to_path_buf(), config);
        assert!(run(&site).is_err());
        assert!(dir.path().exists());
    }
}
