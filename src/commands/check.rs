//! Check every document and fail loudly on authoring mistakes

use anyhow::Result;
use notify_debouncer_mini::new_debouncer;
use notify_debouncer_mini::notify::RecursiveMode;
use std::path::{Component, Path};
use std::time::Duration;

use crate::content::ContentStore;
use crate::Site;

/// Load the site; error out if any document is malformed
pub fn run(site: &Site) -> Result<ContentStore> {
    let store = site.load()?;
    let summary = store.report.log();

    if !store.report.is_ok() {
        anyhow::bail!("Content check failed: {}", summary);
    }

    tracing::info!("Content check passed: {}", summary);
    Ok(store)
}

/// Re-run the check whenever content or config changes
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid re-checks
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;
    debouncer
        .watcher()
        .watch(&site.base_dir, RecursiveMode::Recursive)?;

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", site.base_dir);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| is_watched(site, &e.path));
                if !relevant {
                    continue;
                }

                // Config edits take effect without a restart
                let current = match Site::new(&site.base_dir) {
                    Ok(current) => current,
                    Err(e) => {
                        tracing::error!("Failed to reload config: {:#}", e);
                        continue;
                    }
                };
                match run(&current) {
                    Ok(_) => println!("✅ Content OK"),
                    Err(e) => println!("❌ {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Whether a change under the site root can affect the check
fn is_watched(site: &Site, path: &Path) -> bool {
    let relative = path.strip_prefix(&site.base_dir).unwrap_or(path);
    if relative.starts_with(&site.config.destination) || relative.to_string_lossy().ends_with('~') {
        return false;
    }
    !relative
        .components()
        .any(|c| c == Component::Normal(".git".as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_check_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("_posts")).unwrap();
        fs::write(
            dir.path().join("_posts/bad.md"),
            "---\ntitle: Bad\ndate: tomorrow\nlayout: article\n---\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let err = run(&site).unwrap_err();
        assert!(err.to_string().contains("2 error(s)"), "{}", err);
    }

    #[test]
    fn test_check_passes_with_warnings() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("_tabs")).unwrap();
        fs::write(
            dir.path().join("_tabs/about.md"),
            "---\nlayout: page\nicon: fas fa-info-circle\nmath: true\n---\nHi\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let store = run(&site).unwrap();
        assert_eq!(store.pages.len(), 1);
        // unknown key + missing order
        assert_eq!(store.report.warnings.len(), 2);
    }

    #[test]
    fn test_watch_ignores_git_and_output_only() {
        let site = Site::with_config(
            std::path::PathBuf::from("/blog"),
            crate::config::SiteConfig::default(),
        );
        assert!(is_watched(&site, Path::new("/blog/_posts/2025-01-01-my.github-setup.md")));
        assert!(is_watched(&site, Path::new("/blog/_config.yml")));
        assert!(!is_watched(&site, Path::new("/blog/.git/index")));
        assert!(!is_watched(&site, Path::new("/blog/_site/manifest.json")));
        assert!(!is_watched(&site, Path::new("/blog/_posts/draft.md~")));
    }
}
