//! Build the static site

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::content::Collection;
use crate::data::SiteData;
use crate::generator::Generator;
use crate::Site;

/// Quiet period before a batch of changes triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Build the site with the configured draft setting
pub fn run(site: &Site) -> Result<()> {
    run_with_drafts(site, site.config.render_drafts)
}

/// Build the site, optionally including drafts
pub fn run_with_drafts(site: &Site, drafts: bool) -> Result<()> {
    let start = std::time::Instant::now();

    let collection = Collection::new(site).with_drafts(drafts);
    let posts = collection.load_posts()?;
    let pages = collection.load_pages()?;
    let data = SiteData::load(site)?;

    tracing::info!(
        "Loaded {} posts, {} pages, {} projects",
        posts.len(),
        pages.len(),
        data.projects.len()
    );

    let generator = Generator::new(site)?;
    generator.generate(&posts, &pages, &data)?;

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Paths whose changes affect the output: the content, data and static
/// directories, plus `_config.yml`
pub fn watch_targets(site: &Site) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets: Vec<(PathBuf, RecursiveMode)> =
        [&site.content_dir, &site.data_dir, &site.static_dir]
            .into_iter()
            .map(|dir| (dir.clone(), RecursiveMode::Recursive))
            .collect();
    targets.push((site.base_dir.join("_config.yml"), RecursiveMode::NonRecursive));

    targets.retain(|(path, _)| path.exists());
    targets
}

/// Skip editor backups and VCS noise
pub(crate) fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

/// Watch the site and rebuild after every debounced batch of changes.
///
/// Blocks the calling thread. `on_rebuilt` runs after each successful
/// build. Changes made while a build runs are delivered as the next batch.
pub fn watch<F>(site: &Site, drafts: bool, mut on_rebuilt: F) -> Result<()>
where
    F: FnMut(),
{
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for (path, mode) in watch_targets(site) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for batch in rx {
        let events = match batch {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<&Path> = events
            .iter()
            .map(|e| e.path.as_path())
            .filter(|p| is_relevant(p))
            .collect();
        if changed.is_empty() {
            continue;
        }
        for path in &changed {
            tracing::info!("File changed: {}", path.display());
        }

        // Reopen the site; the change may be to _config.yml
        match Site::new(&site.base_dir).and_then(|fresh| run_with_drafts(&fresh, drafts)) {
            Ok(()) => on_rebuilt(),
            Err(e) => tracing::error!("Build failed: {:#}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_watch_targets_only_existing_paths() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("content/writings")).unwrap();
        fs::write(tmp.path().join("_config.yml"), "title: t\n").unwrap();
        let site = Site::new(tmp.path()).unwrap();

        let targets = watch_targets(&site);
        let paths: Vec<&PathBuf> = targets.iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![&site.content_dir, &tmp.path().join("_config.yml")]
        );
        assert_eq!(targets[1].1, RecursiveMode::NonRecursive);
        assert!(!paths.contains(&&site.public_dir));
    }

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("content/writings/a.md")));
        assert!(!is_relevant(Path::new("content/.git/index")));
        assert!(!is_relevant(Path::new("content/writings/a.md~")));
        assert!(!is_relevant(Path::new("content/writings/.a.md.swp")));
    }
}
