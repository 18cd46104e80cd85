use crate::build::perform_build;
use crate::config::Config;
use anyhow::Result;
use console::style;
use notify::{recommended_watcher, RecursiveMode, Watcher};
use std::sync::mpsc;

/// Build once, then rebuild the feed whenever the posts directory changes.
pub fn watch(config: &Config, verbose: bool) -> Result<()> {
    perform_build(config, verbose)?;

    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
    let mut watcher = recommended_watcher(tx)?;
    watcher.watch(&config.posts_dir, RecursiveMode::NonRecursive)?;

    println!(
        "{} Watching {} for changes...",
        style("watch").yellow(),
        config.posts_dir.display()
    );

    for res in rx {
        match res {
            Ok(event) if event.kind.is_create() || event.kind.is_modify() || event.kind.is_remove() => {
                // A failed rebuild leaves the previous feed in place.
                if let Err(e) = perform_build(config, verbose) {
                    tracing::error!(error = %e, "rebuild failed");
                }
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "watch error"),
        }
    }
    Ok(())
}
