//! The feed build.
//!
//! Scans the posts directory, turns every titled document into a [`Post`],
//! sorts newest first, and writes the RSS document. Unlike the listing, the
//! build is all-or-nothing: an unreadable directory or document aborts before
//! anything is written.

use crate::{
    config::Config,
    date::sort_by_date_desc,
    frontmatter,
    models::{duplicate_slugs, Post},
    rss,
    source::{DirSource, DocumentSource},
};
use anyhow::Context;
use chrono::{DateTime, Utc};
use console::style;
use rayon::prelude::*;
use std::{fs, path::PathBuf, time::Instant};

/// What a build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub path: PathBuf,
    pub posts: usize,
}

/// Loads and parses every document, drops untitled ones, sorts newest first.
pub fn collect_posts<S>(source: &S, now: DateTime<Utc>) -> anyhow::Result<Vec<Post>>
where
    S: DocumentSource + Sync,
{
    // Indexed collect keeps enumeration order, so ties sort the same as a serial scan.
    let parsed: Vec<Option<Post>> = source
        .names()
        .par_iter()
        .map(|name| -> anyhow::Result<Option<Post>> {
            let raw = source
                .load(name)
                .with_context(|| format!("failed to read {name}"))?;
            let post = Post::from_document(&frontmatter::parse(&raw), name, source.extension());
            if post.is_none() {
                tracing::debug!(document = %name, "no title, skipping");
            }
            Ok(post)
        })
        .collect::<anyhow::Result<_>>()?;

    let mut posts: Vec<Post> = parsed.into_iter().flatten().collect();
    for slug in duplicate_slugs(&posts) {
        tracing::warn!(%slug, "slug used by more than one post");
    }
    sort_by_date_desc(&mut posts, now);
    Ok(posts)
}

/// Renders the feed for `config` without touching the filesystem output.
pub fn render_feed(config: &Config, now: DateTime<Utc>) -> anyhow::Result<(String, usize)> {
    let source = DirSource::open(&config.posts_dir, &config.extension)?;
    let posts = collect_posts(&source, now)?;
    let xml = rss::generate_rss(
        &posts,
        &config.site,
        &config.feed_url(),
        config.feed.max_items,
        now,
    );
    let count = config.feed.max_items.map_or(posts.len(), |max| posts.len().min(max));
    Ok((xml, count))
}

/// The orchestrator of the folio build.
pub fn perform_build(config: &Config, verbose: bool) -> anyhow::Result<BuildReport> {
    let start = Instant::now();
    let now = Utc::now();

    if verbose {
        println!("{} Scanning {}...", style("[1/2]").dim(), config.posts_dir.display());
    }
    let (xml, count) = render_feed(config, now)?;

    if verbose {
        println!("{} Writing feed...", style("[2/2]").dim());
    }
    if let Some(parent) = config.feed_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&config.feed_path, xml)
        .with_context(|| format!("failed to write {}", config.feed_path.display()))?;

    println!(
        "RSS feed generated → {} ({} posts)",
        config.feed_path.display(),
        count
    );
    if verbose {
        println!(
            "{} build complete in {:.2}s.",
            style("success").cyan(),
            start.elapsed().as_secs_f32()
        );
    }

    Ok(BuildReport {
        path: config.feed_path.clone(),
        posts: count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 0, 0, 0).unwrap()
    }

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            posts_dir: dir.join("posts"),
            feed_path: dir.join("public").join("feed.xml"),
            ..Config::default()
        }
    }

    #[test]
    fn collects_titled_posts_newest_first() {
        let src = MemorySource::new(
            "md",
            [
                ("jan.md", "---\ntitle: January\ndate: Jan 2024\n---\n"),
                ("draft.md", "---\ndate: Dec 2025\n---\nno title"),
                ("mar.md", "---\ntitle: March\ndate: Mar 2025\n---\n"),
                ("feb.md", "---\ntitle: February\ndate: Feb 2023\n---\n"),
            ],
        );
        let posts = collect_posts(&src, now()).unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["mar", "jan", "feb"]);
    }

    #[test]
    fn a_single_unreadable_document_aborts() {
        struct Broken;
        impl DocumentSource for Broken {
            fn names(&self) -> &[String] {
                static NAMES: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
                NAMES.get_or_init(|| vec!["bad.md".to_string()])
            }
            fn load(&self, _: &str) -> std::io::Result<String> {
                Err(std::io::Error::other("disk on fire"))
            }
            fn extension(&self) -> &str {
                "md"
            }
        }
        let err = collect_posts(&Broken, now()).unwrap_err();
        assert!(err.to_string().contains("bad.md"));
    }

    #[test]
    fn writes_feed_and_overwrites() {
        let dir = tempdir().unwrap();
        let cfg = config_in(dir.path());
        fs::create_dir_all(&cfg.posts_dir).unwrap();
        fs::write(cfg.posts_dir.join("one.md"), "---\ntitle: One & Only\n---\nbody").unwrap();
        fs::write(cfg.posts_dir.join("untitled.md"), "body only").unwrap();
        fs::create_dir_all(cfg.feed_path.parent().unwrap()).unwrap();
        fs::write(&cfg.feed_path, "stale").unwrap();

        let report = perform_build(&cfg, false).unwrap();
        assert_eq!(report.posts, 1);

        let xml = fs::read_to_string(&cfg.feed_path).unwrap();
        assert!(!xml.contains("stale"));
        assert!(xml.contains("One &amp; Only"));
        assert!(xml.contains("https://example.com/post/one"));
    }

    #[test]
    fn missing_posts_dir_is_fatal_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let cfg = config_in(dir.path());

        let err = perform_build(&cfg, false).unwrap_err();
        assert!(err.downcast_ref::<crate::error::FolioError>().is_some());
        assert!(!cfg.feed_path.exists());
    }
}
