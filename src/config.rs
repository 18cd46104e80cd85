//! Configuration logic for folio.
//!
//! This module handles the deserialization of `folio.toml` and provides
//! sane defaults for any missing fields, so an empty file is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "folio.toml";

/// The root configuration schema for a folio project.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Directory holding the post documents. Scanned non-recursively.
    /// Defaults to `./posts`.
    #[serde(default = "default_posts")]
    pub posts_dir: PathBuf,

    /// File extension that marks a document as a post, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Where the RSS document is written. Overwritten on every build.
    /// Defaults to `./public/feed.xml`.
    #[serde(default = "default_feed_path")]
    pub feed_path: PathBuf,

    /// Site identity, used in the feed channel.
    #[serde(default)]
    pub site: SiteMetadata,

    #[serde(default)]
    pub feed: FeedSettings,

    #[serde(default)]
    pub listing: ListingSettings,
}

/// Metadata describing the website for the feed channel.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SiteMetadata {
    #[serde(default = "default_title")]
    pub title: String,

    /// The base domain for absolute links (e.g. "https://example.com").
    /// Post links are `<base_url>/post/<slug>`.
    #[serde(default = "default_url")]
    pub base_url: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FeedSettings {
    /// Cap on the number of items in the feed. Unlimited when unset.
    pub max_items: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ListingSettings {
    #[serde(default)]
    pub order: ListingOrder,
}

/// Ordering of the post listing.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingOrder {
    /// Most recent first, same as the feed.
    #[default]
    Date,
    /// Enumeration order, reversed.
    Reverse,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            posts_dir: default_posts(),
            extension: default_extension(),
            feed_path: default_feed_path(),
            site: SiteMetadata::default(),
            feed: FeedSettings::default(),
            listing: ListingSettings::default(),
        }
    }
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_url(),
            description: String::new(),
            language: default_language(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|_| {
            anyhow::anyhow!("{} not found. Run 'folio init' to begin.", path.display())
        })?;
        Ok(toml::from_str(&raw)?)
    }

    /// Absolute URL of the feed itself, for the channel's self link.
    pub fn feed_url(&self) -> String {
        let name = self
            .feed_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("feed.xml");
        format!("{}/{}", self.site.base_url.trim_end_matches('/'), name)
    }
}

// --- Default value providers ---

fn default_posts() -> PathBuf { PathBuf::from("./posts") }
fn default_extension() -> String { "md".to_string() }
fn default_feed_path() -> PathBuf { PathBuf::from("./public/feed.xml") }
fn default_title() -> String { "a folio site".to_string() }
fn default_url() -> String { "https://example.com".to_string() }
fn default_language() -> String { "en-us".to_string() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.posts_dir, PathBuf::from("./posts"));
        assert_eq!(cfg.extension, "md");
        assert_eq!(cfg.site.language, "en-us");
        assert_eq!(cfg.feed.max_items, None);
        assert_eq!(cfg.listing.order, ListingOrder::Date);
        assert_eq!(cfg.feed_url(), "https://example.com/feed.xml");
    }

    #[test]
    fn reads_sections() {
        let cfg: Config = toml::from_str(
            r#"
            posts_dir = "src/posts"
            feed_path = "public/rss.xml"

            [site]
            title = "My Blog"
            base_url = "https://me.github.io/"

            [feed]
            max_items = 20

            [listing]
            order = "reverse"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.posts_dir, PathBuf::from("src/posts"));
        assert_eq!(cfg.site.title, "My Blog");
        assert_eq!(cfg.site.language, "en-us");
        assert_eq!(cfg.feed.max_items, Some(20));
        assert_eq!(cfg.listing.order, ListingOrder::Reverse);
        assert_eq!(cfg.feed_url(), "https://me.github.io/rss.xml");
    }

    #[test]
    fn missing_file_suggests_init() {
        let err = Config::load(Path::new("/definitely/not/here/folio.toml")).unwrap_err();
        assert!(err.to_string().contains("folio init"));
    }
}
