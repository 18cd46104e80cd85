//! Post listing, category filters, and detail lookup.
//!
//! The listing tolerates bad documents: a document that fails to load is
//! logged and skipped while the scan carries on.

use crate::{
    config::ListingOrder,
    date::sort_by_date_desc,
    error::FolioError,
    frontmatter::{self, Document},
    models::{duplicate_slugs, resolve_slug, Post},
    source::DocumentSource,
};
use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::collections::BTreeMap;

/// The filter label that shows every post.
pub const ALL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyEntry {
    pub count: usize,
    pub raw_category: String,
}

/// Post counts keyed by display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTally(BTreeMap<String, TallyEntry>);

impl CategoryTally {
    pub fn record(&mut self, post: &Post) {
        let entry = self
            .0
            .entry(post.label.clone())
            .or_insert_with(|| TallyEntry {
                count: 0,
                raw_category: post.category.to_lowercase(),
            });
        entry.count += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TallyEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Maps a label or a raw category name to the raw category.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if let Some(entry) = self.0.get(name) {
            return Some(entry.raw_category.as_str());
        }
        let lower = name.to_lowercase();
        self.0
            .values()
            .find(|e| e.raw_category == lower)
            .map(|e| e.raw_category.as_str())
    }
}

/// Active category filter. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    active: Option<String>,
}

impl CategoryFilter {
    /// Selecting "All" or the already-active category resets the filter.
    pub fn select(&mut self, category: &str) {
        self.active = match &self.active {
            _ if category == ALL => None,
            Some(current) if current == category => None,
            _ => Some(category.to_string()),
        };
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.active.as_ref().is_none_or(|c| post.category == *c)
    }

    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|p| self.matches(p)).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub posts: Vec<Post>,
    pub tally: CategoryTally,
}

/// Builds the listing and tally. Unloadable documents are skipped.
pub fn load_listing<S: DocumentSource>(
    source: &S,
    order: ListingOrder,
    now: DateTime<Utc>,
) -> Listing {
    let mut listing = Listing::default();

    for name in source.names() {
        let raw = match source.load(name) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(document = %name, error = %e, "failed to process document, skipping");
                continue;
            }
        };
        let doc = frontmatter::parse(&raw);
        if let Some(post) = Post::from_document(&doc, name, source.extension()) {
            listing.tally.record(&post);
            listing.posts.push(post);
        }
    }

    for slug in duplicate_slugs(&listing.posts) {
        tracing::warn!(%slug, "slug used by more than one post");
    }

    match order {
        ListingOrder::Date => sort_by_date_desc(&mut listing.posts, now),
        ListingOrder::Reverse => listing.posts.reverse(),
    }
    listing
}

/// A document found by slug.
#[derive(Debug, Clone)]
pub struct Article {
    pub slug: String,
    pub document: Document,
}

impl Article {
    pub fn body(&self) -> &str {
        &self.document.body
    }
}

/// Linear scan for the first document whose slug matches `id` as given or
/// percent-decoded. Misses are reported only after every document was tried.
pub fn find_post<S: DocumentSource>(source: &S, id: &str) -> Result<Article, FolioError> {
    let decoded = percent_decode_str(id).decode_utf8().ok();
    let mut scanned = 0;

    for name in source.names() {
        scanned += 1;
        let raw = match source.load(name) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(document = %name, error = %e, "skipping unreadable post");
                continue;
            }
        };
        let document = frontmatter::parse(&raw);
        let slug = resolve_slug(&document, name, source.extension());
        if slug == id || decoded.as_deref() == Some(slug.as_str()) {
            return Ok(Article { slug, document });
        }
    }

    Err(FolioError::PostNotFound {
        slug: id.to_string(),
        scanned,
    })
}
