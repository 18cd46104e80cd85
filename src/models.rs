use crate::frontmatter::Document;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_CATEGORY: &str = "other";

/// A post ready for the listing and the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub category: String,
    pub label: String,
    pub excerpt: String,
    pub read_time: String,
    #[serde(skip)]
    pub content: String,
}

impl Post {
    /// Projects a parsed document into a post. Untitled documents yield `None`.
    pub fn from_document(doc: &Document, name: &str, extension: &str) -> Option<Post> {
        let title = doc.field("title")?;
        let category = doc
            .field("category")
            .map(str::to_lowercase)
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let label = doc.field("label").map_or_else(|| category.clone(), str::to_string);
        let text = |key: &str| doc.field(key).unwrap_or_default().to_string();

        Some(Post {
            slug: resolve_slug(doc, name, extension),
            title: title.to_string(),
            date: text("date"),
            label,
            category,
            excerpt: text("excerpt"),
            read_time: text("readTime"),
            content: doc.body.clone(),
        })
    }

    /// Writes the post back out as a front-matter document.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("---\n");
        let mut field = |key: &str, value: &str, always: bool| {
            if always || !value.is_empty() {
                out.push_str(&format!("{key}: \"{}\"\n", value.replace(['\r', '\n'], " ")));
            }
        };
        field("title", &self.title, true);
        field("slug", &self.slug, true);
        field("date", &self.date, false);
        field("category", &self.category, true);
        field("label", &self.label, self.label != self.category);
        field("excerpt", &self.excerpt, false);
        field("readTime", &self.read_time, false);
        out.push_str("---\n\n");
        out.push_str(&self.content);
        out.push('\n');
        out
    }
}

/// Header `slug` if set, else the file name without its extension.
pub fn resolve_slug(doc: &Document, name: &str, extension: &str) -> String {
    if let Some(slug) = doc.field("slug") {
        return slug.to_string();
    }
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    file.strip_suffix(&format!(".{extension}"))
        .unwrap_or(file)
        .to_string()
}

/// Slugs claimed by more than one post, in first-seen order.
pub fn duplicate_slugs(posts: &[Post]) -> Vec<&str> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut dups = Vec::new();
    for p in posts {
        let n = seen.entry(p.slug.as_str()).or_default();
        *n += 1;
        if *n == 2 {
            dups.push(p.slug.as_str());
        }
    }
    dups
}
