use crate::config::SiteMetadata;
use crate::date::{resolve_date, to_rfc822};
use crate::models::Post;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rss::extension::atom::{AtomExtension, Link};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder};

/// Characters `encodeURIComponent` leaves alone.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn post_url(base_url: &str, slug: &str) -> String {
    format!(
        "{}/post/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(slug, COMPONENT)
    )
}

/// Renders posts, already in feed order, as an RSS 2.0 document.
pub fn generate_rss(
    posts: &[Post],
    site: &SiteMetadata,
    self_href: &str,
    max_items: Option<usize>,
    now: DateTime<Utc>,
) -> String {
    let base_url = site.base_url.trim_end_matches('/');

    let items: Vec<_> = posts
        .iter()
        .take(max_items.unwrap_or(usize::MAX))
        .map(|p| {
            let link = post_url(base_url, &p.slug);
            ItemBuilder::default()
                .title(Some(p.title.clone()))
                .link(Some(link.clone()))
                .guid(Some(GuidBuilder::default().value(link).permalink(true).build()))
                .pub_date(Some(to_rfc822(resolve_date(&p.date, now))))
                .description(Some(p.excerpt.clone()))
                .categories(vec![CategoryBuilder::default().name(p.category.clone()).build()])
                .build()
        })
        .collect();

    let mut self_link = Link::default();
    self_link.set_href(self_href);
    self_link.set_rel("self");
    self_link.set_mime_type(Some("application/rss+xml".to_string()));
    let mut atom = AtomExtension::default();
    atom.set_links(vec![self_link]);

    ChannelBuilder::default()
        .title(site.title.clone())
        .link(base_url.to_string())
        .description(site.description.clone())
        .language(Some(site.language.clone()))
        .last_build_date(Some(to_rfc822(now)))
        .atom_ext(Some(atom))
        .items(items)
        .build()
        .to_string()
}
