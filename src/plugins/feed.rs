//! Syndication feed generation from content collections.

use chrono::{DateTime, Utc};
use rss::{ChannelBuilder, Guid, ItemBuilder};

use crate::plugins::Plugin;

/// Maximum number of items included in a feed.
pub const FEED_ITEM_LIMIT: usize = 50;

/// Channel-level feed metadata, resolved from the site settings.
#[derive(Debug, Clone)]
pub struct ChannelSettings {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: Option<String>,
}

/// One entry in a content collection the host wants syndicated.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    /// Absolute URL of the published page.
    pub url: String,
    pub summary: Option<String>,
    pub published: DateTime<Utc>,
}

/// Feed plugin. Registered without parameters; the host hands it channel
/// metadata and a collection when it wants a feed emitted.
pub struct FeedPlugin;

impl Default for FeedPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Serializes an RSS 2.0 feed, newest entries first, capped at
    /// [`FEED_ITEM_LIMIT`] items.
    pub fn render(&self, channel: &ChannelSettings, entries: &[FeedEntry]) -> String {
        let mut entries: Vec<&FeedEntry> = entries.iter().collect();
        entries.sort_by(|a, b| b.published.cmp(&a.published));
        entries.truncate(FEED_ITEM_LIMIT);

        let items: Vec<rss::Item> = entries
            .iter()
            .map(|entry| {
                ItemBuilder::default()
                    .title(Some(entry.title.clone()))
                    .link(Some(entry.url.clone()))
                    .description(entry.summary.clone())
                    .pub_date(Some(entry.published.to_rfc2822()))
                    .guid(Some(Guid {
                        value: entry.url.clone(),
                        permalink: true,
                    }))
                    .build()
            })
            .collect();

        ChannelBuilder::default()
            .title(channel.title.clone())
            .link(channel.link.clone())
            .description(channel.description.clone())
            .language(channel.language.clone())
            .items(items)
            .build()
            .to_string()
    }
}

impl Plugin for FeedPlugin {
    fn name(&self) -> &'static str {
        "feed"
    }
}
