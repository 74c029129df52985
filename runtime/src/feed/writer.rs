// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! RSS 2.0 serialization of a [`FeedDocument`].

use super::{AnnouncementRecord, FeedDocument};
use crate::site;
use anyhow::{Context, Result};
use rss::extension::{Extension, ExtensionMap};
use rss::{Channel, ChannelBuilder, Item, ItemBuilder};
use std::collections::BTreeMap;
use std::path::Path;

/// Build the RSS channel for the whole document.
pub fn to_channel(feed: &FeedDocument) -> Channel {
    let items: Vec<Item> = feed.items().iter().map(to_item).collect();

    let mut namespaces = BTreeMap::new();
    namespaces.insert(
        site::FEED_NS_PREFIX.to_string(),
        site::FEED_NS_URI.to_string(),
    );

    ChannelBuilder::default()
        .title(feed.metadata.title.clone())
        .link(feed.metadata.link.clone())
        .description(feed.metadata.description.clone())
        .language(Some(feed.metadata.language.clone()))
        .namespaces(namespaces)
        .items(items)
        .build()
}

fn to_item(record: &AnnouncementRecord) -> Item {
    ItemBuilder::default()
        .title(Some(record.title.clone()))
        .link(Some(record.link.clone()))
        .description(Some(String::new()))
        .pub_date(Some(record.pub_date.to_rfc2822()))
        .extensions(pinned_extension(record.pinned))
        .build()
}

/// `<ldsh:pinned>true|false</ldsh:pinned>`
fn pinned_extension(pinned: bool) -> ExtensionMap {
    let mut ext = Extension::default();
    ext.set_name(format!("{}:pinned", site::FEED_NS_PREFIX));
    ext.set_value(Some(pinned.to_string()));

    let mut by_name = BTreeMap::new();
    by_name.insert("pinned".to_string(), vec![ext]);

    let mut map = ExtensionMap::new();
    map.insert(site::FEED_NS_PREFIX.to_string(), by_name);
    map
}

/// Render the feed as a UTF-8 XML document.
pub fn to_xml(feed: &FeedDocument) -> Result<String> {
    let bytes = to_channel(feed)
        .write_to(Vec::new())
        .context("failed to serialize RSS feed")?;
    String::from_utf8(bytes).context("RSS feed is not valid UTF-8")
}

/// Serialize the feed and write it to `path`, replacing any previous file.
pub fn write_to_path(feed: &FeedDocument, path: &Path) -> Result<()> {
    let xml = to_xml(feed)?;
    std::fs::write(path, xml)
        .with_context(|| format!("failed to write feed to {}", path.display()))
}
