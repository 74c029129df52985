// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! The feed document built during a run, and its RSS 2.0 rendering.

pub mod normalize;
pub mod writer;

pub use normalize::{AnnouncementKey, AnnouncementRecord, RawRow};

use crate::site;

/// Channel-level metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMetadata {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}

impl Default for FeedMetadata {
    fn default() -> Self {
        Self {
            title: site::FEED_TITLE.to_string(),
            link: site::FEED_LINK.to_string(),
            description: site::FEED_DESCRIPTION.to_string(),
            language: site::FEED_LANGUAGE.to_string(),
        }
    }
}

/// Append-only list of announcements in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FeedDocument {
    pub metadata: FeedMetadata,
    items: Vec<AnnouncementRecord>,
}

impl FeedDocument {
    pub fn new(metadata: FeedMetadata) -> Self {
        Self {
            metadata,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, record: AnnouncementRecord) {
        self.items.push(record);
    }

    pub fn items(&self) -> &[AnnouncementRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pinned_count(&self) -> usize {
        self.items.iter().filter(|r| r.pinned).count()
    }
}
