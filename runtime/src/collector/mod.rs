// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! Scroll-driven collection of announcements.
//!
//! The announcement list loads more rows as the page is scrolled, with no
//! signal when loading is done. Each cycle scrolls to the bottom, lets the
//! page settle, re-reads every row of every announcement table, and folds
//! rows not seen before into the feed. The whole table is re-read each time,
//! so the seen set is the only thing keeping items unique.

pub mod rows;

use crate::feed::normalize::{self, AnnouncementKey};
use crate::feed::FeedDocument;
use crate::renderer::RenderContext;
use crate::site;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Identities already turned into feed items. Only ever grows.
#[derive(Debug, Default)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`; returns false if it was already present.
    pub fn insert(&mut self, key: &AnnouncementKey) -> bool {
        self.ids.insert(key.identity())
    }

    pub fn contains(&self, key: &AnnouncementKey) -> bool {
        self.ids.contains(&key.identity())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// When the scroll loop ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPolicy {
    /// Always run `max_scrolls` cycles, even once nothing new turns up.
    FixedIterations,
    /// Stop after `idle_cycles` consecutive cycles with no new items.
    /// `max_scrolls` still caps the loop.
    UntilIdle { idle_cycles: u32 },
}

/// How to wait for lazily loaded rows after a scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Sleep a fixed amount.
    Fixed(Duration),
    /// Re-read the page every `poll` until two consecutive reads have the same
    /// row count, giving up (without error) after `timeout`.
    RowCountStable { poll: Duration, timeout: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollConfig {
    pub max_scrolls: u32,
    pub settle: Settle,
    pub stop: StopPolicy,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            max_scrolls: site::MAX_SCROLLS,
            settle: Settle::Fixed(site::SETTLE_DELAY),
            stop: StopPolicy::FixedIterations,
        }
    }
}

/// Outcome of one scroll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollReport {
    /// 1-based cycle number.
    pub iteration: u32,
    /// Items added to the feed during this cycle.
    pub new_items: usize,
    /// Size of the seen set after this cycle.
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectOutcome {
    pub reports: Vec<ScrollReport>,
    /// True when the stop policy ended the loop before `max_scrolls`.
    pub stopped_early: bool,
}

impl CollectOutcome {
    pub fn iterations(&self) -> u32 {
        self.reports.len() as u32
    }
}

/// Drive the scroll loop on an already-navigated page.
///
/// Row-level problems are logged and skipped. Any failure talking to the
/// page (scroll script, content read) aborts the collection.
pub async fn collect(
    ctx: &dyn RenderContext,
    config: &ScrollConfig,
    seen: &mut SeenSet,
    feed: &mut FeedDocument,
) -> Result<CollectOutcome> {
    let mut outcome = CollectOutcome::default();
    let mut idle_cycles = 0;

    for iteration in 1..=config.max_scrolls {
        let height = ctx
            .execute_js(site::SCROLL_SCRIPT)
            .await
            .with_context(|| format!("scroll {iteration}: scroll script failed"))?;
        debug!("scroll {iteration}: page height {height}");

        let html = settle(ctx, &config.settle)
            .await
            .with_context(|| format!("scroll {iteration}: failed to read page content"))?;

        let new_items = absorb_snapshot(&html, seen, feed);
        info!(
            "Scroll {iteration}: Found {new_items} new announcements, total: {}",
            seen.len()
        );
        outcome.reports.push(ScrollReport {
            iteration,
            new_items,
            total: seen.len(),
        });

        if let StopPolicy::UntilIdle { idle_cycles: limit } = config.stop {
            idle_cycles = if new_items == 0 { idle_cycles + 1 } else { 0 };
            if idle_cycles >= limit && iteration < config.max_scrolls {
                info!("no new announcements for {idle_cycles} scrolls, stopping");
                outcome.stopped_early = true;
                break;
            }
        }
    }

    Ok(outcome)
}

/// Wait per `mode`, then return the page content to process.
async fn settle(ctx: &dyn RenderContext, mode: &Settle) -> Result<String> {
    match *mode {
        Settle::Fixed(delay) => {
            tokio::time::sleep(delay).await;
            ctx.get_html().await
        }
        Settle::RowCountStable { poll, timeout } => {
            let deadline = Instant::now() + timeout;
            let mut html = ctx.get_html().await?;
            let mut count = rows::count_rows(&html);
            loop {
                tokio::time::sleep(poll).await;
                let next = ctx.get_html().await?;
                let next_count = rows::count_rows(&next);
                html = next;
                if next_count == count {
                    return Ok(html);
                }
                if Instant::now() >= deadline {
                    warn!("row count still changing after {timeout:?} ({count} -> {next_count})");
                    return Ok(html);
                }
                count = next_count;
            }
        }
    }
}

/// Fold one page snapshot into the seen set and feed. Returns the number of
/// new items appended.
pub fn absorb_snapshot(html: &str, seen: &mut SeenSet, feed: &mut FeedDocument) -> usize {
    let mut new_items = 0;
    for row in rows::extract_rows(html) {
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error processing announcement: {e}");
                continue;
            }
        };

        let key = AnnouncementKey::of(&raw);
        if !seen.insert(&key) {
            continue;
        }

        let record = normalize::into_record(key, &raw, normalize::site_now());
        if record.date_fallback {
            debug!(
                "unparseable date {:?} for {:?}, using current time",
                raw.date_text.trim(),
                record.title
            );
        }
        feed.push(record);
        new_items += 1;
    }
    new_items
}
