// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! One complete scrape: navigate, collect, write the feed.

use crate::collector::{self, CollectOutcome, ScrollConfig, SeenSet};
use crate::feed::{writer, FeedDocument, FeedMetadata};
use crate::renderer::{RenderContext, Renderer};
use crate::site;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Inputs of a run. `Default` is the production setup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub output_path: PathBuf,
    pub page_timeout_ms: u64,
    pub scroll: ScrollConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            url: site::LIST_URL.to_string(),
            output_path: PathBuf::from(site::OUTPUT_FILE),
            page_timeout_ms: site::PAGE_TIMEOUT_MS,
            scroll: ScrollConfig::default(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Unique announcements written to the feed.
    pub total: usize,
    pub pinned: usize,
    pub iterations: u32,
    pub stopped_early: bool,
    pub output_path: PathBuf,
}

/// Scrape the announcement list and write the feed file.
///
/// The seen set and feed document live only for this call, so a run can be
/// repeated in-process without leftovers from the previous one.
pub async fn run(renderer: &dyn Renderer, config: &RunConfig) -> Result<RunSummary> {
    info!("Starting to scrape announcements");

    let mut ctx = renderer
        .new_context()
        .await
        .context("failed to open browser page")?;

    let scraped = scrape(ctx.as_mut(), config).await;

    if let Err(e) = ctx.close().await {
        warn!("failed to close browser page: {e:#}");
    }

    let (feed, outcome) = scraped?;

    info!("Writing RSS feed to file");
    writer::write_to_path(&feed, &config.output_path)?;

    Ok(RunSummary {
        total: feed.len(),
        pinned: feed.pinned_count(),
        iterations: outcome.iterations(),
        stopped_early: outcome.stopped_early,
        output_path: config.output_path.clone(),
    })
}

async fn scrape(
    ctx: &mut dyn RenderContext,
    config: &RunConfig,
) -> Result<(FeedDocument, CollectOutcome)> {
    let nav = ctx
        .navigate(&config.url, config.page_timeout_ms)
        .await
        .with_context(|| format!("failed to load {}", config.url))?;
    info!("loaded {} in {}ms", nav.final_url, nav.load_time_ms);

    ctx.wait_for_selector(site::TABLE_SELECTOR, config.page_timeout_ms)
        .await
        .context("announcement table never appeared")?;

    let mut seen = SeenSet::new();
    let mut feed = FeedDocument::new(FeedMetadata::default());
    let outcome = collector::collect(&*ctx, &config.scroll, &mut seen, &mut feed).await?;

    Ok((feed, outcome))
}
