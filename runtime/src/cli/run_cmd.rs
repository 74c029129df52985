// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! `ldsh-feed run`: scrape the announcement list and write the feed.

use crate::cli::output;
use crate::collector::{Settle, StopPolicy};
use crate::pipeline::{self, RunConfig};
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::Renderer;
use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

/// Consecutive empty scrolls that end the loop under `--stop-when-idle`.
const IDLE_CYCLES: u32 = 2;

/// Row-count polling under `--settle-on-row-count`.
const ROW_COUNT_POLL: Duration = Duration::from_millis(500);
const ROW_COUNT_TIMEOUT: Duration = Duration::from_secs(10);

/// Options that change how the scroll loop behaves. Target, scroll cap and
/// selectors are fixed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub stop_when_idle: bool,
    pub settle_on_row_count: bool,
}

impl RunOptions {
    pub fn to_config(self) -> RunConfig {
        let mut config = RunConfig::default();
        if self.stop_when_idle {
            config.scroll.stop = StopPolicy::UntilIdle {
                idle_cycles: IDLE_CYCLES,
            };
        }
        if self.settle_on_row_count {
            config.scroll.settle = Settle::RowCountStable {
                poll: ROW_COUNT_POLL,
                timeout: ROW_COUNT_TIMEOUT,
            };
        }
        config
    }
}

pub async fn run(options: RunOptions) -> Result<()> {
    let config = options.to_config();

    let renderer = ChromiumRenderer::new().await?;
    let result = pipeline::run(&renderer, &config).await;
    if let Err(e) = renderer.shutdown().await {
        warn!("browser shutdown failed: {e:#}");
    }
    let summary = result?;

    info!(
        "Successfully processed {} announcements in total",
        summary.total
    );

    if output::is_json() {
        output::print_json(&serde_json::to_value(&summary)?);
    }

    Ok(())
}
