// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! Log setup: timestamped lines on stdout, or JSON lines with `--json`.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Verbosity selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (_, true) => Verbosity::Verbose,
            (true, false) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "ldsh_feed=warn",
            Verbosity::Normal => "ldsh_feed=info",
            Verbosity::Verbose => "ldsh_feed=debug",
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` adds further directives.
pub fn init(verbosity: Verbosity, json: bool) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(
        verbosity
            .directive()
            .parse()
            .context("invalid log directive")?,
    );

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
