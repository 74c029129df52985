// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};
use ldsh_feed::cli::{self, run_cmd::RunOptions};
use ldsh_feed::logging::{self, Verbosity};
use tracing::error;

#[derive(Parser)]
#[command(
    name = "ldsh-feed",
    about = "ldsh-feed: LDSH announcements as an RSS feed",
    version,
    after_help = "Run 'ldsh-feed <command> --help' for details on each command.\nRun 'ldsh-feed' with no command to scrape once and write ldsh_announcements.xml."
)]
struct Cli {
    /// Output logs and results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the announcement list and write the RSS feed (default)
    Run {
        /// Stop scrolling after two consecutive scrolls find nothing new
        #[arg(long)]
        stop_when_idle: bool,
        /// Wait for the row count to stop changing instead of a fixed delay
        #[arg(long)]
        settle_on_row_count: bool,
    },
    /// Check environment and diagnose issues
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("LDSH_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("LDSH_QUIET", "1");
    }

    logging::init(Verbosity::from_flags(cli.quiet, cli.verbose), cli.json)?;

    let result = match cli.command {
        None => cli::run_cmd::run(RunOptions::default()).await,
        Some(Commands::Run {
            stop_when_idle,
            settle_on_row_count,
        }) => {
            cli::run_cmd::run(RunOptions {
                stop_when_idle,
                settle_on_row_count,
            })
            .await
        }
        Some(Commands::Doctor) => cli::doctor::run().await,
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        error!("Script failed: {e:#}");
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
