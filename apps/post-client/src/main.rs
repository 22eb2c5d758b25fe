//! # post-client
//!
//! Small command-line companion for the Postboard API.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod fetch;
mod probe;

use fetch::{HttpPageSource, PageQuery};

const DEFAULT_POSTS_URL: &str = "http://127.0.0.1:5002/api/posts";

#[derive(Parser, Debug)]
#[command(name = "post-client", version, about = "Talk to a running Postboard API")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every post, one page at a time
    FetchAll {
        #[arg(long, default_value = DEFAULT_POSTS_URL)]
        base_url: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 5)]
        limit: u32,

        #[arg(long, default_value = "title")]
        sort: String,

        #[arg(long, default_value = "asc")]
        direction: String,
    },

    /// Send a burst of requests and report rate-limit answers
    ProbeRateLimit {
        #[arg(long, default_value = DEFAULT_POSTS_URL)]
        url: String,

        #[arg(long, default_value_t = 12)]
        requests: u32,

        /// Pause between requests
        #[arg(long, default_value_t = 5)]
        delay_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = reqwest::Client::new();

    match cli.command {
        Command::FetchAll {
            base_url,
            page,
            limit,
            sort,
            direction,
        } => {
            let source = HttpPageSource::new(client, base_url);
            let start = PageQuery {
                page,
                limit,
                sort: Some(sort),
                direction: Some(direction),
            };
            fetch::fetch_all(&source, start).await?;
        }
        Command::ProbeRateLimit {
            url,
            requests,
            delay_secs,
        } => {
            let summary =
                probe::probe_rate_limit(&client, &url, requests, Duration::from_secs(delay_secs))
                    .await?;
            println!(
                "\n{} succeeded, {} rate limited, {} other",
                summary.ok, summary.limited, summary.other
            );
        }
    }

    Ok(())
}
