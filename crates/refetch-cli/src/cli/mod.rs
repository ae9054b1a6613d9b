//! CLI for the refetch retrying HTTP client.

mod args;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use refetch_core::config;

use commands::{run_backoff, run_config, run_fetch, run_get, run_post};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "refetch")]
#[command(about = "refetch: resilient HTTP fetch and Freegle API client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a URL, retrying transient failures, and print the response.
    Fetch {
        /// HTTP/HTTPS URL to fetch.
        url: String,
        /// Request method.
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        /// Extra request header, as "Name: value". Repeatable.
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,
        /// Request body.
        #[arg(short = 'd', long)]
        data: Option<String>,
        /// Override the configured retry ceiling.
        #[arg(long, value_name = "N")]
        max_retries: Option<u32>,
        /// Print status line and headers as well as the body.
        #[arg(short = 'i', long)]
        include: bool,
    },

    /// GET an API path and print the JSON result.
    Get {
        /// API path, e.g. /message/123.
        path: String,
        /// Query parameter, as key=value. Repeatable.
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
        /// Use the v2 API instead of v1.
        #[arg(long)]
        v2: bool,
    },

    /// POST JSON to an API path and print the JSON result.
    Post {
        /// API path, e.g. /message.
        path: String,
        /// JSON request body (default: {}).
        #[arg(long)]
        json: Option<String>,
        /// Use the v2 API instead of v1.
        #[arg(long)]
        v2: bool,
    },

    /// Print the retry schedule for the active policy.
    Backoff,

    /// Show the config file path and effective settings.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                url,
                method,
                headers,
                data,
                max_retries,
                include,
            } => run_fetch(&cfg, &url, &method, &headers, data, max_retries, include).await?,
            CliCommand::Get { path, params, v2 } => run_get(&cfg, &path, &params, v2).await?,
            CliCommand::Post { path, json, v2 } => {
                run_post(&cfg, &path, json.as_deref(), v2).await?
            }
            CliCommand::Backoff => run_backoff(&cfg),
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}
