// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export recent COROS activities to the dashboard snapshot file.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use training_dashboard::config::{ConfigError, CorosConfig, DEFAULT_DATA_PATH};
use training_dashboard::services::{parse_token_file, CorosAuth, CorosClient};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch COROS activities into the dashboard snapshot")]
struct Args {
    /// COROS access token
    #[arg(long)]
    token: Option<String>,

    /// Browser cookie export (JSON list of {name, value}) holding CPL-coros-token
    #[arg(long)]
    cookies: Option<PathBuf>,

    /// File holding the token on its first non-comment line
    #[arg(long, default_value = "token.txt")]
    token_file: PathBuf,

    /// Number of pages to fetch (20 activities each)
    #[arg(long, default_value_t = 3)]
    pages: u32,

    /// Output JSON file
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = CorosConfig::from_env();

    let auth = resolve_auth(&args, &config).await?;
    let client = CorosClient::new(config.api_url.as_str());

    tracing::info!(pages = args.pages, api = %config.api_url, "Fetching COROS activities");
    let records = match client.fetch_recent(&auth, args.pages).await {
        Ok(records) => records,
        Err(e) if e.is_coros_token_error() => {
            tracing::error!(error = %e, "COROS credentials rejected; log in again to refresh them");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if records.is_empty() {
        anyhow::bail!("No activities fetched");
    }

    write_snapshot(&args.output, &records).await?;
    tracing::info!(
        count = records.len(),
        output = %args.output.display(),
        "Activity snapshot written"
    );
    Ok(())
}

/// `--token`, then `--cookies`, then `COROS_TOKEN`, then the token file.
async fn resolve_auth(args: &Args, config: &CorosConfig) -> anyhow::Result<CorosAuth> {
    if let Some(token) = &args.token {
        return Ok(CorosAuth::from_token(token.trim()));
    }

    if let Some(path) = &args.cookies {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read cookies file {}", path.display()))?;
        return Ok(CorosAuth::from_cookies_json(&json)?);
    }

    if let Some(token) = &config.token {
        return Ok(CorosAuth::from_token(token.as_str()));
    }

    let contents = tokio::fs::read_to_string(&args.token_file)
        .await
        .with_context(|| format!("Failed to read token file {}", args.token_file.display()))?;
    parse_token_file(&contents)
        .map(CorosAuth::from_token)
        .ok_or_else(|| ConfigError::Missing("COROS_TOKEN").into())
}

async fn write_snapshot<T: serde::Serialize>(path: &Path, records: &T) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(records)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
