//! userdex CLI - fetch a page of users, group them, and print the result.
//!
//! Usage: `userdex [page] [nat|alpha] [filter-term]`
//!
//! Thin glue only: all behavior lives in the library crate.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use userdex::models::GroupBy;
use userdex::{ApiClient, Config, PageCache, UserService, WorkerHandle};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let page: u32 = args.get(1).map_or(Ok(1), |s| s.parse())?;
    let group_by = match args.get(2).map(String::as_str) {
        Some("alpha") => GroupBy::Alphabetic,
        _ => GroupBy::Nationality,
    };
    let filter_term = args.get(3).cloned().unwrap_or_default();

    let config = Config::load()?;
    info!(page, %group_by, "userdex starting");

    let mut cache = PageCache::new(config.cache_dir());
    let loaded = cache.load_from_disk();
    if loaded > 0 {
        info!(pages = loaded, "restored cached pages from disk");
    }

    let client = ApiClient::new(&config.api_url, &config.seed, config.results_per_page)?;
    let service = UserService::new(client, cache, WorkerHandle::spawn());

    let count = service.load_page(page).await?;
    let result = service.process_users(group_by, &filter_term).await;

    println!(
        "page {}: {} records, {} shown, {} groups (cached pages: {:?})",
        page,
        count,
        result.all_users.len(),
        result.groups.len(),
        service.loaded_pages().await,
    );
    for group in &result.groups {
        let sample: Vec<String> = group
            .users
            .iter()
            .take(3)
            .map(|u| format!("{} {}", u.firstname, u.lastname))
            .collect();
        println!(
            "  {:<8} {:>5}  {}{}",
            group.title,
            group.users.len(),
            sample.join(", "),
            if group.users.len() > 3 { ", ..." } else { "" },
        );
    }

    Ok(())
}
