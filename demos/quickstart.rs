//! Quick-start examples for the Sidearm Rust SDK.
//!
//! Run with:
//!   SIDEARM_API_KEY=sk_live_... cargo run --example quickstart
//!
//! Set `RUST_LOG=sidearm=debug` to see every request and poll.

use sidearm::{
    AlgorithmCategory, ClientBuilder, ListAlgorithmsOptions, PaginationOptions, ProtectOptions,
    ProtectionLevel, SidearmError, WaitOptions,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> sidearm::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // -----------------------------------------------------------------------
    // 1. Create a client (reads SIDEARM_API_KEY from environment)
    // -----------------------------------------------------------------------
    let client = ClientBuilder::new().build()?;

    // -----------------------------------------------------------------------
    // 2. Browse algorithms
    // -----------------------------------------------------------------------
    let algorithms = client
        .list_algorithms(&ListAlgorithmsOptions {
            category: Some(AlgorithmCategory::Open),
            media_type: None,
        })
        .await?;
    for algo in &algorithms {
        println!("  {} ({}) - {}", algo.id, algo.technique, algo.summary);
    }
    println!();

    // -----------------------------------------------------------------------
    // 3. Protect an image and wait for the job
    // -----------------------------------------------------------------------
    let mut job = client
        .protect(&ProtectOptions {
            media_url: Some("https://example.com/photo.jpg".into()),
            level: Some(ProtectionLevel::Maximum),
            tags: Some(vec!["quickstart".into()]),
            ..Default::default()
        })
        .await?;
    println!("Started job {}", job.id());

    let opts = WaitOptions::default()
        .with_timeout(Duration::from_secs(300))
        .with_interval(Duration::from_secs(3));

    match job.wait(opts).await {
        Ok(data) if data.is_failed() => {
            println!("Job failed: {}", data.error.unwrap_or_default());
        }
        Ok(data) => {
            println!("Job {} completed: {:?}", data.id, data.result);
        }
        Err(SidearmError::Timeout { last_status, .. }) => {
            println!("Still {last_status}; resume later with client.job(\"{}\")", job.id());
        }
        Err(e) => return Err(e),
    }
    println!();

    // -----------------------------------------------------------------------
    // 4. List media with pagination
    // -----------------------------------------------------------------------
    let mut cursor: Option<String> = None;
    loop {
        let page = client
            .list_media(&PaginationOptions {
                cursor: cursor.clone(),
                limit: Some(10),
            })
            .await?;

        for media in &page.data {
            println!("  {} | {} | {}", media.id, media.media_type, media.created_at);
        }

        if !page.has_more() {
            break;
        }
        cursor = page.cursor;
    }

    Ok(())
}
