//! # Sidearm SDK for Rust
//!
//! Async client for the [Sidearm](https://sdrm.io) media protection and
//! detection API. Protect media with watermarking algorithms, detect
//! AI-generated content, search your library, and track the resulting
//! asynchronous jobs to completion.
//!
//! ## Quick start
//!
//! ```no_run
//! use sidearm::{Client, ProtectOptions, ProtectionLevel, WaitOptions};
//!
//! #[tokio::main]
//! async fn main() -> sidearm::Result<()> {
//!     let client = Client::new("sk_live_your_api_key")?;
//!
//!     let mut job = client
//!         .protect(&ProtectOptions {
//!             media_url: Some("https://example.com/photo.jpg".into()),
//!             level: Some(ProtectionLevel::Maximum),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     let data = job.wait(WaitOptions::default()).await?;
//!     println!("job {} finished: {}", data.id, data.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every call returns [`Result`]. Non-2xx responses surface as
//! [`SidearmError::Api`] with the HTTP status, a message and the parsed body;
//! [`Job::wait`] reports [`SidearmError::Timeout`] when the deadline passes.
//! A job the server marks `failed` is not an error: inspect
//! [`JobData::status`] and [`JobData::error`].
//!
//! ## Logging
//!
//! Requests, responses and job polls are reported as `tracing` events at
//! `debug` level, failed API calls at `warn`. Install a subscriber to see them.

mod client;
mod errors;
mod http;
mod job;
mod models;
mod resources;

pub use client::{Client, ClientBuilder};
pub use errors::{Result, SidearmError};
pub use http::{HttpClient, Method, Params, Request};
pub use job::{Job, WaitOptions};
pub use models::{
    Algorithm, AlgorithmCategory, BillingEvent, BillingResponse, DetectAiOptions,
    DetectFingerprintOptions, DetectMembershipOptions, EmbedMode, GetBillingOptions, JobCreated,
    JobData, JobProgress, JobStatus, JobType, ListAlgorithmsOptions, Media, MediaStatus,
    MediaType, MembershipMethod, Page, PaginationOptions, ProtectOptions, ProtectionLevel,
    RegisterMediaOptions, Rights, RunOptions, SearchOptions, SearchResponse, SearchResult,
    SearchTier, UpdateMediaOptions,
};
pub use tokio_util::sync::CancellationToken;
