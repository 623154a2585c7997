use std::time::Duration;

use crate::errors::{Result, SidearmError};
use crate::http::HttpClient;
use crate::job::Job;
use crate::models::{JobCreated, ProtectOptions, RunOptions};

const DEFAULT_BASE_URL: &str = "https://api.sdrm.io";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const API_KEY_ENV: &str = "SIDEARM_API_KEY";
const BASE_URL_ENV: &str = "SIDEARM_BASE_URL";

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use sidearm::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> sidearm::Result<()> {
/// let client = ClientBuilder::new()
///     .api_key("sk_live_abc123")
///     .base_url("https://staging.sdrm.io/")
///     .timeout(Duration::from_secs(120))
///     .build()?;
/// assert_eq!(client.http().base_url(), "https://staging.sdrm.io");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the base URL (defaults to `https://api.sdrm.io`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-request HTTP timeout (defaults to 60 seconds).
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = d;
        self
    }

    /// Build the [`Client`].
    ///
    /// Unset values fall back to the `SIDEARM_API_KEY` and `SIDEARM_BASE_URL`
    /// environment variables.
    ///
    /// Returns [`SidearmError::Config`] if no non-empty key is available or the
    /// base URL does not parse. No network access happens here.
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SidearmError::Config {
                message: "API key is required. Pass it to ClientBuilder::api_key() \
                          or set the SIDEARM_API_KEY environment variable. \
                          Get yours at https://sdrm.io/api-keys"
                    .into(),
            })?;

        let base_url = self
            .base_url
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        url::Url::parse(&base_url).map_err(|e| SidearmError::Config {
            message: format!("invalid base URL {base_url:?}: {e}"),
        })?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(SidearmError::Http)?;

        Ok(Client {
            http: HttpClient::new(base_url, &api_key, http)?,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The Sidearm API client.
///
/// Use [`Client::new`] for quick construction or [`ClientBuilder`] for full control.
/// Cloning is cheap; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use sidearm::{Client, RunOptions, WaitOptions};
///
/// # async fn example() -> sidearm::Result<()> {
/// let client = Client::new("sk_live_abc123")?;
///
/// let mut job = client
///     .run(&RunOptions {
///         algorithms: vec!["nightshade".into()],
///         media_url: Some("https://example.com/art.png".into()),
///         ..Default::default()
///     })
///     .await?;
/// let data = job.wait(WaitOptions::default()).await?;
/// println!("{} -> {}", data.id, data.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http: HttpClient,
}

impl Client {
    /// Create a new client with the given API key and default settings.
    ///
    /// Fails with [`SidearmError::Config`] when the key is empty. For
    /// customization, use [`ClientBuilder`] instead.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// The underlying transport, for endpoints this crate does not wrap.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Run one or more named algorithms on media.
    ///
    /// Returns a [`Job`] handle for polling the async result.
    pub async fn run(&self, opts: &RunOptions) -> Result<Job> {
        let created: JobCreated = self.http.post("/api/v1/run", Some(opts)).await?;
        Ok(Job::new(self.http.clone(), created))
    }

    /// Protect media with a curated preset level (standard or maximum).
    ///
    /// Returns a [`Job`] handle for polling the async result.
    pub async fn protect(&self, opts: &ProtectOptions) -> Result<Job> {
        let created: JobCreated = self.http.post_one("/api/v1/protect", Some(opts)).await?;
        Ok(Job::new(self.http.clone(), created))
    }
}
