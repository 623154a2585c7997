//! Client-side handle for asynchronous server jobs.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::{Result, SidearmError};
use crate::http::{segment, HttpClient, Params};
use crate::models::{JobCreated, JobData, JobStatus};

const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Polling config for [`Job::wait`].
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Total budget for the wait. Default: 2 min.
    pub timeout: Duration,
    /// Delay before each poll. Default: 2s.
    pub interval: Duration,
    /// Ends the wait early with [`SidearmError::Cancelled`] once cancelled.
    pub cancel: Option<CancellationToken>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
            cancel: None,
        }
    }
}

impl WaitOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Handle to one asynchronous Sidearm job.
///
/// The handle starts out assuming `queued`; only [`poll`](Self::poll) (directly
/// or through [`wait`](Self::wait)) replaces that with what the server reports.
/// Both take `&mut self`, so a single handle can never poll from two places at
/// once. Clone the handle if independent observers are needed.
///
/// ```no_run
/// use sidearm::{Client, ProtectOptions, ProtectionLevel, WaitOptions};
///
/// # async fn example() -> sidearm::Result<()> {
/// let client = Client::new("sk_live_abc123")?;
/// let mut job = client
///     .protect(&ProtectOptions {
///         media_url: Some("https://example.com/photo.jpg".into()),
///         level: Some(ProtectionLevel::Maximum),
///         ..Default::default()
///     })
///     .await?;
///
/// let data = job.wait(WaitOptions::default()).await?;
/// if data.is_failed() {
///     eprintln!("job failed: {:?}", data.error);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Job {
    id: String,
    status_url: Option<String>,
    http: HttpClient,
    latest: JobData,
}

impl Job {
    /// Wrap the response of a job-creating endpoint.
    ///
    /// Any status the creation response carried is ignored; the handle starts
    /// as `queued`.
    pub fn new(http: HttpClient, created: JobCreated) -> Self {
        Self {
            latest: JobData::queued(created.job_id.clone()),
            id: created.job_id,
            status_url: created.status_url,
            http,
        }
    }

    /// Resume tracking a job created earlier.
    pub fn from_id(http: HttpClient, id: impl Into<String>) -> Self {
        Self::new(
            http,
            JobCreated {
                job_id: id.into(),
                status_url: None,
            },
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Status URL reported at creation, if any.
    pub fn status_url(&self) -> Option<&str> {
        self.status_url.as_deref()
    }

    /// Most recently fetched job data.
    pub fn latest(&self) -> &JobData {
        &self.latest
    }

    pub fn status(&self) -> JobStatus {
        self.latest.status
    }

    /// Whether the last known state is terminal (completed or failed).
    pub fn is_done(&self) -> bool {
        self.latest.is_terminal()
    }

    /// Fetch the current job state, replacing the cached one.
    pub async fn poll(&mut self) -> Result<&JobData> {
        let path = format!("/api/v1/jobs/{}", segment(&self.id));
        self.latest = self.http.get_one(&path, Params::new()).await?;

        tracing::debug!(job_id = %self.id, status = %self.latest.status, "polled job");

        Ok(&self.latest)
    }

    /// Poll until the job completes or fails, then return its final state.
    ///
    /// Every poll is preceded by a full `interval` sleep, so the first
    /// refresh happens no sooner than one interval after the call. A poll is
    /// only issued if its tick falls within the deadline; otherwise the wait
    /// sleeps out the remaining budget and fails with
    /// [`SidearmError::Timeout`]. A job whose server status is `failed` is
    /// returned normally.
    ///
    /// The deadline is checked between polls, so a slow request can overrun
    /// it by its own duration. A timeout too large to add to the current
    /// instant, such as `Duration::MAX`, means no deadline.
    pub async fn wait(&mut self, opts: WaitOptions) -> Result<JobData> {
        let started = Instant::now();
        // `None` when the timeout does not fit in an `Instant`: no deadline.
        let deadline = started.checked_add(opts.timeout);
        let cancel = opts.cancel.unwrap_or_default();

        while !self.is_done() {
            let tick = Instant::now().checked_add(opts.interval);

            if let Some(deadline) = deadline {
                if tick.map_or(true, |t| t > deadline) {
                    if !self.sleep_until(Some(deadline), &cancel).await {
                        return Err(self.cancelled());
                    }
                    tracing::debug!(
                        job_id = %self.id,
                        status = %self.latest.status,
                        elapsed = ?started.elapsed(),
                        "job wait timed out"
                    );
                    return Err(SidearmError::Timeout {
                        job_id: self.id.clone(),
                        timeout: opts.timeout,
                        last_status: self.latest.status,
                    });
                }
            }

            if !self.sleep_until(tick, &cancel).await {
                return Err(self.cancelled());
            }
            self.poll().await?;
        }

        Ok(self.latest.clone())
    }

    /// `false` if the token fired first. With no instant, only the token can
    /// end the sleep.
    async fn sleep_until(&self, at: Option<Instant>, cancel: &CancellationToken) -> bool {
        let Some(at) = at else {
            cancel.cancelled().await;
            return false;
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep_until(at) => true,
        }
    }

    fn cancelled(&self) -> SidearmError {
        tracing::debug!(job_id = %self.id, status = %self.latest.status, "job wait cancelled");
        SidearmError::Cancelled {
            job_id: self.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> HttpClient {
        HttpClient::new("http://localhost".into(), "sk_test", reqwest::Client::new()).unwrap()
    }

    #[test]
    fn new_job_starts_queued() {
        let job = Job::new(
            http(),
            JobCreated {
                job_id: "j1".into(),
                status_url: Some("/api/v1/jobs/j1".into()),
            },
        );
        assert_eq!(job.id(), "j1");
        assert_eq!(job.status(), JobStatus::Queued);
        assert_eq!(job.latest().id, "j1");
        assert_eq!(job.status_url(), Some("/api/v1/jobs/j1"));
        assert!(!job.is_done());
    }

    #[test]
    fn resumed_job_starts_queued() {
        let job = Job::from_id(http(), "j2");
        assert_eq!(job.status(), JobStatus::Queued);
        assert!(job.status_url().is_none());
    }

    #[test]
    fn wait_defaults() {
        let opts = WaitOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(120));
        assert_eq!(opts.interval, Duration::from_secs(2));
        assert!(opts.cancel.is_none());
    }

    #[tokio::test]
    async fn wait_times_out_without_polling_when_budget_is_shorter_than_interval() {
        let mut job = Job::from_id(http(), "j3");
        let err = job
            .wait(
                WaitOptions::default()
                    .with_timeout(Duration::from_millis(20))
                    .with_interval(Duration::from_secs(10)),
            )
            .await
            .unwrap_err();

        match err {
            SidearmError::Timeout {
                job_id,
                timeout,
                last_status,
            } => {
                assert_eq!(job_id, "j3");
                assert_eq!(timeout, Duration::from_millis(20));
                assert_eq!(last_status, JobStatus::Queued);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_token_stops_wait() {
        let token = CancellationToken::new();
        token.cancel();

        let mut job = Job::from_id(http(), "j4");
        let err = job
            .wait(WaitOptions::default().with_cancellation(token))
            .await
            .unwrap_err();
        assert!(matches!(err, SidearmError::Cancelled { ref job_id } if job_id == "j4"));
    }
}
