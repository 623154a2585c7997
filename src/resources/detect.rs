use serde_json::Value;

use crate::client::Client;
use crate::errors::Result;
use crate::job::Job;
use crate::models::{DetectAiOptions, DetectFingerprintOptions, DetectMembershipOptions, JobCreated};

impl Client {
    /// Detect whether media was AI-generated.
    ///
    /// Returns a [`Job`] handle for polling the async result.
    pub async fn detect_ai(&self, opts: &DetectAiOptions) -> Result<Job> {
        let created: JobCreated = self.http.post("/api/v1/detect/ai", Some(opts)).await?;
        Ok(Job::new(self.http.clone(), created))
    }

    /// Synchronous fingerprint detection against your indexed library.
    pub async fn detect_fingerprint(&self, opts: &DetectFingerprintOptions) -> Result<Value> {
        self.http.post("/api/v1/detect", Some(opts)).await
    }

    /// Membership inference: test whether content was used to train a model.
    ///
    /// Returns a [`Job`] handle for polling the async result.
    pub async fn detect_membership(&self, opts: &DetectMembershipOptions) -> Result<Job> {
        let created: JobCreated = self
            .http
            .post("/api/v1/detect/membership", Some(opts))
            .await?;
        Ok(Job::new(self.http.clone(), created))
    }
}
