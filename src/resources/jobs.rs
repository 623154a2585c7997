use serde_json::Value;

use crate::client::Client;
use crate::errors::Result;
use crate::http::{segment, Params};
use crate::job::Job;

impl Client {
    /// Get the current state of a job by ID, as the raw response body.
    ///
    /// Use [`job`](Self::job) for a typed handle that can poll and wait.
    pub async fn get_job(&self, id: &str) -> Result<Value> {
        self.http
            .get(&format!("/api/v1/jobs/{}", segment(id)), Params::new())
            .await
    }

    /// Create a [`Job`] handle from an existing job ID, to resume polling a
    /// previously created job. Makes no request.
    pub fn job(&self, id: impl Into<String>) -> Job {
        Job::from_id(self.http.clone(), id)
    }
}
