use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Shared enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Gif,
    Text,
    Pdf,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Gif => "gif",
            MediaType::Text => "text",
            MediaType::Pdf => "pdf",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmCategory {
    Open,
    Proprietary,
}

impl fmt::Display for AlgorithmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlgorithmCategory::Open => "open",
            AlgorithmCategory::Proprietary => "proprietary",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionLevel {
    Standard,
    Maximum,
}

/// Search and fingerprint-detection tiers, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTier {
    Exact,
    Quick,
    Perceptual,
    Compositional,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipMethod {
    Pattern,
    Statistical,
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedMode {
    Register,
    Basic,
    Advanced,
    Radioactive,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// Lifecycle of a server-side job: `queued -> running -> completed | failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// `completed` or `failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    MediaIngest,
    AiDetect,
    MembershipInference,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JobProgress {
    pub completed: u64,
    pub total: u64,
}

/// Server-side state of a job as returned by `GET /api/v1/jobs/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JobData {
    pub id: String,
    #[serde(default, rename = "type")]
    pub job_type: Option<JobType>,
    pub status: JobStatus,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub progress: Option<JobProgress>,
    /// Present once the job has completed.
    #[serde(default)]
    pub result: Option<Map<String, Value>>,
    /// Present when the job has failed.
    #[serde(default)]
    pub error: Option<String>,
    /// ISO 8601.
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO 8601.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl JobData {
    /// State assumed for a job that has not been polled yet.
    pub fn queued(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            job_type: None,
            status: JobStatus::Queued,
            preset: None,
            progress: None,
            result: None,
            error: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.status == JobStatus::Failed
    }
}

/// Returned by endpoints that start asynchronous work.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JobCreated {
    pub job_id: String,
    #[serde(default)]
    pub status_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Algorithm {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub category: AlgorithmCategory,
    pub media_types: Vec<MediaType>,
    pub technique: String,
    pub gpu_required: bool,
    #[serde(default)]
    pub paper_url: Option<String>,
    #[serde(default)]
    pub runnable: Option<bool>,
    /// Concrete algorithms a preset alias expands to.
    #[serde(default)]
    pub resolves_to: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    Active,
    Processing,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Media {
    pub id: String,
    pub account_id: String,
    pub media_type: MediaType,
    pub status: MediaStatus,
    #[serde(default)]
    pub manifest: Option<String>,
    #[serde(default)]
    pub storage_url: Option<String>,
    #[serde(default)]
    pub original_storage_key: Option<String>,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub algorithms_applied: Vec<String>,
    /// ISO 8601.
    #[serde(default)]
    pub deletes_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    /// ISO 8601.
    pub created_at: String,
    /// ISO 8601.
    pub updated_at: String,
}

/// Rights and licensing metadata for a media asset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Rights {
    pub media_id: String,
    #[serde(default)]
    pub c2pa: Option<Map<String, Value>>,
    #[serde(default)]
    pub schema_org: Option<Map<String, Value>>,
    #[serde(default)]
    pub iptc: Option<Map<String, Value>>,
    #[serde(default)]
    pub tdm: Option<Map<String, Value>>,
    #[serde(default)]
    pub rsl: Option<Map<String, Value>>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub credits: Option<f64>,
    pub created_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingResponse {
    pub events: Vec<BillingEvent>,
    /// Link to the customer billing portal.
    #[serde(default)]
    pub portal_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult {
    pub media_id: String,
    pub score: f64,
    pub tier: String,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Pass back as `cursor` for the next page. `None` means no more results.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl<T> Page<T> {
    /// `true` if `cursor` is `Some`.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }
}

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ListAlgorithmsOptions {
    pub category: Option<AlgorithmCategory>,
    pub media_type: Option<MediaType>,
}

#[derive(Debug, Clone, Default)]
pub struct PaginationOptions {
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}

/// Media to operate on: exactly one of `media_url`, `media` (base64) or
/// `text` is expected by the API.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunOptions {
    pub algorithms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c2pa_wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProtectOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ProtectionLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// `tags` is sent as `scope.tags`; `limit` goes in the query string.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub media_url: Option<String>,
    pub media: Option<String>,
    pub tier: Option<SearchTier>,
    pub tags: Option<Vec<String>>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectAiOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectFingerprintOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<SearchTier>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectMembershipOptions {
    pub content_ids: Vec<String>,
    pub suspect_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<MembershipMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterMediaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<EmbedMode>,
    /// ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateMediaOptions {
    pub original_media_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct GetBillingOptions {
    /// ISO 8601 date.
    pub start_date: Option<String>,
    /// ISO 8601 date.
    pub end_date: Option<String>,
    pub event_type: Option<String>,
    /// Comma-separated tag filter.
    pub tags: Option<String>,
}

// ---------------------------------------------------------------------------
// Internal deserialization helpers (not part of the public API surface)
// ---------------------------------------------------------------------------

/// `{ "data": T }`
#[derive(Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// `{ "data": [T], "meta": { "next_cursor": ... } }`
#[derive(Deserialize)]
pub(crate) struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

#[derive(Deserialize)]
pub(crate) struct ListMeta {
    #[serde(default)]
    pub next_cursor: Option<String>,
}
