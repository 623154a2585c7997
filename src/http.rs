//! Transport core shared by every endpoint.
//!
//! Every call goes through [`HttpClient::execute`], which joins the base URL
//! and path, appends query parameters, attaches the bearer token and
//! `Accept: application/json`, and classifies the response. The typed verbs
//! and the envelope-unwrapping helpers (`*_one`, [`get_list`](HttpClient::get_list))
//! are thin layers over it.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::errors::{Result, SidearmError};
use crate::models::{Envelope, ListEnvelope, Page};

/// HTTP verbs used by the Sidearm API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters, kept in insertion order.
///
/// Values are rendered with `Display`; [`set_opt`](Self::set_opt) drops absent ones:
///
/// ```
/// use sidearm::Params;
///
/// let params = Params::new()
///     .set("limit", 10)
///     .set_opt("cursor", None::<&str>);
/// assert_eq!(params.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.pairs.push((name.into(), value.to_string()));
        self
    }

    /// Add `name=value`, or nothing when `value` is `None`.
    pub fn set_opt<V: fmt::Display>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A single API call described as data; consumed by [`HttpClient::execute`].
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Params,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Attach a JSON body. Ignored for `GET`.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

struct Inner {
    base_url: String,
    auth: HeaderValue,
    http: reqwest::Client,
}

/// Authenticated transport to the Sidearm API.
///
/// Holds only immutable configuration, so clones are cheap and can be shared
/// freely between tasks and [`Job`](crate::Job) handles.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<Inner>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub(crate) fn new(base_url: String, api_key: &str, http: reqwest::Client) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))?;
        auth.set_sensitive(true);

        Ok(Self {
            inner: Arc::new(Inner {
                base_url,
                auth,
                http,
            }),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str, params: &Params) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.inner.base_url, path)).map_err(|e| {
            SidearmError::Config {
                message: format!("invalid request URL {}{path}: {e}", self.inner.base_url),
            }
        })?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }

    /// Send a request and decode the response.
    ///
    /// A 2xx JSON body is returned as parsed; a 2xx body that is not JSON comes
    /// back as [`Value::String`] holding the raw text. Anything else becomes
    /// [`SidearmError::Api`].
    pub async fn execute(&self, request: Request) -> Result<Value> {
        let Request {
            method,
            path,
            params,
            body,
        } = request;
        let url = self.url(&path, &params)?;

        tracing::debug!(%method, %url, "sending request");

        let mut req = self
            .inner
            .http
            .request(method.to_reqwest(), url)
            .header(AUTHORIZATION, self.inner.auth.clone())
            .header(ACCEPT, "application/json");

        if let Some(ref b) = body {
            if method != Method::Get {
                req = req.header(CONTENT_TYPE, "application/json").json(b);
            }
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!(%method, path = %path, status, "received response");

        decode_response(status, text).inspect_err(|e| {
            if let SidearmError::Api { status, message, .. } = e {
                tracing::warn!(%method, path = %path, status, message = %message, "API request failed");
            }
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        let value = self.execute(Request::get(path).params(params)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `POST` with an optional JSON body. Pass `None::<&()>` for no body.
    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = Request::post(path);
        if let Some(b) = body {
            request = request.json(serde_json::to_value(b)?);
        }
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = Request::patch(path).json(serde_json::to_value(body)?);
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.execute(Request::delete(path)).await?;
        Ok(serde_json::from_value(value)?)
    }

    // -----------------------------------------------------------------------
    // Envelope unwrapping
    // -----------------------------------------------------------------------

    /// `GET` a `{ data: T }` envelope and return `T`.
    pub async fn get_one<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        let envelope: Envelope<T> = self.get(path, params).await?;
        Ok(envelope.data)
    }

    /// `GET` a `{ data: [T], meta: { next_cursor } }` envelope.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<Page<T>> {
        let envelope: ListEnvelope<T> = self.get(path, params).await?;
        Ok(Page {
            data: envelope.data,
            cursor: envelope.meta.and_then(|m| m.next_cursor),
        })
    }

    pub async fn post_one<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let envelope: Envelope<T> = self.post(path, body).await?;
        Ok(envelope.data)
    }

    pub async fn patch_one<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let envelope: Envelope<T> = self.patch(path, body).await?;
        Ok(envelope.data)
    }

    pub async fn delete_one<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let envelope: Envelope<T> = self.delete(path).await?;
        Ok(envelope.data)
    }
}

/// Percent-encode a caller-supplied path segment such as a resource id.
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

fn decode_response(status: u16, text: String) -> Result<Value> {
    let success = (200..300).contains(&status);

    match serde_json::from_str::<Value>(&text) {
        Ok(json) if success => Ok(json),
        Ok(json) => Err(SidearmError::Api {
            status,
            message: error_message(&json).unwrap_or(text),
            body: Some(json),
        }),
        Err(_) if success => Ok(Value::String(text)),
        Err(_) => Err(SidearmError::Api {
            status,
            message: text,
            body: None,
        }),
    }
}

/// `message`, then `error`, skipping fields that are absent or null.
fn error_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(key))
        .find(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}
