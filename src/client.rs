//! Async client for the catalog API.
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! { "success": true, "message": null, "data": [ ... ] }
//! ```
//!
//! [`CatalogClient::fetch_collection`] sends one cache-bypassing `GET` and
//! unwraps the envelope. Failures are reported as a [`FetchError`] that keeps
//! transport problems, empty bodies, schema mismatches, and server-reported
//! failures apart so the caller can word its retry prompt accordingly. There is
//! no automatic retry: the caller re-invokes the fetch.
//!
//! Build the client once at startup and share it by reference (or `Arc`);
//! connection reuse is left to `reqwest`.

use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::types::{Arrangement, Collection, Feather, PaintingRecord, Spirit};

/// Fallback text when the server reports failure without a message.
const UNKNOWN_API_ERROR: &str = "Unknown error";

/// Errors from fetching a collection.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// `{api_base}{endpoint}` is not a valid URL.
    #[error("invalid endpoint URL `{0}`")]
    InvalidEndpointUrl(String),

    /// Connection, DNS, TLS, or body transfer failed.
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-2xx response whose body is not an envelope.
    #[error("server returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    /// The server answered with no body at all.
    #[error("server returned an empty response body")]
    EmptyResponseBody,

    /// The body did not match the expected schema. `context` names the part
    /// that failed, e.g. `envelope` or `data[3]`.
    #[error("could not decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The envelope carried `success: false`.
    #[error("{0}")]
    Api(String),
}

impl FetchError {
    fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        FetchError::Decode {
            context: context.into(),
            source,
        }
    }
}

/// The `{success, message, data}` wrapper shared by all API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Left untyped so each record can be decoded on its own.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    api_base: String,
}

impl CatalogClient {
    /// Create a client that asks intermediaries not to serve cached copies.
    pub fn new(api: &ApiConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Network)?;
        Ok(Self::with_client(http, api.base_url.clone()))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, api_base: String) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// `GET {api_base}{endpoint}` and decode `data` as a list of `T`.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Vec<T>, FetchError> {
        let raw = format!("{}{}", self.api_base, endpoint);
        let url = Url::parse(&raw).map_err(|_| FetchError::InvalidEndpointUrl(raw.clone()))?;

        tracing::debug!(%url, "Fetching collection");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(FetchError::Network)?;
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "Response received");

        decode_collection(status, &body).inspect_err(|e| {
            tracing::warn!(%url, error = %e, "Collection fetch failed");
        })
    }

    pub async fn fetch_feathers(&self) -> Result<Vec<Feather>, FetchError> {
        self.fetch_collection(Collection::Feathers.endpoint()).await
    }

    pub async fn fetch_arrangements(&self) -> Result<Vec<Arrangement>, FetchError> {
        self.fetch_collection(Collection::Arrangements.endpoint())
            .await
    }

    pub async fn fetch_spirits(&self) -> Result<Vec<Spirit>, FetchError> {
        self.fetch_collection(Collection::Spirits.endpoint()).await
    }

    /// Fetch any collection as unified records.
    pub async fn fetch(&self, collection: Collection) -> Result<Vec<PaintingRecord>, FetchError> {
        Ok(match collection {
            Collection::Feathers => into_records(self.fetch_feathers().await?),
            Collection::Arrangements => into_records(self.fetch_arrangements().await?),
            Collection::Spirits => into_records(self.fetch_spirits().await?),
        })
    }
}

fn into_records<T: Into<PaintingRecord>>(items: Vec<T>) -> Vec<PaintingRecord> {
    items.into_iter().map(Into::into).collect()
}

/// Turn a raw response into records.
///
/// - empty (or whitespace-only) body → [`FetchError::EmptyResponseBody`]
/// - envelope with `success: false` → [`FetchError::Api`], whatever the status
/// - non-2xx without an envelope → [`FetchError::HttpStatus`]
/// - anything else that doesn't match the schema → [`FetchError::Decode`]
///
/// Records are decoded one at a time so a schema error names its index.
pub fn decode_collection<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<Vec<T>, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::EmptyResponseBody);
    }

    let envelope: Envelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(body).into_owned(),
            });
        }
        Err(e) => return Err(FetchError::decode("envelope", e)),
    };

    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());
        return Err(FetchError::Api(message));
    }

    let items = match envelope.data {
        Some(serde_json::Value::Array(items)) => items,
        Some(other) => {
            return Err(FetchError::decode(
                "data",
                serde::de::Error::custom(format!("expected an array, found {}", kind(&other))),
            ));
        }
        None => {
            return Err(FetchError::decode(
                "data",
                serde::de::Error::missing_field("data"),
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).map_err(|e| FetchError::decode(format!("data[{i}]"), e))
        })
        .collect()
}

fn kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
