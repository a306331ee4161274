// cw_seeder/src/fetch.rs
// HTTP retrieval of the raw JSON feeds.

use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::error::{Result, SeederError};

/// Character handling applied to the response body before JSON parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default,)]
pub enum FeedEncoding {
    /// Body is parsed as-is.
    #[default]
    Default,
    /// UTF-8 with byte-order-mark tolerance. The mixed customer/sales feed
    /// is served with a BOM prefix that default decoding would hand to the
    /// JSON parser verbatim.
    Utf8Bom,
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Retrieve a feed and decode it into a JSON array of objects.
    ///
    /// Single-shot: transport failures and non-2xx responses surface
    /// immediately as `Fetch` errors, never retried.
    pub async fn fetch_array(&self, url: &str, encoding: FeedEncoding,) -> Result<Vec<Value,>,> {
        let response = self
            .client
            .get(url,)
            .send()
            .await
            .map_err(|e| SeederError::Fetch {
                url:     url.to_string(),
                message: e.to_string(),
            },)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeederError::Fetch {
                url:     url.to_string(),
                message: format!("unexpected status {}", status),
            },);
        }

        let body = response.bytes().await.map_err(|e| SeederError::Fetch {
            url:     url.to_string(),
            message: e.to_string(),
        },)?;

        let raw: &[u8] = body.as_ref();
        let bytes: &[u8] = match encoding {
            FeedEncoding::Default => raw,
            FeedEncoding::Utf8Bom => raw.strip_prefix(b"\xef\xbb\xbf",).unwrap_or(raw,),
        };

        let payload: Value = serde_json::from_slice(bytes,).map_err(|e| SeederError::Decode {
            url:     url.to_string(),
            message: e.to_string(),
        },)?;

        match payload {
            Value::Array(entries,) => {
                info!("Fetched {} entries from {}", entries.len(), url);
                Ok(entries,)
            },
            other => Err(SeederError::Decode {
                url:     url.to_string(),
                message: format!("expected a JSON array, got {}", kind_of(&other,)),
            },),
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_of(value: &Value,) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_,) => "a boolean",
        Value::Number(_,) => "a number",
        Value::String(_,) => "a string",
        Value::Array(_,) => "an array",
        Value::Object(_,) => "an object",
    }
}
