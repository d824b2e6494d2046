//! The `{ success, data, message }` envelope the catalog API wraps responses in.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use emistore_commerce::CommerceError;

use crate::error::FetchError;

/// Response envelope.
///
/// `data` is kept as raw JSON until the envelope reports success.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiEnvelope {
    pub fn from_slice(body: &[u8]) -> Result<Self, FetchError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Failure reason; `message` wins over `error`.
    pub fn failure_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.trim().is_empty())
    }

    /// The `data` payload of a successful envelope.
    pub fn into_data(self) -> Result<Value, FetchError> {
        self.data
            .filter(|v| !v.is_null())
            .ok_or_else(|| FetchError::Parse("response envelope has no data".to_string()))
    }
}

/// Decode `value` as `T`, reporting shape errors as malformed data for `slug`.
pub(crate) fn decode_item<T: DeserializeOwned>(value: Value, slug: &str) -> Result<T, CommerceError> {
    serde_json::from_value(value).map_err(|e| CommerceError::malformed(slug, e.to_string()))
}

/// Decode a JSON array element-wise; each element is named by its own `slug` when present.
pub(crate) fn decode_list<T: DeserializeOwned>(value: Value, fallback_slug: &str) -> Result<Vec<T>, CommerceError> {
    let Value::Array(items) = value else {
        return Err(CommerceError::malformed(fallback_slug, "expected a list"));
    };
    items
        .into_iter()
        .map(|item| {
            let slug = item
                .get("slug")
                .and_then(Value::as_str)
                .unwrap_or(fallback_slug)
                .to_string();
            decode_item(item, &slug)
        })
        .collect()
}
