use crate::utils::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version string carried by every root store.
pub const ROOT_VERSION: &str = "v1.0.0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileState {
    pub first_name: String,
    pub last_name: String,
}

/// Argument of the `setProfile` mutation. Same shape as [`ProfileState`].
pub type ProfilePayload = ProfileState;

impl ProfileState {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Argument of the `fetchName` action: any JSON number, kept as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub serde_json::Number);

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for ProfileId {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<serde_json::Number>(s.trim()).map(ProfileId)
    }
}

impl From<i32> for ProfileId {
    fn from(id: i32) -> Self {
        ProfileId(id.into())
    }
}

impl From<i64> for ProfileId {
    fn from(id: i64) -> Self {
        ProfileId(id.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootState {
    pub version: String,
}

impl Default for RootState {
    fn default() -> Self {
        Self {
            version: ROOT_VERSION.to_string(),
        }
    }
}

/// A completed HTTP exchange. The body is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

/// Settled value of the `fetchName` action.
#[derive(Debug)]
pub enum FetchOutcome {
    Response(RawResponse),
    Failed(StoreError),
}

impl FetchOutcome {
    pub fn is_response(&self) -> bool {
        matches!(self, FetchOutcome::Response(_))
    }

    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            FetchOutcome::Response(raw) => Some(raw),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            FetchOutcome::Response(_) => None,
            FetchOutcome::Failed(err) => Some(err),
        }
    }

    /// JSON form returned from a namespaced dispatch.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FetchOutcome::Response(raw) => serde_json::json!({
                "url": raw.url,
                "status": raw.status,
                "body": raw.body,
                "receivedAt": raw.received_at.to_rfc3339(),
            }),
            FetchOutcome::Failed(err) => serde_json::json!({
                "error": err.to_string(),
            }),
        }
    }
}

/// Delivered to subscribers after every committed mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationRecord {
    #[serde(rename = "type")]
    pub mutation_type: String,
    pub payload: serde_json::Value,
}
