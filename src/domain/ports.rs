use crate::domain::model::{MutationRecord, ProfileId, RawResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub type Subscriber = Arc<dyn Fn(&MutationRecord) + Send + Sync>;

/// How `fetchName` turns a settled request into a `setProfile` commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CommitPolicy {
    /// Commit the fixed name pair on success and failure alike; failures
    /// settle as `FetchOutcome::Failed`.
    #[default]
    Literal,
    /// Commit the parsed response body; failures are returned as errors.
    Response,
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn commit_policy(&self) -> CommitPolicy;
}

/// Outbound side of the profile module.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn request(&self, id: &ProfileId) -> Result<RawResponse>;
}

/// A namespaced bundle of state, getters, mutations and actions.
#[async_trait]
pub trait StoreModule: Send + Sync {
    fn namespace(&self) -> &str;

    fn state(&self) -> serde_json::Value;

    /// `None` when the module has no getter by that name.
    fn getter(&self, name: &str) -> Option<serde_json::Value>;

    fn commit(&self, mutation: &str, payload: serde_json::Value) -> Result<()>;

    async fn dispatch(&self, action: &str, payload: serde_json::Value)
        -> Result<serde_json::Value>;

    fn subscribe(&self, subscriber: Subscriber);
}
