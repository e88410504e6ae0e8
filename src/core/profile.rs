use crate::adapters::http::HttpProfileSource;
use crate::domain::model::{FetchOutcome, MutationRecord, ProfileId, ProfilePayload, ProfileState};
use crate::domain::ports::{CommitPolicy, ConfigProvider, ProfileSource, StoreModule, Subscriber};
use crate::utils::error::{OperationKind, Result, StoreError};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

pub const PROFILE_NAMESPACE: &str = "profile";

/// Names committed by `fetchName` under [`CommitPolicy::Literal`].
pub const LITERAL_FIRST_NAME: &str = "lin";
pub const LITERAL_LAST_NAME: &str = "guangyu";

/// Owns the first/last name pair.
///
/// Every write goes through [`ProfileModule::set_profile`].
pub struct ProfileModule {
    state: RwLock<ProfileState>,
    subscribers: RwLock<Vec<Subscriber>>,
    source: Arc<dyn ProfileSource>,
    policy: CommitPolicy,
}

impl ProfileModule {
    pub fn new(source: Arc<dyn ProfileSource>, policy: CommitPolicy) -> Self {
        Self {
            state: RwLock::new(ProfileState::default()),
            subscribers: RwLock::new(Vec::new()),
            source,
            policy,
        }
    }

    /// Module wired to an [`HttpProfileSource`] built from `config`.
    /// Fails when `config` does not validate.
    pub fn from_config<C: ConfigProvider + Validate>(config: &C) -> Result<Self> {
        let source = HttpProfileSource::from_config(config)?;
        Ok(Self::new(Arc::new(source), config.commit_policy()))
    }

    pub fn commit_policy(&self) -> CommitPolicy {
        self.policy
    }

    pub fn first_name(&self) -> String {
        self.read(|state| state.first_name.clone())
    }

    pub fn last_name(&self) -> String {
        self.read(|state| state.last_name.clone())
    }

    pub fn snapshot(&self) -> ProfileState {
        self.read(ProfileState::clone)
    }

    pub fn set_profile(&self, payload: ProfilePayload) {
        let record = MutationRecord {
            mutation_type: format!("{}/setProfile", PROFILE_NAMESPACE),
            payload: serde_json::json!({
                "firstName": payload.first_name,
                "lastName": payload.last_name,
            }),
        };

        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.first_name = payload.first_name;
            state.last_name = payload.last_name;
        }

        // Snapshot so a subscriber may commit again without holding the lock.
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for subscriber in &subscribers {
            subscriber(&record);
        }
    }

    /// Requests the profile source and commits according to the module's
    /// [`CommitPolicy`].
    ///
    /// Under `Literal` this never returns `Err`: a failed request settles as
    /// `FetchOutcome::Failed` after the fixed names are committed.
    pub async fn fetch_name(&self, id: impl Into<ProfileId>) -> Result<FetchOutcome> {
        let id = id.into();
        tracing::info!("action: fetchName id={}", id);

        let result = self.source.request(&id).await;

        match self.policy {
            CommitPolicy::Literal => {
                self.set_profile(ProfilePayload::new(LITERAL_FIRST_NAME, LITERAL_LAST_NAME));
                Ok(match result {
                    Ok(raw) => FetchOutcome::Response(raw),
                    Err(err) => FetchOutcome::Failed(err),
                })
            }
            CommitPolicy::Response => {
                let raw = result?;
                let payload: ProfilePayload = serde_json::from_str(&raw.body)?;
                tracing::debug!(
                    "Committing profile from response: {} {}",
                    payload.first_name,
                    payload.last_name
                );
                self.set_profile(payload);
                Ok(FetchOutcome::Response(raw))
            }
        }
    }

    fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ProfileState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn unknown(&self, kind: OperationKind, name: &str) -> StoreError {
        StoreError::UnknownOperation {
            kind,
            namespace: PROFILE_NAMESPACE.to_string(),
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl StoreModule for ProfileModule {
    fn namespace(&self) -> &str {
        PROFILE_NAMESPACE
    }

    fn state(&self) -> serde_json::Value {
        let state = self.snapshot();
        serde_json::json!({
            "firstName": state.first_name,
            "lastName": state.last_name,
        })
    }

    fn getter(&self, name: &str) -> Option<serde_json::Value> {
        match name {
            "firstName" => Some(serde_json::Value::String(self.first_name())),
            "lastName" => Some(serde_json::Value::String(self.last_name())),
            _ => None,
        }
    }

    fn commit(&self, mutation: &str, payload: serde_json::Value) -> Result<()> {
        match mutation {
            "setProfile" => {
                let payload: ProfilePayload =
                    serde_json::from_value(payload).map_err(|e| StoreError::InvalidPayload {
                        operation: format!("{}/setProfile", PROFILE_NAMESPACE),
                        message: e.to_string(),
                    })?;
                self.set_profile(payload);
                Ok(())
            }
            _ => Err(self.unknown(OperationKind::Mutation, mutation)),
        }
    }

    async fn dispatch(
        &self,
        action: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value> {
        match action {
            "fetchName" => {
                let id = match payload {
                    serde_json::Value::Number(n) => ProfileId(n),
                    other => {
                        return Err(StoreError::InvalidPayload {
                            operation: format!("{}/fetchName", PROFILE_NAMESPACE),
                            message: format!("expected a numeric id, got {}", other),
                        })
                    }
                };
                let outcome = self.fetch_name(id).await?;
                Ok(outcome.to_json())
            }
            _ => Err(self.unknown(OperationKind::Action, action)),
        }
    }

    fn subscribe(&self, subscriber: Subscriber) {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscriber);
    }
}
