use crate::core::profile::ProfileModule;
use crate::domain::model::{MutationRecord, RootState};
use crate::domain::ports::{ConfigProvider, StoreModule, Subscriber};
use crate::utils::error::{OperationKind, Result, StoreError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Root container: the constant version plus every mounted module.
///
/// Operations are addressed as `"<namespace>/<name>"`, e.g.
/// `store.getter("profile/firstName")`.
pub struct RootStore {
    root: RootState,
    profile: Arc<ProfileModule>,
    modules: BTreeMap<String, Arc<dyn StoreModule>>,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl RootStore {
    pub fn new(profile: ProfileModule) -> Self {
        let profile = Arc::new(profile);
        let mut modules: BTreeMap<String, Arc<dyn StoreModule>> = BTreeMap::new();
        modules.insert(
            profile.namespace().to_string(),
            profile.clone() as Arc<dyn StoreModule>,
        );

        Self {
            root: RootState::default(),
            profile,
            modules,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Builds the store over HTTP. `config` is validated first.
    pub fn from_config<C: ConfigProvider + Validate>(config: &C) -> Result<Self> {
        Ok(Self::new(ProfileModule::from_config(config)?))
    }

    pub fn version(&self) -> &str {
        &self.root.version
    }

    pub fn profile(&self) -> &ProfileModule {
        &self.profile
    }

    pub fn register(&mut self, module: Arc<dyn StoreModule>) -> Result<()> {
        let namespace = module.namespace().to_string();
        validate_non_empty_string("namespace", &namespace)?;
        if namespace.contains('/') {
            return Err(StoreError::InvalidPath { path: namespace });
        }
        if self.modules.contains_key(&namespace) {
            return Err(StoreError::DuplicateModule { namespace });
        }

        for subscriber in self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            module.subscribe(subscriber.clone());
        }

        tracing::debug!("Registered store module '{}'", namespace);
        self.modules.insert(namespace, module);
        Ok(())
    }

    pub fn module(&self, namespace: &str) -> Option<&Arc<dyn StoreModule>> {
        self.modules.get(namespace)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn getter(&self, path: &str) -> Result<serde_json::Value> {
        let (module, name) = self.resolve(path)?;
        module.getter(name).ok_or_else(|| StoreError::UnknownOperation {
            kind: OperationKind::Getter,
            namespace: module.namespace().to_string(),
            name: name.to_string(),
        })
    }

    pub fn commit(&self, path: &str, payload: serde_json::Value) -> Result<()> {
        let (module, name) = self.resolve(path)?;
        module.commit(name, payload)
    }

    pub async fn dispatch(&self, path: &str, payload: serde_json::Value) -> Result<serde_json::Value> {
        let (module, name) = self.resolve(path)?;
        module.dispatch(name, payload).await
    }

    /// Registers `callback` for every mutation in every module, including
    /// modules registered after this call.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&MutationRecord) + Send + Sync + 'static,
    {
        let subscriber: Subscriber = Arc::new(callback);
        for module in self.modules.values() {
            module.subscribe(subscriber.clone());
        }
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscriber);
    }

    /// Snapshot of the whole state tree, modules keyed by namespace.
    pub fn state(&self) -> serde_json::Value {
        let mut tree = serde_json::Map::new();
        tree.insert(
            "version".to_string(),
            serde_json::Value::String(self.root.version.clone()),
        );
        for (namespace, module) in &self.modules {
            tree.insert(namespace.clone(), module.state());
        }
        serde_json::Value::Object(tree)
    }

    fn resolve<'p>(&self, path: &'p str) -> Result<(&Arc<dyn StoreModule>, &'p str)> {
        let (namespace, name) = path
            .split_once('/')
            .filter(|(ns, name)| !ns.is_empty() && !name.is_empty())
            .ok_or_else(|| StoreError::InvalidPath {
                path: path.to_string(),
            })?;

        let module = self
            .modules
            .get(namespace)
            .ok_or_else(|| StoreError::UnknownModule {
                namespace: namespace.to_string(),
            })?;

        Ok((module, name))
    }
}
