pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpProfileSource;
pub use config::StoreConfig;
pub use core::{profile::ProfileModule, store::RootStore};
pub use domain::model::{FetchOutcome, ProfileId, ProfilePayload, ProfileState, RawResponse};
pub use domain::ports::CommitPolicy;
pub use utils::error::{Result, StoreError};
