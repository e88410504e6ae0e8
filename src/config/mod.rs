#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{ProfileConfig, StoreConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
