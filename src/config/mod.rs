#[cfg(feature = "cli")]
pub mod cli;
pub mod gene_lists;
pub mod storage;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use storage::LocalStorage;
pub use toml_config::RegistryConfig;
