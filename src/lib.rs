pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::{EnrichPipeline, ImportPipeline, LookupPipeline, ReportPipeline};
pub use config::{LocalStorage, RegistryConfig};
pub use core::etl::EtlEngine;
pub use domain::model::{GeneRecord, Labels, Probability, Registry};
pub use domain::reference::ReferenceLists;
pub use utils::error::{EtlError, Result};
