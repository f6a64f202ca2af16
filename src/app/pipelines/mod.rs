pub mod enrich_pipeline;
pub mod import_pipeline;
pub mod lookup_pipeline;
pub mod report_pipeline;

pub use enrich_pipeline::EnrichPipeline;
pub use import_pipeline::ImportPipeline;
pub use lookup_pipeline::LookupPipeline;
pub use report_pipeline::ReportPipeline;
