use crate::config::gene_lists::load_gene_lists;
use crate::core::json::parse_registry;
use crate::core::report::{collect_top_hits, render_report, TopHit};
use crate::core::{ConfigProvider, Pipeline, ReferenceLists, Registry, Storage};
use crate::utils::error::Result;

/// Top-ranked genes of the 2024 IUIS list, rendered as a fixed-width table.
/// Read-only: nothing is written back.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    type Extracted = (Registry, ReferenceLists);
    type Transformed = Vec<TopHit>;

    async fn extract(&self) -> Result<(Registry, ReferenceLists)> {
        let lists = load_gene_lists(&self.storage, self.config.gene_lists_file()).await?;
        // 沒有存在檢查：缺檔直接往上拋
        let data = self.storage.read_file(self.config.registry_file()).await?;
        let registry = parse_registry(&data)?;
        tracing::debug!("Read {} registry entries", registry.len());
        Ok((registry, lists))
    }

    async fn transform(&self, data: (Registry, ReferenceLists)) -> Result<Vec<TopHit>> {
        let (registry, lists) = data;
        let hits = collect_top_hits(&registry, &lists, &self.config.report_window());
        tracing::debug!(
            "{} hits, {} novel",
            hits.len(),
            hits.iter().filter(|h| h.is_novel).count()
        );
        Ok(hits)
    }

    async fn load(&self, result: Vec<TopHit>) -> Result<String> {
        Ok(render_report(&result, &self.config.report_window()))
    }
}
