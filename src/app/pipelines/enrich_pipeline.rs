use crate::config::gene_lists::load_gene_lists;
use crate::core::enrich::{enrich, ReferenceSummary};
use crate::core::json::{parse_document, to_registry_json, JsonDocument};
use crate::core::ranking::parse_ranking_csv;
use crate::core::{ConfigProvider, Pipeline, RankingTable, ReferenceLists, Registry, Storage};
use crate::utils::error::{EtlError, Result};

#[derive(Debug, Clone)]
pub struct EnrichInput {
    pub document: JsonDocument,
    pub ranking: Option<RankingTable>,
    pub lists: ReferenceLists,
}

/// Rebuilds every registry record from the ranking CSV and the reference lists,
/// then rewrites the registry file as indented JSON.
pub struct EnrichPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> EnrichPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn read_ranking(&self) -> Result<Option<RankingTable>> {
        let path = self.config.ranking_csv();
        if !self.storage.exists(path).await {
            println!(
                "Warning: {} not found. Skipping predicted IEI data loading.",
                path
            );
            tracing::warn!("Ranking CSV {} missing, predictions not refreshed", path);
            return Ok(None);
        }

        println!("Loading predicted IEI data from {}...", path);
        let data = self.storage.read_file(path).await?;
        let table = parse_ranking_csv(&data)?;
        tracing::debug!("Read {} ranked rows from {}", table.len(), path);
        Ok(Some(table))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for EnrichPipeline<S, C> {
    type Extracted = EnrichInput;
    type Transformed = Registry;

    async fn extract(&self) -> Result<EnrichInput> {
        let lists = load_gene_lists(&self.storage, self.config.gene_lists_file()).await?;

        let path = self.config.registry_file();
        if !self.storage.exists(path).await {
            return Err(EtlError::missing_input(path));
        }
        let document = parse_document(&self.storage.read_file(path).await?)?;
        tracing::debug!("Read {} registry entries from {}", document.len(), path);

        for line in ReferenceSummary::of(&lists).lines() {
            println!("{}", line);
        }

        let ranking = self.read_ranking().await?;

        Ok(EnrichInput {
            document,
            ranking,
            lists,
        })
    }

    async fn transform(&self, data: EnrichInput) -> Result<Registry> {
        let registry = enrich(&data.document, data.ranking.as_ref(), &data.lists);
        tracing::info!(
            "Registry now holds {} genes ({} before enrichment)",
            registry.len(),
            data.document.len()
        );
        Ok(registry)
    }

    async fn load(&self, result: Registry) -> Result<String> {
        let path = self.config.registry_file();
        let data = to_registry_json(&result)?;

        tracing::debug!("Writing {} bytes to {}", data.len(), path);
        self.storage.write_file(path, &data).await?;

        Ok(format!("Updated data saved to {}", path))
    }
}
