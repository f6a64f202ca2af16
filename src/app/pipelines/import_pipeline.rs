use crate::core::json::JsonDocument;
use crate::core::ranking::parse_ranking_csv;
use crate::core::{ConfigProvider, Pipeline, RankingTable, Storage};
use crate::utils::error::{EtlError, Result};

/// `{gene: rank}` map built from the ranking CSV.
#[derive(Debug, Clone)]
pub struct RankImport {
    pub ranks: JsonDocument,
    pub overwritten: usize,
}

/// Replaces the registry file with the bare ranks of the ranking CSV.
///
/// Destructive: any enrichment already in the registry is lost.
pub struct ImportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ImportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ImportPipeline<S, C> {
    type Extracted = RankingTable;
    type Transformed = RankImport;

    async fn extract(&self) -> Result<RankingTable> {
        let path = self.config.ranking_csv();
        if !self.storage.exists(path).await {
            return Err(EtlError::missing_input(path));
        }

        let data = self.storage.read_file(path).await?;
        let table = parse_ranking_csv(&data)?;
        tracing::debug!(
            "Read {} ranked rows from {} ({} without gene)",
            table.len(),
            path,
            table.skipped
        );
        Ok(table)
    }

    async fn transform(&self, data: RankingTable) -> Result<RankImport> {
        let mut ranks = JsonDocument::new();
        let mut overwritten = 0;

        // 重複的基因以最後一列為準
        for row in data.rows {
            if let Some(previous) = ranks.insert(row.gene.clone(), row.rank.into()) {
                tracing::debug!("{} appears again at rank {} (was {})", row.gene, row.rank, previous);
                overwritten += 1;
            }
        }

        Ok(RankImport { ranks, overwritten })
    }

    async fn load(&self, result: RankImport) -> Result<String> {
        let path = self.config.registry_file();
        let data = serde_json::to_vec(&result.ranks)?;

        tracing::debug!("Writing {} bytes to {}", data.len(), path);
        self.storage.write_file(path, &data).await?;

        Ok(format!(
            "Successfully converted {} genes to {}",
            result.ranks.len(),
            path
        ))
    }
}
