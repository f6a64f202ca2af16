use crate::core::json::parse_registry;
use crate::core::lookup::{lookup, render_lookup, render_top_genes, top_genes, LookupOutcome};
use crate::core::{ConfigProvider, Pipeline, Registry, Storage};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Cards(Vec<LookupOutcome>),
    TopGenes(Vec<(i64, String)>),
}

/// Answers gene queries against the enriched registry. With no queries it lists
/// the best-ranked genes instead.
pub struct LookupPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    queries: Vec<String>,
}

impl<S: Storage, C: ConfigProvider> LookupPipeline<S, C> {
    pub fn new(storage: S, config: C, queries: Vec<String>) -> Self {
        Self {
            storage,
            config,
            queries,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LookupPipeline<S, C> {
    type Extracted = Registry;
    type Transformed = LookupResult;

    async fn extract(&self) -> Result<Registry> {
        let data = self.storage.read_file(self.config.registry_file()).await?;
        parse_registry(&data)
    }

    async fn transform(&self, data: Registry) -> Result<LookupResult> {
        if self.queries.is_empty() {
            return Ok(LookupResult::TopGenes(top_genes(&data, self.config.top_genes())));
        }
        Ok(LookupResult::Cards(
            self.queries.iter().map(|q| lookup(&data, q)).collect(),
        ))
    }

    async fn load(&self, result: LookupResult) -> Result<String> {
        let text = match result {
            LookupResult::TopGenes(top) => format!("Top genes: {}\n", render_top_genes(&top)),
            LookupResult::Cards(outcomes) => outcomes
                .iter()
                .map(|o| render_lookup(o, self.config.total_proteins()))
                .collect::<Vec<_>>()
                .join("\n"),
        };
        Ok(text)
    }
}
