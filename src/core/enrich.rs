//! Registry enrichment as an ordered chain of pure steps.
//!
//! Each step takes the whole registry and returns it. Rank and probability are
//! overwritten by later steps; labels only accumulate.

use crate::domain::model::{
    GeneRecord, RankingTable, Registry, LABEL_IUIS_2022, LABEL_NON_IMMUNE,
    LABEL_NOVEL_2024, LABEL_PREDICTED_IEI,
};
use crate::domain::reference::ReferenceLists;

/// Brings every stored entry to the `{rank, probability, labels}` shape with
/// labels emptied. Labels are rebuilt from the current inputs by the later steps.
pub fn normalize(document: &serde_json::Map<String, serde_json::Value>) -> Registry {
    let mut registry = Registry::from_json(document);
    for (_, record) in registry.iter_mut() {
        record.labels.clear();
    }
    registry
}

/// Refreshes rank and probability from the ranking table and tags each row's gene.
pub fn apply_predictions(mut registry: Registry, table: &RankingTable) -> Registry {
    for row in &table.rows {
        let record = registry.get_or_insert_with(&row.gene, || {
            GeneRecord::new(Some(row.rank), row.probability.clone())
        });
        record.rank = Some(row.rank);
        record.probability = row.probability.clone();
        record.labels.add(LABEL_PREDICTED_IEI);
    }
    registry
}

/// Tags every gene in `genes` with `label`, adding a rank-0 entry for unknown genes.
pub fn apply_reference_label<'a, I>(mut registry: Registry, genes: I, label: &str) -> Registry
where
    I: IntoIterator<Item = &'a String>,
{
    for gene in genes {
        registry
            .get_or_insert_with(gene, GeneRecord::placeholder)
            .labels
            .add(label);
    }
    registry
}

/// Runs the full enrichment chain.
pub fn enrich(
    document: &serde_json::Map<String, serde_json::Value>,
    ranking: Option<&RankingTable>,
    lists: &ReferenceLists,
) -> Registry {
    let mut registry = normalize(document);
    tracing::debug!("Normalized {} existing entries", registry.len());

    if let Some(table) = ranking {
        registry = apply_predictions(registry, table);
        tracing::debug!("Applied {} ranked predictions", table.len());
    }

    let novel = lists.novel_2024();
    registry = apply_reference_label(registry, &lists.iuis_2022, LABEL_IUIS_2022);
    registry = apply_reference_label(registry, &lists.non_immune, LABEL_NON_IMMUNE);
    registry = apply_reference_label(registry, &novel, LABEL_NOVEL_2024);

    registry
}

/// Counts of the reference lists, printed before the registry is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSummary {
    pub iuis_2022: usize,
    pub non_immune: usize,
    pub iuis_2024: usize,
    pub novel_2024: usize,
}

impl ReferenceSummary {
    pub fn of(lists: &ReferenceLists) -> Self {
        Self {
            iuis_2022: lists.iuis_2022.len(),
            non_immune: lists.non_immune.len(),
            iuis_2024: lists.iuis_2024.len(),
            novel_2024: lists.novel_2024().len(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("IUIS 2022 count: {}", self.iuis_2022),
            format!("Non-immune count: {}", self.non_immune),
            format!("IUIS 2024 count (total): {}", self.iuis_2024),
            format!("Novel 2024 count: {}", self.novel_2024),
        ]
    }
}
