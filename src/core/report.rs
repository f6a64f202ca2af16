use crate::domain::model::Registry;
use crate::domain::reference::ReferenceLists;
use std::fmt::Write;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq)]
pub struct TopHit {
    pub rank: i64,
    pub gene: String,
    pub is_novel: bool,
    pub labels: Vec<String>,
}

impl TopHit {
    pub fn type_label(&self) -> &'static str {
        if self.is_novel {
            "Novel 2024"
        } else {
            "2022 & 2024"
        }
    }
}

/// Genes ranked inside `window` that belong to the 2024 list, best rank first.
///
/// The sort is stable, so equal ranks keep registry order.
pub fn collect_top_hits(
    registry: &Registry,
    lists: &ReferenceLists,
    window: &RangeInclusive<i64>,
) -> Vec<TopHit> {
    let mut hits: Vec<TopHit> = registry
        .iter()
        .filter_map(|(gene, record)| {
            let rank = record.rank?;
            if !window.contains(&rank) || !lists.iuis_2024.contains(gene) {
                return None;
            }
            Some(TopHit {
                rank,
                gene: gene.to_string(),
                is_novel: !lists.iuis_2022.contains(gene),
                labels: record.labels.to_vec(),
            })
        })
        .collect();

    hits.sort_by_key(|hit| hit.rank);
    hits
}

pub fn render_report(hits: &[TopHit], window: &RangeInclusive<i64>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Found {} genes in top {} that are in the 2024 IUIS list:",
        hits.len(),
        window.end()
    );
    let _ = writeln!(out, "{:<5} {:<10} Type", "Rank", "Gene");
    let _ = writeln!(out, "{}", "-".repeat(30));
    for hit in hits {
        let _ = writeln!(out, "{:<5} {:<10} {}", hit.rank, hit.gene, hit.type_label());
    }
    out
}
