//! Per-gene classification cards and the top-genes strip.

use crate::domain::model::{
    GeneRecord, Registry, LABEL_IUIS_2022, LABEL_NON_IMMUNE, LABEL_NOVEL_2024,
};
use std::fmt::Write;

pub const DEFAULT_TOTAL_PROTEINS: u64 = 18349;

/// Novel genes get the "high model rank" note below this rank.
const NOVEL_CONTEXT_RANK_LIMIT: i64 = 500;

#[derive(Debug, Clone, PartialEq)]
pub enum GeneClass {
    NonImmune,
    KnownIei,
    NovelIei,
    Standard,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found {
        gene: String,
        class: GeneClass,
        rank: i64,
        probability: Option<f64>,
    },
    NotFound {
        gene: String,
    },
}

pub fn normalize_query(query: &str) -> String {
    query.trim().to_uppercase()
}

pub fn classify(record: &GeneRecord) -> GeneClass {
    if record.labels.contains(LABEL_NON_IMMUNE) {
        GeneClass::NonImmune
    } else if record.labels.contains(LABEL_IUIS_2022) {
        GeneClass::KnownIei
    } else if record.labels.contains(LABEL_NOVEL_2024) {
        GeneClass::NovelIei
    } else {
        GeneClass::Standard
    }
}

pub fn lookup(registry: &Registry, query: &str) -> LookupOutcome {
    let gene = normalize_query(query);
    match registry.get(&gene) {
        Some(record) => LookupOutcome::Found {
            class: classify(record),
            rank: record.rank.unwrap_or(0),
            probability: record.probability.score(),
            gene,
        },
        None => LookupOutcome::NotFound { gene },
    }
}

fn rank_block(out: &mut String, rank: i64, total_proteins: u64) {
    let percentile = rank as f64 / total_proteins as f64 * 100.0;
    let _ = writeln!(out, "  {} / {}", rank, total_proteins);
    let _ = writeln!(out, "  Rank among {} STRING v11 proteins.", total_proteins);
    let _ = writeln!(out, "  Top {:.2}%", percentile);
}

fn probability_line(out: &mut String, probability: Option<f64>) {
    if let Some(p) = probability {
        let _ = writeln!(out, "  Probability: {:.4}", p);
    }
}

pub fn render_lookup(outcome: &LookupOutcome, total_proteins: u64) -> String {
    let mut out = String::new();
    match outcome {
        LookupOutcome::NotFound { gene } => {
            let _ = writeln!(out, "{}", gene);
            let _ = writeln!(out, "  Non-protein-coding gene or not included in STRING v11.");
            let _ = writeln!(
                out,
                "  Only protein-coding genes with a STRING v11 protein ID are supported, so no prediction is available."
            );
        }
        LookupOutcome::Found {
            gene,
            class,
            rank,
            probability,
        } => {
            let _ = writeln!(out, "{}", gene);
            match class {
                GeneClass::NonImmune => {
                    let _ = writeln!(out, "  [Non-immune-related gene]");
                    let _ = writeln!(
                        out,
                        "  Included as a non-immune control during model training; not prioritized as an IEI candidate."
                    );
                }
                GeneClass::KnownIei => {
                    let _ = writeln!(out, "  [Known IEI (IUIS 2022)]");
                    if *rank > 0 {
                        rank_block(&mut out, *rank, total_proteins);
                    }
                    let _ = writeln!(
                        out,
                        "  Labeled as a known IEI gene in the IUIS classification used for training."
                    );
                    probability_line(&mut out, *probability);
                }
                GeneClass::NovelIei => {
                    let _ = writeln!(out, "  [Novel IEI (IUIS 2024)]");
                    if *rank > 0 {
                        rank_block(&mut out, *rank, total_proteins);
                    }
                    if *rank > 0 && *rank < NOVEL_CONTEXT_RANK_LIMIT {
                        let _ = writeln!(
                            out,
                            "  Recently added IEI gene in IUIS 2024; high model rank among all proteins."
                        );
                    }
                    probability_line(&mut out, *probability);
                }
                GeneClass::Standard => {
                    if *rank > 0 {
                        rank_block(&mut out, *rank, total_proteins);
                        probability_line(&mut out, *probability);
                    }
                }
            }
        }
    }
    out
}

/// The `limit` best-ranked genes, skipping rank 0 and unranked entries.
pub fn top_genes(registry: &Registry, limit: usize) -> Vec<(i64, String)> {
    let mut ranked: Vec<(i64, String)> = registry
        .iter()
        .filter_map(|(gene, record)| match record.rank {
            Some(rank) if rank > 0 => Some((rank, gene.to_string())),
            _ => None,
        })
        .collect();
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.truncate(limit);
    ranked
}

pub fn render_top_genes(top: &[(i64, String)]) -> String {
    top.iter()
        .map(|(rank, gene)| format!("#{} {}", rank, gene))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Labels, Probability};

    fn record(rank: i64, probability: Probability, labels: &[&str]) -> GeneRecord {
        GeneRecord {
            rank: Some(rank),
            probability,
            labels: labels.iter().collect::<Labels>(),
        }
    }

    fn sample() -> Registry {
        vec![
            ("ADA".to_string(), record(0, Probability::not_available(), &[LABEL_IUIS_2022])),
            ("TBX21".to_string(), record(12, Probability::Score(0.91234), &["Predicted IEI", LABEL_NOVEL_2024])),
            ("ALB".to_string(), record(300, Probability::Score(0.1), &["Predicted IEI", LABEL_NON_IMMUNE])),
            ("CD19".to_string(), record(2, Probability::Score(0.98), &["Predicted IEI", LABEL_IUIS_2022])),
            ("FOO1".to_string(), record(7, Probability::Text("bad".into()), &["Predicted IEI"])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_query_is_normalized() {
        match lookup(&sample(), "  tbx21 ") {
            LookupOutcome::Found { gene, class, rank, .. } => {
                assert_eq!(gene, "TBX21");
                assert_eq!(class, GeneClass::NovelIei);
                assert_eq!(rank, 12);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_non_immune_wins_over_other_labels() {
        let registry: Registry = vec![(
            "X".to_string(),
            record(1, Probability::not_available(), &[LABEL_IUIS_2022, LABEL_NON_IMMUNE]),
        )]
        .into_iter()
        .collect();
        assert!(matches!(
            lookup(&registry, "x"),
            LookupOutcome::Found { class: GeneClass::NonImmune, .. }
        ));
    }

    #[test]
    fn test_missing_gene() {
        assert_eq!(
            lookup(&sample(), "nope"),
            LookupOutcome::NotFound { gene: "NOPE".into() }
        );
    }

    #[test]
    fn test_known_iei_without_rank_has_no_rank_block() {
        let text = render_lookup(&lookup(&sample(), "ADA"), DEFAULT_TOTAL_PROTEINS);
        assert!(text.contains("Known IEI (IUIS 2022)"));
        assert!(!text.contains("/ 18349"));
        assert!(!text.contains("Probability"));
    }

    #[test]
    fn test_novel_card_has_rank_and_probability() {
        let text = render_lookup(&lookup(&sample(), "TBX21"), DEFAULT_TOTAL_PROTEINS);
        assert!(text.contains("12 / 18349"));
        assert!(text.contains("Top 0.07%"));
        assert!(text.contains("high model rank"));
        assert!(text.contains("Probability: 0.9123"));
    }

    #[test]
    fn test_standard_card_skips_text_probability() {
        let text = render_lookup(&lookup(&sample(), "FOO1"), 1000);
        assert!(text.contains("7 / 1000"));
        assert!(text.contains("Top 0.70%"));
        assert!(!text.contains("Probability"));
    }

    #[test]
    fn test_top_genes_strip() {
        let top = top_genes(&sample(), 3);
        assert_eq!(render_top_genes(&top), "#2 CD19  #7 FOO1  #12 TBX21");
    }
}
