use crate::domain::model::{Probability, RankedGene, RankingTable};
use crate::utils::error::{EtlError, Result};

/// Parses the ranked prediction CSV. Rank is the 1-based row position, counted
/// over every data row including the ones skipped for an empty gene cell.
///
/// A file with no header row at all is an empty table.
pub fn parse_ranking_csv(data: &[u8]) -> Result<RankingTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        tracing::debug!("Ranking CSV is empty");
        return Ok(RankingTable::default());
    }

    let gene_idx = headers.iter().position(|h| h == "gene").ok_or_else(|| {
        EtlError::ValidationError {
            message: format!(
                "ranking CSV has no 'gene' column (found: {})",
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        }
    })?;
    let probability_idx = headers.iter().position(|h| h == "probability");

    let mut table = RankingTable::default();
    for (position, record) in reader.records().enumerate() {
        let record = record?;
        let rank = position as i64 + 1;

        let gene = match record.get(gene_idx).map(str::trim) {
            Some(gene) if !gene.is_empty() => gene.to_string(),
            _ => {
                tracing::debug!("Skipping row {} with empty gene", rank);
                table.skipped += 1;
                continue;
            }
        };

        // 只有欄位不存在或該列太短時才是 N/A，空字串照原樣保留
        let probability = probability_idx
            .and_then(|idx| record.get(idx))
            .map(Probability::parse)
            .unwrap_or_else(Probability::not_available);

        table.rows.push(RankedGene {
            rank,
            gene,
            probability,
        });
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_follows_row_order() {
        let table = parse_ranking_csv(b"gene\nA\nB\nC\n").unwrap();
        let ranks: Vec<(&str, i64)> = table.rows.iter().map(|r| (r.gene.as_str(), r.rank)).collect();
        assert_eq!(ranks, vec![("A", 1), ("B", 2), ("C", 3)]);
        assert!(table.rows.iter().all(|r| r.probability == Probability::not_available()));
    }

    #[test]
    fn test_probability_column_and_bad_values() {
        let table = parse_ranking_csv(b"gene,probability\nX,0.9\nY,bad\n").unwrap();
        assert_eq!(table.rows[0].probability, Probability::Score(0.9));
        assert_eq!(table.rows[1].probability, Probability::Text("bad".into()));
    }

    #[test]
    fn test_empty_gene_rows_keep_position() {
        let table = parse_ranking_csv(b"gene,probability\n A ,0.5\n,0.4\nB,0.3\n").unwrap();
        assert_eq!(table.skipped, 1);
        assert_eq!(table.rows[0].gene, "A");
        assert_eq!(table.rows[1].gene, "B");
        assert_eq!(table.rows[1].rank, 3);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let table = parse_ranking_csv(b"score,gene,probability,string_id\n1,ADA,0.99,9606.x\n").unwrap();
        assert_eq!(table.rows[0].gene, "ADA");
        assert_eq!(table.rows[0].probability, Probability::Score(0.99));
    }

    #[test]
    fn test_short_row_has_no_probability() {
        let table = parse_ranking_csv(b"gene,probability\nA\n").unwrap();
        assert_eq!(table.rows[0].probability, Probability::not_available());
    }

    #[test]
    fn test_missing_gene_column_is_rejected() {
        let err = parse_ranking_csv(b"symbol,probability\nA,0.1\n").unwrap_err();
        assert!(matches!(err, EtlError::ValidationError { .. }));
    }

    #[test]
    fn test_empty_probability_cell_keeps_raw_text() {
        let table = parse_ranking_csv(b"gene,probability\nE,\nW, \n").unwrap();
        assert_eq!(table.rows[0].probability, Probability::Text(String::new()));
        assert_eq!(table.rows[1].probability, Probability::Text(" ".into()));
    }

    #[test]
    fn test_zero_byte_file_is_empty_table() {
        let table = parse_ranking_csv(b"").unwrap();
        assert_eq!(table.len(), 0);
        assert_eq!(table.skipped, 0);
    }
}
