use indexmap::IndexMap;
use serde::Serialize;

pub const LABEL_PREDICTED_IEI: &str = "Predicted IEI";
pub const LABEL_IUIS_2022: &str = "2022 IUIS IEI";
pub const LABEL_NON_IMMUNE: &str = "Non-immune";
pub const LABEL_NOVEL_2024: &str = "Novel 2024 IUIS";

/// Placeholder stored when no numeric prediction exists.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rank given to genes that only come from a reference list.
pub const DEFAULT_RANK: i64 = 0;

/// Prediction probability of a gene.
///
/// Either a finite score, or text: `"N/A"` when nothing was predicted, or the raw
/// CSV cell when it could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Probability {
    Score(f64),
    Text(String),
}

impl Probability {
    pub fn not_available() -> Self {
        Probability::Text(NOT_AVAILABLE.to_string())
    }

    /// Parses a CSV cell. Unparseable and non-finite values keep their raw text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(score) if score.is_finite() => Probability::Score(score),
            _ => Probability::Text(raw.to_string()),
        }
    }

    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => n
                .as_f64()
                .map(Probability::Score)
                .unwrap_or_else(Probability::not_available),
            Some(serde_json::Value::String(s)) => Probability::Text(s.clone()),
            Some(serde_json::Value::Null) | None => Probability::not_available(),
            Some(other) => Probability::Text(other.to_string()),
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Probability::Score(score) => Some(*score),
            Probability::Text(_) => None,
        }
    }
}

/// Insertion-ordered tag list without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Labels(Vec<String>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `label` unless already present. Returns whether it was added.
    pub fn add(&mut self, label: &str) -> bool {
        if self.contains(label) {
            return false;
        }
        self.0.push(label.to_string());
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Labels {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut labels = Labels::new();
        for label in iter {
            labels.add(label.as_ref());
        }
        labels
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneRecord {
    pub rank: Option<i64>,
    pub probability: Probability,
    pub labels: Labels,
}

impl GeneRecord {
    pub fn new(rank: Option<i64>, probability: Probability) -> Self {
        Self {
            rank,
            probability,
            labels: Labels::new(),
        }
    }

    /// Record created for a gene that only appears in a reference list.
    pub fn placeholder() -> Self {
        Self::new(Some(DEFAULT_RANK), Probability::not_available())
    }

    /// Reads one registry value, accepting both the enriched object shape and a
    /// bare legacy rank. Labels are kept when present.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(obj) if obj.contains_key("rank") => {
                let labels = match obj.get("labels") {
                    Some(serde_json::Value::Array(items)) => {
                        items.iter().filter_map(|v| v.as_str()).collect()
                    }
                    _ => Labels::new(),
                };
                Self {
                    rank: obj.get("rank").and_then(rank_from_json),
                    probability: Probability::from_json(obj.get("probability")),
                    labels,
                }
            }
            legacy => Self::new(rank_from_json(legacy), Probability::not_available()),
        }
    }
}

fn rank_from_json(value: &serde_json::Value) -> Option<i64> {
    let rank = value.as_i64();
    if rank.is_none() && !value.is_null() {
        tracing::warn!("Ignoring non-integer rank value: {}", value);
    }
    rank
}

/// Gene symbol → record map that remembers insertion order.
///
/// Replacing an existing record keeps its original position, so rewriting the
/// registry file never reshuffles it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Registry(IndexMap<String, GeneRecord>);

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, gene: &str) -> Option<&GeneRecord> {
        self.0.get(gene)
    }

    /// Returns the record for `gene`, inserting `default()` first when absent.
    pub fn get_or_insert_with<F>(&mut self, gene: &str, default: F) -> &mut GeneRecord
    where
        F: FnOnce() -> GeneRecord,
    {
        self.0.entry(gene.to_string()).or_insert_with(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeneRecord)> {
        self.0.iter().map(|(gene, record)| (gene.as_str(), record))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut GeneRecord)> {
        self.0.iter_mut().map(|(gene, record)| (gene.as_str(), record))
    }

    /// Builds a registry from a parsed JSON document, keeping labels.
    pub fn from_json(document: &serde_json::Map<String, serde_json::Value>) -> Self {
        document
            .iter()
            .map(|(gene, value)| (gene.clone(), GeneRecord::from_json(value)))
            .collect()
    }
}

impl FromIterator<(String, GeneRecord)> for Registry {
    fn from_iter<I: IntoIterator<Item = (String, GeneRecord)>>(iter: I) -> Self {
        Registry(iter.into_iter().collect())
    }
}

/// One row of the ranking CSV, rank already derived from row position.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedGene {
    pub rank: i64,
    pub gene: String,
    pub probability: Probability,
}

/// Rows of the ranking CSV in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingTable {
    pub rows: Vec<RankedGene>,
    /// Rows dropped because the gene cell was empty.
    pub skipped: usize,
}

impl RankingTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
