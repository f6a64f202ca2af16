use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Curated gene classification lists, fixed for the lifetime of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLists {
    #[serde(default, deserialize_with = "symbol_set")]
    pub iuis_2022: BTreeSet<String>,
    #[serde(default, deserialize_with = "symbol_set")]
    pub iuis_2024: BTreeSet<String>,
    #[serde(default, deserialize_with = "symbol_set")]
    pub non_immune: BTreeSet<String>,
}

impl ReferenceLists {
    pub fn new<I, S>(iuis_2022: I, iuis_2024: I, non_immune: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            iuis_2022: collect_symbols(iuis_2022),
            iuis_2024: collect_symbols(iuis_2024),
            non_immune: collect_symbols(non_immune),
        }
    }

    /// Genes added in the 2024 revision: in the 2024 list but not the 2022 one.
    pub fn novel_2024(&self) -> BTreeSet<String> {
        self.iuis_2024
            .difference(&self.iuis_2022)
            .cloned()
            .collect()
    }

    pub fn is_novel_2024(&self, gene: &str) -> bool {
        self.iuis_2024.contains(gene) && !self.iuis_2022.contains(gene)
    }
}

fn collect_symbols<I, S>(symbols: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    symbols
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn symbol_set<'de, D>(deserializer: D) -> std::result::Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(collect_symbols(raw))
}
