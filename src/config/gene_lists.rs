use crate::core::{ReferenceLists, Storage};
use crate::utils::error::{EtlError, Result};

/// Parses the reference list file: TOML arrays `iuis_2022`, `iuis_2024`, `non_immune`.
pub fn parse_gene_lists(content: &str) -> Result<ReferenceLists> {
    let lists: ReferenceLists = toml::from_str(content)?;
    if lists.iuis_2022.is_empty() && lists.iuis_2024.is_empty() && lists.non_immune.is_empty() {
        tracing::warn!("Gene list file defines no genes");
    }
    Ok(lists)
}

pub async fn load_gene_lists<S: Storage>(storage: &S, path: &str) -> Result<ReferenceLists> {
    if !storage.exists(path).await {
        return Err(EtlError::ConfigError {
            message: format!("gene list file {} not found", path),
        });
    }
    let data = storage.read_file(path).await?;
    let content = String::from_utf8(data).map_err(|e| EtlError::ConfigError {
        message: format!("{} is not valid UTF-8: {}", path, e),
    })?;
    let lists = parse_gene_lists(&content)?;
    tracing::debug!(
        "Loaded gene lists from {}: {} / {} / {}",
        path,
        lists.iuis_2022.len(),
        lists.iuis_2024.len(),
        lists.non_immune.len()
    );
    Ok(lists)
}
