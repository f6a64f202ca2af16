use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

pub const DEFAULT_REGISTRY_FILE: &str = "data.json";
pub const DEFAULT_RANKING_CSV: &str = "pred_unlabeled_ranked.csv";
pub const DEFAULT_GENE_LISTS_FILE: &str = "gene_lists.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub registry: String,
    pub ranking_csv: String,
    pub gene_lists: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            registry: DEFAULT_REGISTRY_FILE.to_string(),
            ranking_csv: DEFAULT_RANKING_CSV.to_string(),
            gene_lists: DEFAULT_GENE_LISTS_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub min_rank: i64,
    pub max_rank: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_rank: 1,
            max_rank: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub total_proteins: u64,
    pub top_genes: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            total_proteins: crate::core::lookup::DEFAULT_TOTAL_PROTEINS,
            top_genes: 10,
        }
    }
}

impl RegistryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }
}

/// 替換環境變數 (例如 ${DATA_DIR})；未設定的變數保持原樣
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
        message: format!("invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        validate_path("files.registry", &self.files.registry)?;
        validate_file_extension("files.registry", &self.files.registry, &["json"])?;
        validate_path("files.ranking_csv", &self.files.ranking_csv)?;
        validate_file_extension("files.ranking_csv", &self.files.ranking_csv, &["csv"])?;
        validate_path("files.gene_lists", &self.files.gene_lists)?;
        validate_file_extension("files.gene_lists", &self.files.gene_lists, &["toml"])?;

        validate_positive_number("report.min_rank", self.report.min_rank, 1)?;
        validate_positive_number("report.max_rank", self.report.max_rank, self.report.min_rank)?;
        validate_positive_number("lookup.total_proteins", self.lookup.total_proteins, 1)?;
        validate_positive_number("lookup.top_genes", self.lookup.top_genes, 1)?;
        Ok(())
    }
}

impl ConfigProvider for RegistryConfig {
    fn registry_file(&self) -> &str {
        &self.files.registry
    }

    fn ranking_csv(&self) -> &str {
        &self.files.ranking_csv
    }

    fn gene_lists_file(&self) -> &str {
        &self.files.gene_lists
    }

    fn report_window(&self) -> RangeInclusive<i64> {
        self.report.min_rank..=self.report.max_rank
    }

    fn total_proteins(&self) -> u64 {
        self.lookup.total_proteins
    }

    fn top_genes(&self) -> usize {
        self.lookup.top_genes
    }
}
