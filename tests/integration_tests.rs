use iei_registry::config::toml_config::RegistryConfig;
use iei_registry::{EnrichPipeline, EtlEngine, ImportPipeline, LocalStorage, ReportPipeline};
use std::path::Path;
use tempfile::TempDir;

const GENE_LISTS: &str = r#"
iuis_2022 = ["ADA", "BTK", "IL2RG", "RAG1"]
iuis_2024 = ["ADA", "BTK", "IL2RG", "RAG1", "NOVEL1", "NOVEL2"]
non_immune = ["ALB", "INS"]
"#;

const RANKED_CSV: &str = "\
gene,probability,string_id
BTK,0.991,9606.ENSP1
NOVEL1,0.987,9606.ENSP2
ALB,0.650,9606.ENSP3
GENEX,not-a-number,9606.ENSP4
RAG1,0.512,9606.ENSP5
";

fn setup() -> (TempDir, LocalStorage) {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("gene_lists.toml"), GENE_LISTS).unwrap();
    std::fs::write(temp_dir.path().join("pred_unlabeled_ranked.csv"), RANKED_CSV).unwrap();
    (temp_dir, LocalStorage::new(base))
}

fn read_registry(dir: &Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(dir.join("data.json")).unwrap()).unwrap()
}

async fn import(storage: &LocalStorage) -> iei_registry::Result<String> {
    EtlEngine::new(ImportPipeline::new(storage.clone(), RegistryConfig::default()))
        .run()
        .await
}

async fn enrich(storage: &LocalStorage) -> iei_registry::Result<String> {
    EtlEngine::new(EnrichPipeline::new(storage.clone(), RegistryConfig::default()))
        .run()
        .await
}

async fn report(storage: &LocalStorage) -> iei_registry::Result<String> {
    EtlEngine::new(ReportPipeline::new(storage.clone(), RegistryConfig::default()))
        .run()
        .await
}

#[tokio::test]
async fn test_import_enrich_report_chain() {
    let (temp_dir, storage) = setup();

    let message = import(&storage).await.unwrap();
    assert_eq!(message, "Successfully converted 5 genes to data.json");
    assert_eq!(
        read_registry(temp_dir.path()),
        serde_json::json!({"BTK": 1, "NOVEL1": 2, "ALB": 3, "GENEX": 4, "RAG1": 5})
    );

    enrich(&storage).await.unwrap();
    let registry = read_registry(temp_dir.path());

    assert_eq!(
        registry["BTK"],
        serde_json::json!({"rank": 1, "probability": 0.991, "labels": ["Predicted IEI", "2022 IUIS IEI"]})
    );
    assert_eq!(
        registry["ALB"],
        serde_json::json!({"rank": 3, "probability": 0.65, "labels": ["Predicted IEI", "Non-immune"]})
    );
    assert_eq!(registry["GENEX"]["probability"], "not-a-number");
    assert_eq!(
        registry["NOVEL2"],
        serde_json::json!({"rank": 0, "probability": "N/A", "labels": ["Novel 2024 IUIS"]})
    );

    let table = report(&storage).await.unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "Found 3 genes in top 100 that are in the 2024 IUIS list:");
    assert_eq!(lines[3], "1     BTK        2022 & 2024");
    assert_eq!(lines[4], "2     NOVEL1     Novel 2024");
    assert_eq!(lines[5], "5     RAG1       2022 & 2024");
    assert_eq!(lines.len(), 6);
}

#[tokio::test]
async fn test_enrichment_twice_is_byte_identical() {
    let (temp_dir, storage) = setup();
    import(&storage).await.unwrap();

    enrich(&storage).await.unwrap();
    let first = std::fs::read(temp_dir.path().join("data.json")).unwrap();
    enrich(&storage).await.unwrap();
    let second = std::fs::read(temp_dir.path().join("data.json")).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_every_listed_gene_is_present_after_enrichment() {
    let (temp_dir, storage) = setup();
    std::fs::write(temp_dir.path().join("data.json"), "{}").unwrap();

    enrich(&storage).await.unwrap();
    let registry = read_registry(temp_dir.path());
    let object = registry.as_object().unwrap();

    for gene in [
        "ADA", "BTK", "IL2RG", "RAG1", "NOVEL1", "NOVEL2", "ALB", "INS", "GENEX",
    ] {
        assert!(object.contains_key(gene), "{} missing from registry", gene);
    }
    assert_eq!(object.len(), 9);
}

#[tokio::test]
async fn test_enrich_without_registry_leaves_disk_untouched() {
    let (temp_dir, storage) = setup();

    let err = enrich(&storage).await.unwrap_err();
    assert!(err.is_missing_input());
    assert!(!temp_dir.path().join("data.json").exists());
}

#[tokio::test]
async fn test_enrich_without_csv_keeps_ranks() {
    let (temp_dir, storage) = setup();
    std::fs::remove_file(temp_dir.path().join("pred_unlabeled_ranked.csv")).unwrap();
    std::fs::write(temp_dir.path().join("data.json"), r#"{"BTK": 7}"#).unwrap();

    enrich(&storage).await.unwrap();
    let registry = read_registry(temp_dir.path());
    assert_eq!(
        registry["BTK"],
        serde_json::json!({"rank": 7, "probability": "N/A", "labels": ["2022 IUIS IEI"]})
    );
}

#[tokio::test]
async fn test_import_without_csv_does_not_write() {
    let (temp_dir, storage) = setup();
    std::fs::remove_file(temp_dir.path().join("pred_unlabeled_ranked.csv")).unwrap();
    std::fs::write(temp_dir.path().join("data.json"), r#"{"KEEP": 1}"#).unwrap();

    let err = import(&storage).await.unwrap_err();
    assert!(err.is_missing_input());
    assert_eq!(read_registry(temp_dir.path()), serde_json::json!({"KEEP": 1}));
}

#[tokio::test]
async fn test_report_without_registry_fails() {
    let (_temp_dir, storage) = setup();
    let err = report(&storage).await.unwrap_err();
    assert!(matches!(err, iei_registry::EtlError::IoError(_)));
}

#[tokio::test]
async fn test_custom_config_file_names() {
    let (temp_dir, storage) = setup();
    std::fs::rename(
        temp_dir.path().join("pred_unlabeled_ranked.csv"),
        temp_dir.path().join("ranked.csv"),
    )
    .unwrap();

    let config = RegistryConfig::from_toml_str(
        r#"
[files]
registry = "registry.json"
ranking_csv = "ranked.csv"

[report]
max_rank = 2
"#,
    )
    .unwrap();

    EtlEngine::new(ImportPipeline::new(storage.clone(), config.clone()))
        .run()
        .await
        .unwrap();
    EtlEngine::new(EnrichPipeline::new(storage.clone(), config.clone()))
        .run()
        .await
        .unwrap();
    let table = EtlEngine::new(ReportPipeline::new(storage.clone(), config))
        .run()
        .await
        .unwrap();

    assert!(temp_dir.path().join("registry.json").exists());
    assert!(!temp_dir.path().join("data.json").exists());
    assert!(table.starts_with("Found 2 genes in top 2 that are in the 2024 IUIS list:"));
}
