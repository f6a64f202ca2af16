use crate::utils::error::Result;
use async_trait::async_trait;
use std::ops::RangeInclusive;

pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn registry_file(&self) -> &str;
    fn ranking_csv(&self) -> &str;
    fn gene_lists_file(&self) -> &str;
    fn report_window(&self) -> RangeInclusive<i64>;
    fn total_proteins(&self) -> u64;
    fn top_genes(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Extracted: Send;
    type Transformed: Send;

    async fn extract(&self) -> Result<Self::Extracted>;
    async fn transform(&self, data: Self::Extracted) -> Result<Self::Transformed>;
    async fn load(&self, result: Self::Transformed) -> Result<String>;
}
