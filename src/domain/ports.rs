use crate::domain::model::{ScheduleSource, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn schedule_file(&self) -> Option<&str>;
    fn csv_file(&self) -> Option<&str>;
    fn endpoint(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn bundle_outputs(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ScheduleSource>;
    async fn transform(&self, source: ScheduleSource) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
