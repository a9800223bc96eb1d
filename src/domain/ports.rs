use crate::domain::model::{AssessmentItem, AssessmentReport, OutputFormat};
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
    fn child_name(&self) -> &str;
    /// Raw "years;months" age string as entered.
    fn age_input(&self) -> &str;
    fn input_path(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
    fn bundle(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<AssessmentItem>>;
    async fn transform(&self, items: Vec<AssessmentItem>) -> Result<AssessmentReport>;
    async fn load(&self, report: AssessmentReport) -> Result<String>;
}
